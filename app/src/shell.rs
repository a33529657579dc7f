//! The shell: navigation bar, routing, and the one mounted view.
//!
//! # Design
//! The shell owns the current route's view and nothing else; navigating away
//! unmounts the old view (invalidating its outstanding request) and mounts a
//! fresh one, which fetches its own data. Requests run to completion through
//! the `Transport` before the next command is read, so each view has at most
//! one call in flight.

use employee_core::render;
use employee_core::views::FormOutcome;
use employee_core::{
    DetailView, EmployeeClient, EmployeeId, Field, FormView, History, ListView, Navigation, PendingRequest, Route,
    SubmitBlocked,
};
use thiserror::Error;

use crate::command::Command;
use crate::transport::Transport;

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("`{command}` is not available on {route}")]
    Unavailable { command: &'static str, route: String },
    #[error("no employee with id {0} in the list")]
    NoSuchRow(EmployeeId),
    #[error("please fix the highlighted fields")]
    Invalid,
    #[error("still waiting for the server")]
    Busy,
    #[error("could not prepare request: {0}")]
    Request(String),
}

/// The view mounted for the current route.
#[derive(Debug)]
pub enum Screen {
    List(ListView),
    Detail(DetailView),
    Form(FormView),
    NotFound(String),
}

pub struct Shell<T> {
    client: EmployeeClient,
    transport: T,
    history: History,
    screen: Screen,
}

impl<T: Transport> Shell<T> {
    /// Build a shell and mount the view for `start`.
    pub fn start(client: EmployeeClient, transport: T, start: &str) -> Self {
        let route = Route::parse(start);
        let mut shell = Self {
            client,
            transport,
            history: History::new(route.clone()),
            screen: Screen::NotFound(String::new()),
        };
        shell.mount(route);
        shell
    }

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Open `path`, recording it in history.
    pub fn navigate(&mut self, path: &str) {
        self.follow(Navigation::To(Route::parse(path)));
    }

    /// Step back in history; the detail card's own back link when one is shown.
    pub fn back(&mut self) {
        let next = match &self.screen {
            Screen::Detail(view) => view.back(),
            _ => Navigation::Back,
        };
        self.follow(next);
    }

    /// Fetch the current view again.
    pub fn reload(&mut self) {
        let route = self.route().clone();
        self.mount(route);
    }

    /// Delete a row from the list, asking `confirm` first.
    pub fn delete(&mut self, id: EmployeeId, confirm: &mut dyn Confirm) -> Result<(), ShellError> {
        let Screen::List(view) = &mut self.screen else {
            return Err(self.unavailable("delete"));
        };
        if !view.employees().iter().any(|e| e.id == id) {
            return Err(ShellError::NoSuchRow(id));
        }
        let prompt = |e: &employee_core::Employee| {
            confirm.confirm(&format!("Delete this employee? ({}, id {})", e.full_name(), e.id))
        };
        if let Some(pending) = view.request_delete(&self.client, id, prompt) {
            let exchange = self.transport.execute(&pending.request);
            view.finish_delete(&self.client, pending.token, exchange);
        }
        Ok(())
    }

    /// Follow the edit link of the detail card.
    pub fn edit(&mut self) -> Result<(), ShellError> {
        let Screen::Detail(view) = &self.screen else {
            return Err(self.unavailable("edit"));
        };
        let Some(next) = view.edit() else {
            return Err(self.unavailable("edit"));
        };
        self.follow(next);
        Ok(())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), ShellError> {
        let Screen::Form(form) = &mut self.screen else {
            return Err(self.unavailable("set"));
        };
        form.set_field(field, value);
        Ok(())
    }

    /// Validate and save the form; on success return to the list.
    pub fn submit(&mut self) -> Result<(), ShellError> {
        let Screen::Form(form) = &mut self.screen else {
            return Err(self.unavailable("submit"));
        };
        let pending = form.submit(&self.client).map_err(|blocked| match blocked {
            SubmitBlocked::Invalid => ShellError::Invalid,
            SubmitBlocked::Busy => ShellError::Busy,
            SubmitBlocked::Encoding(err) => ShellError::Request(err.to_string()),
        })?;
        let exchange = self.transport.execute(&pending.request);
        let outcome = form.finish_submit(&self.client, pending.token, exchange);
        if let FormOutcome::Saved(employee) = &outcome {
            tracing::info!(id = %employee.id, "saved employee");
        }
        if let Some(next) = outcome.navigation() {
            self.follow(next);
        }
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), ShellError> {
        let Screen::Form(form) = &mut self.screen else {
            return Err(self.unavailable("cancel"));
        };
        let next = form.cancel();
        self.follow(next);
        Ok(())
    }

    /// Run one parsed command. `Help` and `Quit` belong to the REPL and are
    /// ignored here.
    pub fn apply(&mut self, command: Command, confirm: &mut dyn Confirm) -> Result<(), ShellError> {
        match command {
            Command::Go(path) => self.navigate(&path),
            Command::Reload => self.reload(),
            Command::Delete(id) => self.delete(id, confirm)?,
            Command::Edit => self.edit()?,
            Command::Set(field, value) => self.set_field(field, value)?,
            Command::Submit => self.submit()?,
            Command::Cancel => self.cancel()?,
            Command::Back => self.back(),
            Command::Help | Command::Quit => {}
        }
        Ok(())
    }

    /// Navigation bar followed by the mounted view.
    pub fn render(&self) -> String {
        let body = match &self.screen {
            Screen::List(view) => render::render_list(view),
            Screen::Detail(view) => render::render_detail(view),
            Screen::Form(view) => render::render_form(view),
            Screen::NotFound(path) => render::render_not_found(path),
        };
        format!("{}\n\n{body}", render::nav_bar(self.route()))
    }

    fn follow(&mut self, navigation: Navigation) {
        let route = match navigation {
            Navigation::To(route) => {
                self.history.push(route.clone());
                route
            }
            Navigation::Back => self.history.back().clone(),
        };
        self.mount(route);
    }

    fn mount(&mut self, route: Route) {
        tracing::info!(route = %route, "mounting view");
        match &mut self.screen {
            Screen::List(view) => view.unmount(),
            Screen::Detail(view) => view.unmount(),
            Screen::Form(view) => view.unmount(),
            Screen::NotFound(_) => {}
        }

        self.screen = match route {
            Route::List => {
                let mut view = ListView::new();
                let pending = view.load(&self.client);
                let exchange = self.run(&pending);
                view.finish_load(&self.client, pending.token, exchange);
                Screen::List(view)
            }
            Route::View(id) => {
                let mut view = DetailView::new(id);
                let pending = view.mount(&self.client);
                let exchange = self.run(&pending);
                view.finish_load(&self.client, pending.token, exchange);
                Screen::Detail(view)
            }
            Route::Add => Screen::Form(FormView::add()),
            Route::Edit(id) => {
                let mut view = FormView::edit(id);
                if let Some(pending) = view.mount(&self.client) {
                    let exchange = self.run(&pending);
                    view.finish_load(&self.client, pending.token, exchange);
                }
                Screen::Form(view)
            }
            Route::NotFound(path) => {
                tracing::warn!(%path, "no route matches");
                Screen::NotFound(path)
            }
        };
    }

    fn run(&self, pending: &PendingRequest) -> employee_core::Exchange {
        self.transport.execute(&pending.request)
    }

    fn unavailable(&self, command: &'static str) -> ShellError {
        ShellError::Unavailable {
            command,
            route: self.route().path(),
        }
    }
}
