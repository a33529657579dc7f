//! Path routing and navigation history.
//!
//! Four paths map to views: `/`, `/add`, `/edit/{id}` and `/view/{id}`.
//! Everything else, including an edit/view path whose id is not numeric,
//! resolves to `Route::NotFound` so the shell can render an explicit page.

use std::fmt;

use crate::types::EmployeeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Add,
    Edit(EmployeeId),
    View(EmployeeId),
    NotFound(String),
}

impl Route {
    /// Resolve a user-facing path. Query strings, fragments and a trailing
    /// slash are ignored.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let bare = trimmed
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = bare.split('/').skip(1).collect();

        if !trimmed.is_empty() && !trimmed.starts_with('/') {
            return Route::NotFound(trimmed.to_string());
        }
        match segments.as_slice() {
            [] => Route::List,
            ["add"] => Route::Add,
            ["edit", id] => id
                .parse()
                .map(Route::Edit)
                .unwrap_or_else(|_| Route::NotFound(trimmed.to_string())),
            ["view", id] => id
                .parse()
                .map(Route::View)
                .unwrap_or_else(|_| Route::NotFound(trimmed.to_string())),
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Add => "/add".to_string(),
            Route::Edit(id) => format!("/edit/{id}"),
            Route::View(id) => format!("/view/{id}"),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a view wants the shell to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(Route),
    Back,
}

/// Back stack of visited routes. Never empty.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
        }
    }

    pub fn current(&self) -> &Route {
        // `entries` always holds at least the starting route.
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
    }

    /// Step back one entry. From the first entry, falls back to the list.
    pub fn back(&mut self) -> &Route {
        if self.entries.len() > 1 {
            self.entries.pop();
        } else {
            self.entries[0] = Route::List;
        }
        self.current()
    }

}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::List)
    }
}
