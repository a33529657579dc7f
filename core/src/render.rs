//! Plain-text rendering of the shell and its views.
//!
//! Output is line-oriented so it reads well in a terminal and is easy to
//! assert on. View-level errors are rendered as alert lines prefixed `[!]`;
//! field errors sit indented under their input.

use std::fmt::Write;

use crate::format::format_salary;
use crate::router::Route;
use crate::validation::Field;
use crate::views::{DetailState, DetailView, FormPhase, FormView, ListState, ListView};

pub const BRAND: &str = "Employee Manager";
pub const LOADING: &str = "Loading...";
pub const EMPTY_LIST: &str = "No employees yet. Start by adding one.";

pub const LIST_HEADERS: [&str; 8] = [
    "#",
    "First Name",
    "Last Name",
    "Email",
    "Department",
    "Salary",
    "Date Of Joining",
    "Actions",
];

/// A header row plus one row per record, rendered with aligned columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect();
            padded.join(" | ").trim_end().to_string()
        };

        let mut out = line(&self.header);
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

fn alert(message: &str) -> String {
    format!("[!] {message}")
}

/// Navigation bar shown above every view.
pub fn nav_bar(current: &Route) -> String {
    let mark = |route: &Route| if route == current { "*" } else { " " };
    format!(
        "{BRAND}   {}Employees (/)  {}Add Employee (/add)",
        mark(&Route::List),
        mark(&Route::Add)
    )
}

pub fn list_table(view: &ListView) -> Table {
    let rows = view
        .rows()
        .into_iter()
        .map(|row| {
            let e = row.employee;
            vec![
                row.index.to_string(),
                e.first_name.clone(),
                e.last_name.clone(),
                e.email.clone(),
                e.department.clone(),
                format_salary(e.salary),
                e.date_of_joining.map(|d| d.to_string()).unwrap_or_default(),
                format!("/view/{id} /edit/{id} delete {id}", id = e.id),
            ]
        })
        .collect();
    Table {
        header: LIST_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

pub fn render_list(view: &ListView) -> String {
    if view.state() == ListState::Loading {
        return LOADING.to_string();
    }
    let mut out = String::from("Employees\nManage your workforce records   [Add Employee: /add]\n");
    if let Some(error) = view.error() {
        let _ = writeln!(out, "{}", alert(error));
    }
    if view.employees().is_empty() {
        out.push_str(EMPTY_LIST);
    } else {
        out.push_str(&list_table(view).render());
    }
    out
}

pub fn render_detail(view: &DetailView) -> String {
    match view.state() {
        DetailState::Loading => LOADING.to_string(),
        DetailState::NotFound | DetailState::Failed => alert(view.message().unwrap_or_default()),
        DetailState::Loaded(e) => {
            let mut out = String::new();
            let _ = writeln!(out, "{}   [Edit: /edit/{}]", e.full_name(), e.id);
            let _ = writeln!(out, "  Email: {}", e.email);
            let _ = writeln!(out, "  Department: {}", e.department);
            let _ = writeln!(out, "  Salary: {}", format_salary(e.salary));
            let _ = writeln!(
                out,
                "  Date Of Joining: {}",
                e.date_of_joining.map(|d| d.to_string()).unwrap_or_default()
            );
            out.push_str("[Back: back]");
            out
        }
    }
}

pub fn render_form(view: &FormView) -> String {
    if view.phase() == FormPhase::Loading {
        return LOADING.to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title());
    if let Some(error) = view.submit_error() {
        let _ = writeln!(out, "{}", alert(error));
    }
    for field in Field::ALL {
        let _ = writeln!(out, "  {} ({}): {}", field.label(), field.name(), view.draft().get(field));
        if let Some(message) = view.errors().get(field) {
            let _ = writeln!(out, "      ! {message}");
        }
    }
    if view.phase() == FormPhase::Submitting {
        let _ = writeln!(out, "{LOADING}");
    }
    let _ = write!(out, "[Cancel: cancel]  [{}: submit]", view.submit_label());
    out
}

/// Explicit page for paths no route matches.
pub fn render_not_found(path: &str) -> String {
    alert(&format!("Page not found: {path}"))
}
