//! Terminal front-end for the employee manager.
//!
//! # Overview
//! Hosts the I/O-free `employee_core`: executes the requests its views hand
//! out over HTTP and drives them from line-based commands. The shell shows a
//! navigation bar and the view mounted for the current path (`/`, `/add`,
//! `/edit/{id}`, `/view/{id}`).

pub mod command;
pub mod shell;
pub mod transport;

pub use command::{Command, CommandError, HELP};
pub use shell::{Confirm, Screen, Shell, ShellError};
pub use transport::{Transport, UreqTransport};
