//! I/O-free core of the employee manager.
//!
//! # Overview
//! Everything needed to list, view, create, edit and delete employees against
//! the REST backend, minus the network itself. The host executes the HTTP
//! round-trips, which keeps this crate deterministic and testable.
//!
//! # Design
//! - `EmployeeClient` is stateless; it holds only the base URL. Each call is
//!   split into `build_*` (produces an `HttpRequest`) and `parse_*`
//!   (consumes an `HttpResponse`).
//! - Views (`ListView`, `DetailView`, `FormView`) own their state and hand out
//!   `PendingRequest`s tagged with a token, so late responses for an
//!   abandoned request are dropped rather than applied.
//! - `Route` maps user-facing paths to views; unknown paths get an explicit
//!   not-found page.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod render;
pub mod router;
pub mod types;
pub mod validation;
pub mod views;

pub use client::EmployeeClient;
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use router::{History, Navigation, Route};
pub use types::{Employee, EmployeeId, EmployeeInput};
pub use validation::{validate, EmployeeDraft, Field, FieldErrors};
pub use views::{
    DetailState, DetailView, Exchange, FormMode, FormOutcome, FormPhase, FormView, ListState, ListView,
    PendingRequest, RequestToken, SubmitBlocked,
};
