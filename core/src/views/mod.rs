//! Per-route view state machines.
//!
//! # Design
//! Each view owns its fetched data and its loading/error state; nothing is
//! shared between views. A view never performs I/O itself. Starting a call
//! hands back a `PendingRequest`; the host executes it and feeds the result to
//! the matching `finish_*` method together with the request's token.
//!
//! Tokens close the stale-response hole: a view tracks only its most recent
//! request, and `unmount` forgets even that. A response carrying any other
//! token is dropped instead of overwriting state it no longer belongs to.

mod detail;
mod form;
mod list;

pub use detail::{DetailState, DetailView};
pub use form::{FormMode, FormOutcome, FormPhase, FormView, SubmitBlocked};
pub use list::{ListRow, ListState, ListView};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// What the host hands back after executing a `PendingRequest`.
pub type Exchange = Result<HttpResponse, ApiError>;

/// Identifies one request issued by one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// A request the host must execute, tagged with the token to finish it with.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub request: HttpRequest,
}

/// Issues tokens and remembers which one is still wanted.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    current: Option<RequestToken>,
}

impl RequestTracker {
    /// Issue a fresh token, superseding any outstanding one.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.current = Some(token);
        token
    }

    /// Consume `token` if it is the outstanding one.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if self.current == Some(token) {
            self.current = None;
            true
        } else {
            tracing::debug!(token = token.0, "dropping stale response");
            false
        }
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_token_supersedes_older() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(!tracker.accept(first));
        assert!(tracker.accept(second));
    }

    #[test]
    fn token_is_accepted_once() {
        let mut tracker = RequestTracker::default();
        let token = tracker.issue();
        assert!(tracker.accept(token));
        assert!(!tracker.accept(token));
    }

    #[test]
    fn cancel_invalidates_outstanding_token() {
        let mut tracker = RequestTracker::default();
        let token = tracker.issue();
        tracker.cancel();
        assert!(!tracker.accept(token));
    }
}
