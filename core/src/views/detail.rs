use crate::client::EmployeeClient;
use crate::router::{Navigation, Route};
use crate::types::{Employee, EmployeeId};

use super::{Exchange, PendingRequest, RequestToken, RequestTracker};

pub const NOT_FOUND: &str = "Employee not found";
pub const LOAD_FAILED: &str = "Failed to load employee.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    NotFound,
    Failed,
    Loaded(Employee),
}

/// Read-only card at `/view/{id}`.
#[derive(Debug)]
pub struct DetailView {
    id: EmployeeId,
    state: DetailState,
    tracker: RequestTracker,
}

impl DetailView {
    pub fn new(id: EmployeeId) -> Self {
        Self {
            id,
            state: DetailState::Loading,
            tracker: RequestTracker::default(),
        }
    }

    pub fn mount(&mut self, client: &EmployeeClient) -> PendingRequest {
        self.state = DetailState::Loading;
        PendingRequest {
            token: self.tracker.issue(),
            request: client.build_get(self.id),
        }
    }

    pub fn finish_load(&mut self, client: &EmployeeClient, token: RequestToken, exchange: Exchange) {
        if !self.tracker.accept(token) {
            return;
        }
        self.state = match exchange.and_then(|response| client.parse_get(response)) {
            Ok(employee) => DetailState::Loaded(employee),
            Err(err) if err.is_not_found() => DetailState::NotFound,
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "failed to load employee");
                DetailState::Failed
            }
        };
    }

    pub fn unmount(&mut self) {
        self.tracker.cancel();
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// User-visible message for the terminal error states.
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            DetailState::NotFound => Some(NOT_FOUND),
            DetailState::Failed => Some(LOAD_FAILED),
            _ => None,
        }
    }

    /// The edit link, available once the record is on screen.
    pub fn edit(&self) -> Option<Navigation> {
        match &self.state {
            DetailState::Loaded(employee) => Some(Navigation::To(Route::Edit(employee.id))),
            _ => None,
        }
    }

    pub fn back(&self) -> Navigation {
        Navigation::Back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::http::HttpResponse;

    const JANE: &str = r#"{"id":3,"firstName":"Jane","lastName":"Doe","email":"jane@x.com","department":"Eng","salary":50000,"dateOfJoining":"2023-01-10"}"#;

    fn client() -> EmployeeClient {
        EmployeeClient::new("http://localhost:8080/api/employees")
    }

    #[test]
    fn loads_record_by_route_id() {
        let c = client();
        let mut view = DetailView::new(EmployeeId(3));
        let pending = view.mount(&c);
        assert_eq!(pending.request.url, "http://localhost:8080/api/employees/3");
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(200, JANE)));
        let DetailState::Loaded(employee) = view.state() else {
            panic!("expected loaded, got {:?}", view.state());
        };
        assert_eq!(employee.first_name, "Jane");
        assert_eq!(view.edit(), Some(Navigation::To(Route::Edit(EmployeeId(3)))));
        assert_eq!(view.message(), None);
    }

    #[test]
    fn missing_record_is_not_found() {
        let c = client();
        let mut view = DetailView::new(EmployeeId(9));
        let pending = view.mount(&c);
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(404, "")));
        assert_eq!(view.state(), &DetailState::NotFound);
        assert_eq!(view.message(), Some(NOT_FOUND));
        assert_eq!(view.edit(), None);
    }

    #[test]
    fn transport_failure_is_distinct_from_not_found() {
        let c = client();
        let mut view = DetailView::new(EmployeeId(9));
        let pending = view.mount(&c);
        view.finish_load(&c, pending.token, Err(ApiError::Network("down".to_string())));
        assert_eq!(view.state(), &DetailState::Failed);
        assert_eq!(view.message(), Some(LOAD_FAILED));
    }

    #[test]
    fn response_after_unmount_is_ignored() {
        let c = client();
        let mut view = DetailView::new(EmployeeId(3));
        let pending = view.mount(&c);
        view.unmount();
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(200, JANE)));
        assert_eq!(view.state(), &DetailState::Loading);
    }
}
