use crate::client::EmployeeClient;
use crate::types::{Employee, EmployeeId};

use super::{Exchange, PendingRequest, RequestToken, RequestTracker};

pub const LOAD_FAILED: &str = "Failed to load employees. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete employee.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded,
    Failed,
}

/// One table row: the 1-based display index and its employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRow<'a> {
    pub index: usize,
    pub employee: &'a Employee,
}

/// The employee table at `/`.
///
/// Rows stay in server order. A confirmed delete removes the row locally once
/// the backend acknowledges it; the list is not re-fetched.
#[derive(Debug)]
pub struct ListView {
    state: ListState,
    employees: Vec<Employee>,
    error: Option<String>,
    tracker: RequestTracker,
    deleting: Option<EmployeeId>,
}

impl ListView {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
            employees: Vec::new(),
            error: None,
            tracker: RequestTracker::default(),
            deleting: None,
        }
    }

    /// Start (or restart) fetching the whole list.
    pub fn load(&mut self, client: &EmployeeClient) -> PendingRequest {
        self.state = ListState::Loading;
        self.deleting = None;
        PendingRequest {
            token: self.tracker.issue(),
            request: client.build_list(),
        }
    }

    pub fn finish_load(&mut self, client: &EmployeeClient, token: RequestToken, exchange: Exchange) {
        if self.deleting.is_some() || !self.tracker.accept(token) {
            return;
        }
        match exchange.and_then(|response| client.parse_list(response)) {
            Ok(employees) => {
                tracing::debug!(count = employees.len(), "employee list loaded");
                self.employees = employees;
                self.error = None;
                self.state = ListState::Loaded;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load employees");
                self.employees.clear();
                self.error = Some(LOAD_FAILED.to_string());
                self.state = ListState::Failed;
            }
        }
    }

    /// Ask to delete `id`. `confirm` is consulted first; the remove call is
    /// only issued when it answers yes and the employee is on screen.
    pub fn request_delete(
        &mut self,
        client: &EmployeeClient,
        id: EmployeeId,
        confirm: impl FnOnce(&Employee) -> bool,
    ) -> Option<PendingRequest> {
        if self.state != ListState::Loaded {
            return None;
        }
        let employee = self.employees.iter().find(|e| e.id == id)?;
        if !confirm(employee) {
            tracing::debug!(%id, "delete not confirmed");
            return None;
        }
        self.deleting = Some(id);
        Some(PendingRequest {
            token: self.tracker.issue(),
            request: client.build_remove(id),
        })
    }

    pub fn finish_delete(&mut self, client: &EmployeeClient, token: RequestToken, exchange: Exchange) {
        let Some(id) = self.deleting else {
            return;
        };
        if !self.tracker.accept(token) {
            return;
        }
        self.deleting = None;
        match exchange.and_then(|response| client.parse_remove(response)) {
            Ok(()) => {
                tracing::info!(%id, "employee deleted");
                self.employees.retain(|e| e.id != id);
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "failed to delete employee");
                self.error = Some(DELETE_FAILED.to_string());
            }
        }
    }

    pub fn unmount(&mut self) {
        self.tracker.cancel();
        self.deleting = None;
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn rows(&self) -> Vec<ListRow<'_>> {
        self.employees
            .iter()
            .enumerate()
            .map(|(i, employee)| ListRow {
                index: i + 1,
                employee,
            })
            .collect()
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::http::HttpResponse;

    fn client() -> EmployeeClient {
        EmployeeClient::new("http://localhost:8080/api/employees")
    }

    fn body(ids: &[i64]) -> String {
        let items: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id":{id},"firstName":"F{id}","lastName":"L{id}","email":"e{id}@x.com","department":"D","salary":100,"dateOfJoining":"2024-02-01"}}"#
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    fn loaded(ids: &[i64]) -> ListView {
        let c = client();
        let mut view = ListView::new();
        let pending = view.load(&c);
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(200, body(ids))));
        view
    }

    fn ids(view: &ListView) -> Vec<i64> {
        view.employees().iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn starts_loading_and_loads_in_server_order() {
        let c = client();
        let mut view = ListView::new();
        assert_eq!(view.state(), ListState::Loading);
        let pending = view.load(&c);
        assert_eq!(pending.request.url, "http://localhost:8080/api/employees");
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(200, body(&[5, 2, 9]))));
        assert_eq!(view.state(), ListState::Loaded);
        assert_eq!(ids(&view), vec![5, 2, 9]);
        let indices: Vec<usize> = view.rows().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn load_failure_shows_message_and_empties_list() {
        let c = client();
        let mut view = loaded(&[1]);
        let pending = view.load(&c);
        view.finish_load(&c, pending.token, Err(ApiError::Network("refused".to_string())));
        assert_eq!(view.state(), ListState::Failed);
        assert_eq!(view.error(), Some(LOAD_FAILED));
        assert!(view.rows().is_empty());
    }

    #[test]
    fn reload_clears_previous_error() {
        let c = client();
        let mut view = ListView::new();
        let pending = view.load(&c);
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(500, "")));
        assert_eq!(view.error(), Some(LOAD_FAILED));
        let pending = view.load(&c);
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(200, body(&[1]))));
        assert_eq!(view.error(), None);
        assert_eq!(view.state(), ListState::Loaded);
    }

    #[test]
    fn delete_removes_exactly_that_row_and_renumbers() {
        let c = client();
        let mut view = loaded(&[4, 7, 9]);
        let pending = view.request_delete(&c, EmployeeId(7), |_| true).unwrap();
        assert_eq!(pending.request.url, "http://localhost:8080/api/employees/7");
        view.finish_delete(&c, pending.token, Ok(HttpResponse::new(204, "")));
        assert_eq!(ids(&view), vec![4, 9]);
        let rows: Vec<(usize, i64)> = view.rows().iter().map(|r| (r.index, r.employee.id.0)).collect();
        assert_eq!(rows, vec![(1, 4), (2, 9)]);
        assert_eq!(view.state(), ListState::Loaded);
    }

    #[test]
    fn unconfirmed_delete_issues_no_request() {
        let c = client();
        let mut view = loaded(&[1, 2]);
        let mut asked = None;
        let pending = view.request_delete(&c, EmployeeId(2), |e| {
            asked = Some(e.id);
            false
        });
        assert!(pending.is_none());
        assert_eq!(asked, Some(EmployeeId(2)));
        assert_eq!(ids(&view), vec![1, 2]);
    }

    #[test]
    fn delete_of_unknown_row_is_ignored() {
        let c = client();
        let mut view = loaded(&[1]);
        assert!(view.request_delete(&c, EmployeeId(3), |_| true).is_none());
    }

    #[test]
    fn failed_delete_keeps_rows_and_reports() {
        let c = client();
        let mut view = loaded(&[1, 2]);
        let pending = view.request_delete(&c, EmployeeId(1), |_| true).unwrap();
        view.finish_delete(&c, pending.token, Ok(HttpResponse::new(404, "")));
        assert_eq!(ids(&view), vec![1, 2]);
        assert_eq!(view.error(), Some(DELETE_FAILED));
    }

    #[test]
    fn stale_load_after_unmount_is_dropped() {
        let c = client();
        let mut view = ListView::new();
        let pending = view.load(&c);
        view.unmount();
        view.finish_load(&c, pending.token, Ok(HttpResponse::new(200, body(&[1]))));
        assert_eq!(view.state(), ListState::Loading);
        assert!(view.employees().is_empty());
    }

    #[test]
    fn superseded_load_is_dropped() {
        let c = client();
        let mut view = ListView::new();
        let first = view.load(&c);
        let second = view.load(&c);
        view.finish_load(&c, first.token, Ok(HttpResponse::new(200, body(&[1]))));
        assert_eq!(view.state(), ListState::Loading);
        view.finish_load(&c, second.token, Ok(HttpResponse::new(200, body(&[2, 3]))));
        assert_eq!(ids(&view), vec![2, 3]);
    }
}
