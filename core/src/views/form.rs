//! Shared add/edit form.
//!
//! Validation always runs before a request is built, so an invalid draft never
//! reaches the network. A failed save keeps every typed value in place.

use crate::client::EmployeeClient;
use crate::error::ApiError;
use crate::router::{Navigation, Route};
use crate::types::{Employee, EmployeeId};
use crate::validation::{validate, EmployeeDraft, Field, FieldErrors};

use super::{Exchange, PendingRequest, RequestToken, RequestTracker};

pub const LOAD_FAILED: &str = "Unable to load employee.";
pub const SAVE_FAILED: &str = "Failed to save employee";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(EmployeeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Edit mode only: waiting for the existing record.
    Loading,
    Editing,
    Submitting,
}

/// Why `submit` did not produce a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// One or more fields failed validation; see `FormView::errors`.
    Invalid,
    /// A load or save is still in flight.
    Busy,
    /// The payload could not be encoded.
    Encoding(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Saved(Employee),
    Failed,
    /// The response belonged to a request this form no longer waits for.
    Stale,
}

impl FormOutcome {
    /// Where to go after a save: the list on success, nowhere otherwise.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            FormOutcome::Saved(_) => Some(Navigation::To(Route::List)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct FormView {
    mode: FormMode,
    phase: FormPhase,
    draft: EmployeeDraft,
    errors: FieldErrors,
    submit_error: Option<String>,
    tracker: RequestTracker,
}

impl FormView {
    pub fn add() -> Self {
        Self::with_mode(FormMode::Add)
    }

    pub fn edit(id: EmployeeId) -> Self {
        Self::with_mode(FormMode::Edit(id))
    }

    fn with_mode(mode: FormMode) -> Self {
        let phase = match mode {
            FormMode::Add => FormPhase::Editing,
            FormMode::Edit(_) => FormPhase::Loading,
        };
        Self {
            mode,
            phase,
            draft: EmployeeDraft::default(),
            errors: FieldErrors::default(),
            submit_error: None,
            tracker: RequestTracker::default(),
        }
    }

    /// In edit mode, start fetching the record to pre-fill. Add mode needs
    /// nothing.
    pub fn mount(&mut self, client: &EmployeeClient) -> Option<PendingRequest> {
        let FormMode::Edit(id) = self.mode else {
            return None;
        };
        self.phase = FormPhase::Loading;
        Some(PendingRequest {
            token: self.tracker.issue(),
            request: client.build_get(id),
        })
    }

    pub fn finish_load(&mut self, client: &EmployeeClient, token: RequestToken, exchange: Exchange) {
        if self.phase != FormPhase::Loading || !self.tracker.accept(token) {
            return;
        }
        match exchange.and_then(|response| client.parse_get(response)) {
            Ok(employee) => self.draft = EmployeeDraft::from(&employee),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load employee for editing");
                self.submit_error = Some(LOAD_FAILED.to_string());
            }
        }
        self.phase = FormPhase::Editing;
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Validate and, when the draft is clean, build the create or update call.
    pub fn submit(&mut self, client: &EmployeeClient) -> Result<PendingRequest, SubmitBlocked> {
        if self.phase != FormPhase::Editing {
            return Err(SubmitBlocked::Busy);
        }
        let input = match validate(&self.draft) {
            Ok(input) => {
                self.errors = FieldErrors::default();
                input
            }
            Err(errors) => {
                tracing::debug!(invalid = errors.len(), "form validation failed");
                self.errors = errors;
                return Err(SubmitBlocked::Invalid);
            }
        };
        let request = match self.mode {
            FormMode::Add => client.build_create(&input),
            FormMode::Edit(id) => client.build_update(id, &input),
        }
        .map_err(|err| {
            self.submit_error = Some(SAVE_FAILED.to_string());
            SubmitBlocked::Encoding(err)
        })?;

        self.phase = FormPhase::Submitting;
        Ok(PendingRequest {
            token: self.tracker.issue(),
            request,
        })
    }

    pub fn finish_submit(&mut self, client: &EmployeeClient, token: RequestToken, exchange: Exchange) -> FormOutcome {
        if self.phase != FormPhase::Submitting || !self.tracker.accept(token) {
            return FormOutcome::Stale;
        }
        self.phase = FormPhase::Editing;
        let saved = exchange.and_then(|response| match self.mode {
            FormMode::Add => client.parse_create(response),
            FormMode::Edit(_) => client.parse_update(response),
        });
        match saved {
            Ok(employee) => {
                tracing::info!(id = %employee.id, "employee saved");
                self.submit_error = None;
                FormOutcome::Saved(employee)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save employee");
                let message = err.server_message().unwrap_or(SAVE_FAILED);
                self.submit_error = Some(message.to_string());
                FormOutcome::Failed
            }
        }
    }

    /// Leave without saving.
    pub fn cancel(&mut self) -> Navigation {
        self.unmount();
        Navigation::Back
    }

    pub fn unmount(&mut self) {
        self.tracker.cancel();
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Employee",
            FormMode::Edit(_) => "Update Employee",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Create",
            FormMode::Edit(_) => "Update",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};

    const JANE: &str = r#"{"id":3,"firstName":"Jane","lastName":"Doe","email":"jane@x.com","department":"Eng","salary":50000,"dateOfJoining":"2023-01-10"}"#;

    fn client() -> EmployeeClient {
        EmployeeClient::new("http://localhost:8080/api/employees")
    }

    fn fill(form: &mut FormView) {
        form.set_field(Field::FirstName, "Jane");
        form.set_field(Field::LastName, "Doe");
        form.set_field(Field::Email, "jane@x.com");
        form.set_field(Field::Department, "Eng");
        form.set_field(Field::Salary, "50000");
        form.set_field(Field::DateOfJoining, "2023-01-10");
    }

    #[test]
    fn add_mode_starts_empty_and_ready() {
        let mut form = FormView::add();
        assert!(form.mount(&client()).is_none());
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.draft(), &EmployeeDraft::default());
        assert_eq!(form.title(), "Add Employee");
        assert_eq!(form.submit_label(), "Create");
    }

    #[test]
    fn invalid_draft_blocks_without_request() {
        let mut form = FormView::add();
        fill(&mut form);
        form.set_field(Field::Salary, "-5");
        assert_eq!(form.submit(&client()).unwrap_err(), SubmitBlocked::Invalid);
        assert_eq!(form.errors().get(Field::Salary), Some("Salary must be zero or more"));
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn blocked_submit_for_each_empty_required_field() {
        for field in [Field::FirstName, Field::LastName, Field::Department, Field::DateOfJoining] {
            let mut form = FormView::add();
            fill(&mut form);
            form.set_field(field, "");
            assert_eq!(form.submit(&client()).unwrap_err(), SubmitBlocked::Invalid, "{field}");
            assert!(form.errors().get(field).is_some());
        }
    }

    #[test]
    fn add_submits_create_and_navigates_to_list() {
        let c = client();
        let mut form = FormView::add();
        fill(&mut form);
        let pending = form.submit(&c).unwrap();
        assert_eq!(pending.request.method, HttpMethod::Post);
        assert_eq!(form.phase(), FormPhase::Submitting);
        let outcome = form.finish_submit(&c, pending.token, Ok(HttpResponse::new(201, JANE)));
        assert_eq!(outcome.navigation(), Some(Navigation::To(Route::List)));
        assert!(matches!(outcome, FormOutcome::Saved(ref e) if e.id == EmployeeId(3)));
    }

    #[test]
    fn edit_prefills_and_submits_update() {
        let c = client();
        let mut form = FormView::edit(EmployeeId(3));
        assert_eq!(form.phase(), FormPhase::Loading);
        let pending = form.mount(&c).unwrap();
        assert_eq!(form.submit(&c).unwrap_err(), SubmitBlocked::Busy);
        form.finish_load(&c, pending.token, Ok(HttpResponse::new(200, JANE)));
        assert_eq!(form.draft().first_name, "Jane");
        assert_eq!(form.draft().salary, "50000");
        assert_eq!(form.draft().date_of_joining, "2023-01-10");

        form.set_field(Field::Department, "Research");
        let pending = form.submit(&c).unwrap();
        assert_eq!(pending.request.method, HttpMethod::Put);
        assert_eq!(pending.request.url, "http://localhost:8080/api/employees/3");
        let body: serde_json::Value = serde_json::from_str(pending.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["department"], "Research");
    }

    #[test]
    fn edit_load_failure_leaves_empty_form_with_message() {
        let c = client();
        let mut form = FormView::edit(EmployeeId(3));
        let pending = form.mount(&c).unwrap();
        form.finish_load(&c, pending.token, Ok(HttpResponse::new(404, "")));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.submit_error(), Some(LOAD_FAILED));
        assert_eq!(form.draft(), &EmployeeDraft::default());
    }

    #[test]
    fn server_message_is_shown_and_values_kept() {
        let c = client();
        let mut form = FormView::add();
        fill(&mut form);
        let pending = form.submit(&c).unwrap();
        let response = HttpResponse::new(400, r#"{"message":"Email already exists"}"#);
        let outcome = form.finish_submit(&c, pending.token, Ok(response));
        assert_eq!(outcome, FormOutcome::Failed);
        assert_eq!(outcome.navigation(), None);
        assert_eq!(form.submit_error(), Some("Email already exists"));
        assert_eq!(form.draft().email, "jane@x.com");
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn generic_message_without_server_message() {
        let c = client();
        let mut form = FormView::add();
        fill(&mut form);
        let pending = form.submit(&c).unwrap();
        form.finish_submit(&c, pending.token, Err(ApiError::Network("refused".to_string())));
        assert_eq!(form.submit_error(), Some(SAVE_FAILED));
    }

    #[test]
    fn cancel_navigates_back_and_drops_pending_save() {
        let c = client();
        let mut form = FormView::add();
        fill(&mut form);
        let pending = form.submit(&c).unwrap();
        assert_eq!(form.cancel(), Navigation::Back);
        let outcome = form.finish_submit(&c, pending.token, Ok(HttpResponse::new(201, JANE)));
        assert_eq!(outcome, FormOutcome::Stale);
    }
}
