use std::{
    collections::BTreeMap,
    sync::{Arc, LazyLock},
};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const BASE_PATH: &str = "/api/employees";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub salary: Option<Decimal>,
    pub date_of_joining: Option<NaiveDate>,
}

/// Error body returned for every rejected request.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(id: i64) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Employee not found with id {id}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, message = %self.message, "request rejected");
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    employees: BTreeMap<i64, Employee>,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.employees
            .values()
            .any(|e| Some(e.id) != except && e.email.eq_ignore_ascii_case(email))
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(BASE_PATH, get(list_employees).post(create_employee))
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Same pattern the form checks emails against.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Field checks mirroring the form's rules; the first failure wins.
fn validate(payload: EmployeePayload) -> Result<(EmployeePayload, Decimal, NaiveDate), ApiError> {
    let blank = |s: &str| s.trim().is_empty();
    if blank(&payload.first_name) {
        return Err(ApiError::bad_request("First name is required"));
    }
    if blank(&payload.last_name) {
        return Err(ApiError::bad_request("Last name is required"));
    }
    if blank(&payload.email) {
        return Err(ApiError::bad_request("Email is required"));
    }
    if !EMAIL_PATTERN.is_match(&payload.email) {
        return Err(ApiError::bad_request("Provide a valid email"));
    }
    if blank(&payload.department) {
        return Err(ApiError::bad_request("Department is required"));
    }
    let salary = payload
        .salary
        .filter(|s| !s.is_sign_negative() || s.is_zero())
        .ok_or_else(|| ApiError::bad_request("Salary must be zero or more"))?;
    let date_of_joining = payload
        .date_of_joining
        .ok_or_else(|| ApiError::bad_request("Date of joining is required"))?;
    Ok((payload, salary, date_of_joining))
}

async fn list_employees(State(db): State<Db>) -> Json<Vec<Employee>> {
    let store = db.read().await;
    Json(store.employees.values().cloned().collect())
}

async fn create_employee(
    State(db): State<Db>,
    Json(input): Json<EmployeePayload>,
) -> Result<Response, ApiError> {
    let (input, salary, date_of_joining) = validate(input)?;
    let mut store = db.write().await;
    if store.email_taken(&input.email, None) {
        return Err(ApiError::bad_request("Email already exists"));
    }
    store.next_id += 1;
    let employee = Employee {
        id: store.next_id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        department: input.department,
        salary,
        date_of_joining,
    };
    store.employees.insert(employee.id, employee.clone());
    tracing::info!(id = employee.id, "employee created");

    let location = format!("{BASE_PATH}/{}", employee.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(employee)).into_response())
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    let store = db.read().await;
    store.employees.get(&id).cloned().map(Json).ok_or_else(|| ApiError::not_found(id))
}

async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<EmployeePayload>,
) -> Result<Json<Employee>, ApiError> {
    let (input, salary, date_of_joining) = validate(input)?;
    let mut store = db.write().await;
    if !store.employees.contains_key(&id) {
        return Err(ApiError::not_found(id));
    }
    if store.email_taken(&input.email, Some(id)) {
        return Err(ApiError::bad_request("Email already exists"));
    }
    let employee = Employee {
        id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        department: input.department,
        salary,
        date_of_joining,
    };
    store.employees.insert(id, employee.clone());
    tracing::info!(id, "employee updated");
    Ok(Json(employee))
}

async fn delete_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store.employees.remove(&id).ok_or_else(|| ApiError::not_found(id))?;
    tracing::info!(id, "employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
