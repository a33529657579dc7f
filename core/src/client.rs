//! Stateless request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only the base URL. Each of the five calls is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes the matching `HttpResponse`. The host executes the
//! round-trip in between, so nothing here blocks, retries or times out.
//!
//! | call   | method | url           | success |
//! |--------|--------|---------------|---------|
//! | list   | GET    | `{base}`      | 200     |
//! | get    | GET    | `{base}/{id}` | 200     |
//! | create | POST   | `{base}`      | 201/200 |
//! | update | PUT    | `{base}/{id}` | 200     |
//! | remove | DELETE | `{base}/{id}` | 204/200 |

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Employee, EmployeeId, EmployeeInput};

/// Synchronous, stateless client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn build_list(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.base_url.clone(), None)
    }

    pub fn build_get(&self, id: EmployeeId) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_create(&self, input: &EmployeeInput) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Post, self.base_url.clone(), Some(body)))
    }

    pub fn build_update(&self, id: EmployeeId, input: &EmployeeInput) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    pub fn build_remove(&self, id: EmployeeId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, &[201, 200])?;
        decode(&response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_remove(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])?;
        Ok(())
    }

    fn item_url(&self, id: EmployeeId) -> String {
        format!("{}/{id}", self.base_url)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        let headers = match body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };
        tracing::debug!(%method, %url, "built request");
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }
}

fn encode(input: &EmployeeInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Error body shape used by the backend: `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Map statuses outside `expected` to the matching `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    let message = error_message(&response.body);
    Err(match response.status {
        404 => ApiError::NotFound { message },
        400 | 422 => ApiError::Validation { message },
        status => ApiError::Server { status, message },
    })
}
