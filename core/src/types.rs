//! Employee DTOs as they travel over the wire.
//!
//! # Design
//! The JSON shape is camelCase (`firstName`, `dateOfJoining`, ...). Salary is
//! a JSON number backed by `Decimal`; the joining date is an ISO `YYYY-MM-DD`
//! string backed by `NaiveDate`. These types are defined independently from
//! the mock-server crate; the integration tests catch schema drift.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EmployeeId)
    }
}

/// An employee as returned by the backend.
///
/// `salary` and `date_of_joining` are optional so that a record missing them
/// still loads; the form turns absence into an empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for create and update: every field of `Employee` except `id`.
///
/// Update is a full replacement, so nothing here is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
}
