//! Client-side validation of the employee form.
//!
//! Runs synchronously before any request is built. Produces at most one
//! message per field; when a field is empty the "required" message wins over
//! the format message.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{Employee, EmployeeInput};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// The six editable fields of an employee, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Department,
    Salary,
    DateOfJoining,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Department,
        Field::Salary,
        Field::DateOfJoining,
    ];

    /// JSON / form-control name.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Department => "department",
            Field::Salary => "salary",
            Field::DateOfJoining => "dateOfJoining",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Department => "Department",
            Field::Salary => "Salary (USD)",
            Field::DateOfJoining => "Date Of Joining",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the JSON name (`firstName`) or a snake/kebab spelling
    /// (`first_name`, `first-name`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Field::ALL
            .into_iter()
            .find(|f| f.name().to_lowercase() == key)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw form inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub salary: String,
    pub date_of_joining: String,
}

impl EmployeeDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Department => &self.department,
            Field::Salary => &self.salary,
            Field::DateOfJoining => &self.date_of_joining,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Department => &mut self.department,
            Field::Salary => &mut self.salary,
            Field::DateOfJoining => &mut self.date_of_joining,
        };
        *slot = value.into();
    }
}

impl From<&Employee> for EmployeeDraft {
    fn from(e: &Employee) -> Self {
        Self {
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            department: e.department.clone(),
            salary: e.salary.map(|s| s.to_string()).unwrap_or_default(),
            date_of_joining: e
                .date_of_joining
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }
}

/// Plain decimal, or exponent form (`5e4`) as a number input accepts.
fn parse_salary(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check every field of `draft`, returning the wire payload when all pass.
pub fn validate(draft: &EmployeeDraft) -> Result<EmployeeInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    if !required(&draft.first_name) {
        errors.insert(Field::FirstName, "First name is required");
    }
    if !required(&draft.last_name) {
        errors.insert(Field::LastName, "Last name is required");
    }
    if !required(&draft.email) {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_PATTERN.is_match(&draft.email) {
        errors.insert(Field::Email, "Provide a valid email");
    }
    if !required(&draft.department) {
        errors.insert(Field::Department, "Department is required");
    }

    let salary = parse_salary(draft.salary.trim())
        .filter(|s| !s.is_sign_negative() || s.is_zero());
    if salary.is_none() {
        errors.insert(Field::Salary, "Salary must be zero or more");
    }

    let date_of_joining = if draft.date_of_joining.is_empty() {
        errors.insert(Field::DateOfJoining, "Select date of joining");
        None
    } else {
        let parsed = NaiveDate::parse_from_str(draft.date_of_joining.trim(), "%Y-%m-%d").ok();
        if parsed.is_none() {
            errors.insert(Field::DateOfJoining, "Provide a valid date of joining");
        }
        parsed
    };

    match (salary, date_of_joining) {
        (Some(salary), Some(date_of_joining)) if errors.is_empty() => Ok(EmployeeInput {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            department: draft.department.clone(),
            salary,
            date_of_joining,
        }),
        _ => Err(errors),
    }
}
