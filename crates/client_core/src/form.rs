//! Contact form state: values, touched fields, and the submit lifecycle.

use std::collections::{BTreeMap, BTreeSet};

use shared::{domain::Field, error::ValidationError, protocol::ContactSubmission};

use crate::{error::TransportError, validation};

pub const SUBMIT_FAILED_MESSAGE: &str = "Submission failed. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct FormController {
    values: BTreeMap<Field, String>,
    touched: BTreeSet<Field>,
    submitted: bool,
    submit_success: bool,
    submit_error: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Marks a field as interacted with (focused then blurred).
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn validate(&self, field: Field) -> bool {
        validation::is_valid(field, self.value(field))
    }

    pub fn errors(&self, field: Field) -> Vec<ValidationError> {
        validation::validate_field(field, self.value(field))
    }

    pub fn is_form_valid(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.validate(field))
    }

    /// Invalid fields stay silent until touched or until a submit attempt.
    pub fn should_show_error(&self, field: Field) -> bool {
        !self.validate(field) && (self.is_touched(field) || self.submitted)
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn submit_success(&self) -> bool {
        self.submit_success
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Records a submit attempt. Returns the create-request body when every
    /// field is valid; otherwise only `submitted` changes.
    pub fn begin_submit(&mut self) -> Option<ContactSubmission> {
        self.submitted = true;
        if !self.is_form_valid() {
            return None;
        }

        self.submit_success = false;
        self.submit_error = None;
        Some(ContactSubmission {
            name: self.value(Field::Name).to_string(),
            email: self.value(Field::Email).to_string(),
            message: self.value(Field::Message).to_string(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<(), TransportError>) {
        match result {
            Ok(()) => {
                self.submit_success = true;
                self.submit_error = None;
                self.values.clear();
                self.touched.clear();
                self.submitted = false;
            }
            Err(_) => {
                self.submit_success = false;
                self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
