//! Field rules for the contact form.
//!
//! `MinLength` and `Email` pass on an empty value so that an empty field
//! reports a single `Required` violation.

use std::sync::LazyLock;

use regex::Regex;
use shared::{domain::Field, error::ValidationError};

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    Email,
}

impl Rule {
    pub fn check(self, field: Field, value: &str) -> Result<(), ValidationError> {
        match self {
            Rule::Required => {
                if value.is_empty() {
                    return Err(ValidationError::Required { field });
                }
            }
            Rule::MinLength(min) => {
                let actual = value.chars().count();
                if actual > 0 && actual < min {
                    return Err(ValidationError::TooShort { field, min, actual });
                }
            }
            Rule::Email => {
                if !value.is_empty() && !is_well_formed_email(value) {
                    return Err(ValidationError::InvalidEmail { field });
                }
            }
        }
        Ok(())
    }
}

pub fn rules_for(field: Field) -> &'static [Rule] {
    match field {
        Field::Name => &[Rule::Required, Rule::MinLength(3)],
        Field::Email => &[Rule::Required, Rule::Email],
        Field::Message => &[Rule::Required, Rule::MinLength(10)],
    }
}

/// Every rule `value` breaks, in rule order.
pub fn validate_field(field: Field, value: &str) -> Vec<ValidationError> {
    rules_for(field)
        .iter()
        .filter_map(|rule| rule.check(field, value).err())
        .collect()
}

pub fn is_valid(field: Field, value: &str) -> bool {
    rules_for(field)
        .iter()
        .all(|rule| rule.check(field, value).is_ok())
}

fn is_well_formed_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LEN {
        return false;
    }
    match value.split_once('@') {
        Some((local, _)) if local.len() <= EMAIL_LOCAL_MAX_LEN => EMAIL_RE.is_match(value),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
