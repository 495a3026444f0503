use thiserror::Error;

use crate::domain::Field;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: Field },
    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        field: Field,
        min: usize,
        actual: usize,
    },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: Field },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidEmail { field } => *field,
        }
    }
}
