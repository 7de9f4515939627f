//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during domain object construction.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl DomainError {
    /// Creates an empty field error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        DomainError::EmptyField {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = DomainError::empty_field("content");
        assert_eq!(err.to_string(), "Field 'content' cannot be empty");
    }
}
