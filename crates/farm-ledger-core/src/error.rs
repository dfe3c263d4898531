//! Error types for farm-ledger.
//!
//! Validation failures (missing fields, incomplete questionnaires, unknown
//! barcodes) and infrastructure failures (storage, configuration) share one
//! enum so callers can match on what went wrong and show a notice.

use thiserror::Error;

use crate::barcode::BarcodeError;
use crate::models::Collection;
use crate::store::StoreError;

/// The main error type for farm-ledger operations.
#[derive(Error, Debug)]
pub enum FarmError {
    // === Input Errors ===
    /// A required form field was empty or absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the field.
        field: &'static str,
    },

    /// Not every questionnaire question was answered.
    #[error("please answer all questions ({answered} of {total} answered)")]
    IncompleteAssessment {
        /// Number of questions with an answer.
        answered: usize,
        /// Number of questions in the questionnaire.
        total: usize,
    },

    /// An answer is not one of the options offered for its question.
    #[error("invalid answer '{answer}' for question '{question}'")]
    InvalidAnswer {
        /// Question identifier.
        question: String,
        /// The offending answer text.
        answer: String,
    },

    /// A field holds a value no record can store.
    #[error("invalid value for {field}: {reason}")]
    InvalidField {
        /// Name of the field.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    // === Lookup Errors ===
    /// No registered animal carries this barcode.
    #[error("animal not found: {barcode}")]
    AnimalNotFound {
        /// The barcode that was searched for.
        barcode: String,
        /// Registered barcodes that look similar.
        suggestions: Vec<String>,
    },

    /// No record with this id exists in the collection.
    #[error("{collection} record not found: {id}")]
    NotFound {
        /// Collection that was searched.
        collection: Collection,
        /// The id that was searched for.
        id: String,
    },

    // === Infrastructure Errors ===
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Barcode rendering failed.
    #[error("barcode error: {0}")]
    Barcode(#[from] BarcodeError),

    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for farm-ledger operations.
pub type FarmResult<T> = Result<T, FarmError>;

impl From<figment::Error> for FarmError {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl FarmError {
    /// Create a missing-field error.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create a not-found error for a collection record.
    #[must_use]
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }

    /// Check if this error was caused by user input rather than the system.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::IncompleteAssessment { .. }
                | Self::InvalidAnswer { .. }
                | Self::InvalidField { .. }
        )
    }

    /// Check if this error is a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AnimalNotFound { .. } | Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FarmError::missing("breed");
        assert_eq!(err.to_string(), "missing required field: breed");

        let err = FarmError::not_found(Collection::Outbreaks, "42");
        assert_eq!(err.to_string(), "outbreaks record not found: 42");
    }

    #[test]
    fn test_incomplete_assessment_display() {
        let err = FarmError::IncompleteAssessment {
            answered: 3,
            total: 5,
        };
        assert!(err.to_string().contains("3 of 5"));
    }

    #[test]
    fn test_error_classification() {
        assert!(FarmError::missing("name").is_validation_error());
        assert!(!FarmError::missing("name").is_not_found());

        let miss = FarmError::AnimalNotFound {
            barcode: "PIG1".into(),
            suggestions: vec![],
        };
        assert!(miss.is_not_found());
        assert!(!miss.is_validation_error());
    }

    #[test]
    fn test_invalid_field_is_validation_error() {
        let err = FarmError::InvalidField {
            field: "weight",
            reason: "must be a finite number".into(),
        };
        assert!(err.is_validation_error());
        assert_eq!(err.to_string(), "invalid value for weight: must be a finite number");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: FarmError = StoreError::CapacityExceeded {
            key: "animals".into(),
            required: 10,
            capacity: 5,
        }
        .into();
        assert!(matches!(err, FarmError::Store(_)));
        assert!(err.to_string().contains("capacity"));
    }
}
