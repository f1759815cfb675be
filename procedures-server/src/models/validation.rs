//! Validation error types

use std::fmt;

/// Input rejected before it reaches storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// String doesn't match required format (e.g., numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body is not valid JSON for the expected shape
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::MalformedBody { reason } => {
                write!(f, "unable to decode the request body: {}", reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "id",
            reason: "must be an integer",
        };
        assert_eq!(err.to_string(), "id: must be an integer");

        let err = ValidationError::MalformedBody {
            reason: "EOF while parsing".into(),
        };
        assert_eq!(
            err.to_string(),
            "unable to decode the request body: EOF while parsing"
        );
    }
}
