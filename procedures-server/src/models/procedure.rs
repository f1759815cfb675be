//! Procedure identifiers and mutable field set

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ValidationError;

/// Storage-assigned procedure identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProcedureId(i64);

impl ProcedureId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse an id from a path segment.
    ///
    /// # Example
    /// ```
    /// use procedures_server::models::ProcedureId;
    ///
    /// assert_eq!(ProcedureId::parse("42").unwrap().get(), 42);
    /// assert!(ProcedureId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProcedureId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ProcedureId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every mutable column of a procedure.
///
/// Create inserts these values and update replaces all of them; there is
/// no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureFields {
    pub last_modified_on: DateTime<Utc>,
    pub structure_id: i64,
    pub structure_version: i64,
    pub name: String,
    pub commodity: String,
    pub consultant_id: i64,
    pub dead_line: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_signed_integers() {
        assert_eq!(ProcedureId::parse("1").unwrap(), ProcedureId::new(1));
        assert_eq!(ProcedureId::parse("-3").unwrap().get(), -3);
    }

    #[test]
    fn parse_rejects_non_numeric() {
        for input in ["", "abc", "1.5", "12a", " 7", "99999999999999999999"] {
            let err = ProcedureId::parse(input).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidFormat {
                    field: "id",
                    reason: "must be an integer"
                },
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ProcedureId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
