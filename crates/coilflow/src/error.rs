use coilflow_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(err.class.into(), err.origin.into(), err.message)
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input was malformed or out of range.
    Invalid,

    /// The addressed coil or load does not exist.
    NotFound,

    /// The request contradicts the current state (duplicate id, shipped load).
    Conflict,

    /// The request would break a yard rule (SCRAP on a load).
    Rejected,

    /// The caller cannot remediate this.
    Internal,
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Conflict => Self::Conflict,
            ErrorClass::Internal => Self::Internal,
            ErrorClass::InvariantViolation => Self::Rejected,
            ErrorClass::NotFound => Self::NotFound,
            ErrorClass::Validation => Self::Invalid,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorOrigin {
    Coil,
    Config,
    Load,
    Location,
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Coil => Self::Coil,
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Load => Self::Load,
            CoreErrorOrigin::Location => Self::Location,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_maps_class_and_origin() {
        let err: Error =
            InternalError::new(ErrorClass::InvariantViolation, CoreErrorOrigin::Coil, "scrap").into();

        assert_eq!(err.kind, ErrorKind::Rejected);
        assert_eq!(err.origin, ErrorOrigin::Coil);
        assert_eq!(err.to_string(), "scrap");
    }

    #[test]
    fn error_serializes_with_snake_case_tags() {
        let err = Error::new(ErrorKind::NotFound, ErrorOrigin::Load, "load not found: x");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["origin"], "load");
        assert!(err.is_not_found());
        assert_eq!(ErrorKind::Conflict.to_string(), "Conflict");
    }
}
