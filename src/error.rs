//! `CBeanError` - the single error type of the runtime
//!
//! Programming errors (illegal state, unsupported operations) are reported with
//! full diagnostic context and are not meant to be caught by business logic.
//! Failures from externally supplied callbacks travel as [`CBeanError::Database`]
//! with the original cause kept intact.

use std::fmt;

/// Runtime error type
#[derive(Debug)]
pub enum CBeanError {
    /// A programming error: invalid option, invalid call order, missing alias...
    IllegalState(String),
    /// The operation is structurally unavailable (e.g. row lock on a file-based engine)
    UnsupportedOperation(String),
    /// Failure raised by a count/paging callback or a row source
    Database(Box<dyn std::error::Error + Send + Sync>),
    /// An entity factory or property setter rejected the call
    Entity(String),
    /// Configuration could not be loaded
    Config(String),
}

impl CBeanError {
    /// Wrap an external failure without reinterpreting it.
    pub fn database<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CBeanError::Database(err.into())
    }

    /// Is this a programming error rather than a runtime failure?
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, CBeanError::IllegalState(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, CBeanError::UnsupportedOperation(_))
    }
}

impl fmt::Display for CBeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CBeanError::IllegalState(s) => {
                write!(f, "Illegal state: {s}")
            }
            CBeanError::UnsupportedOperation(s) => {
                write!(f, "Unsupported operation: {s}")
            }
            CBeanError::Database(e) => {
                write!(f, "Database error: {e}")
            }
            CBeanError::Entity(s) => {
                write!(f, "Entity error: {s}")
            }
            CBeanError::Config(s) => {
                write!(f, "Configuration error: {s}")
            }
        }
    }
}

impl std::error::Error for CBeanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CBeanError::Database(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for CBeanError {
    fn from(err: config::ConfigError) -> Self {
        CBeanError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[derive(Debug)]
    struct ConnectionLost;

    impl fmt::Display for ConnectionLost {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection lost")
        }
    }

    impl std::error::Error for ConnectionLost {}

    #[test]
    fn test_database_error_keeps_cause() {
        let err = CBeanError::database(ConnectionLost);
        assert_eq!(err.to_string(), "Database error: connection lost");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection lost"));
        assert!(!err.is_illegal_state());
    }

    #[test]
    fn test_classification() {
        assert!(CBeanError::IllegalState("x".into()).is_illegal_state());
        assert!(CBeanError::UnsupportedOperation("x".into()).is_unsupported());
        assert!(CBeanError::Config("x".into()).source().is_none());
    }
}
