use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Metadata store unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Helper for reporting a missing record
    ///
    /// # Example
    /// ```
    /// use sdt_core::Error;
    /// let err = Error::not_found("table", 7);
    /// assert_eq!(err.to_string(), "table 7 not found");
    /// ```
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    /// Helper for rejecting a request body or parameter
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Helper for wrapping a store/driver failure
    ///
    /// # Example
    /// ```
    /// use sdt_core::Error;
    /// let err = Error::unavailable("connection refused");
    /// assert!(err.is_unavailable());
    /// ```
    pub fn unavailable(msg: impl std::fmt::Display) -> Self {
        Error::DependencyUnavailable(msg.to_string())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::DependencyUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("project", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "project 42 not found");
    }

    #[test]
    fn test_invalid_input_message() {
        let err = Error::invalid_input("No valid fields to update");
        assert_eq!(err.to_string(), "Invalid input: No valid fields to update");
        assert!(!err.is_not_found());
    }
}
