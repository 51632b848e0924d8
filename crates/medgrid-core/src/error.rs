use thiserror::Error;

/// Core error types for medgrid domain operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid patient ID: {0}")]
    InvalidId(String),

    #[error("Response item is missing its self link")]
    MissingSelfLink,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown match mode: {0}")]
    UnknownMatchMode(String),

    #[error("Unknown sort order: {0} (expected asc or desc)")]
    UnknownSortOrder(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl CoreError {
    /// Create a new InvalidId error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Create a new InvalidDate error
    pub fn invalid_date(date: impl Into<String>) -> Self {
        Self::InvalidDate(date.into())
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_id("not-a-uuid");
        assert_eq!(err.to_string(), "Invalid patient ID: not-a-uuid");

        let err = CoreError::MissingSelfLink;
        assert_eq!(err.to_string(), "Response item is missing its self link");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope }").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::JsonError(_)));
    }

    #[test]
    fn test_url_error_conversion() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let core_err: CoreError = url_err.into();
        assert!(matches!(core_err, CoreError::UrlError(_)));
    }
}
