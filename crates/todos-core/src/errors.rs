use crate::ids::ParseIdError;

/// Typed error hierarchy for todo operations.
/// Each variant maps to exactly one HTTP status at the server boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl TodoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Short classification string for logging and error bodies.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Storage(_) => "storage",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Storage(_) => 500,
        }
    }

    /// Whether the fault was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<ParseIdError> for TodoError {
    fn from(e: ParseIdError) -> Self {
        Self::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(TodoError::validation("x").status_code(), 400);
        assert_eq!(TodoError::not_found("x").status_code(), 404);
        assert_eq!(TodoError::Conflict("x".into()).status_code(), 409);
        assert_eq!(TodoError::Storage("x".into()).status_code(), 500);
    }

    #[test]
    fn client_vs_server_faults() {
        assert!(TodoError::validation("x").is_client_error());
        assert!(TodoError::Conflict("x".into()).is_client_error());
        assert!(!TodoError::Storage("disk".into()).is_client_error());
    }

    #[test]
    fn error_kind_strings() {
        assert_eq!(TodoError::validation("x").error_kind(), "validation");
        assert_eq!(TodoError::not_found("x").error_kind(), "not_found");
        assert_eq!(TodoError::Storage("x".into()).error_kind(), "storage");
    }

    #[test]
    fn parse_error_becomes_validation() {
        let err: TodoError = ParseIdError("abc".into()).into();
        assert!(matches!(err, TodoError::Validation(ref m) if m.contains("abc")));
    }
}
