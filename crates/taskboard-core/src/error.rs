use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True when the server rejected the stored credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_detail_only() {
        let err = TaskboardError::Api {
            status: 404,
            detail: "Board with id 3 not found.".to_string(),
        };
        assert_eq!(err.to_string(), "Board with id 3 not found.");
        assert!(matches!(err, TaskboardError::Api { status: 404, .. }));
    }

    #[test]
    fn test_unauthorized_classification() {
        let err = TaskboardError::Unauthorized("Session expired".to_string());
        assert!(err.is_unauthorized());
        assert!(!TaskboardError::validation("empty").is_unauthorized());
    }
}
