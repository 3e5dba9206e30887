//! Error types shared by every client operation.

/// Errors that can occur when talking to the content API
#[derive(Debug, thiserror::Error)]
pub enum ModrinthError {
    /// Bad caller input (unsupported hash algorithm, version not listed by its project, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The API answered 404, or a local lookup over resolved data found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response, or a body that could not be parsed
    #[error("Upstream error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Network-level failure before a response was obtained
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ModrinthError {
    /// Build an upstream error for a non-success HTTP status
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        ModrinthError::Upstream {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Build an upstream error for a malformed body
    pub fn malformed(message: impl Into<String>) -> Self {
        ModrinthError::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Whether this error is a `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModrinthError::NotFound(_))
    }
}

impl From<reqwest::Error> for ModrinthError {
    fn from(err: reqwest::Error) -> Self {
        ModrinthError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ModrinthError {
    fn from(err: serde_json::Error) -> Self {
        ModrinthError::malformed(format!("JSON: {}", err))
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ModrinthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_includes_status() {
        let err = ModrinthError::upstream_status(503, "maintenance");
        assert_eq!(err.to_string(), "Upstream error (status 503): maintenance");

        let err = ModrinthError::malformed("truncated body");
        assert_eq!(err.to_string(), "Upstream error: truncated body");
    }

    #[test]
    fn test_json_error_maps_to_upstream() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ModrinthError = parse.into();
        assert!(matches!(err, ModrinthError::Upstream { status: None, .. }));
    }
}
