//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Result alias used throughout `wordbook-core`.
pub type Result<T> = std::result::Result<T, WordbookError>;

#[derive(Debug, Error)]
pub enum WordbookError {
    /// The definition endpoint answered 404 for this word.
    #[error("no definition found for '{word}'")]
    WordNotFound { word: String },

    /// Any other remote failure: non-2xx status, transport error, or an undecodable body.
    #[error("remote request failed{}: {reason}", status.map(|code| format!(" with status {code}")).unwrap_or_default())]
    RequestFailed { status: Option<u16>, reason: String },

    #[error("storage failure on key '{key}': {reason}")]
    Storage { key: String, reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl WordbookError {
    pub(crate) fn storage(key: &str, reason: impl std::fmt::Display) -> Self {
        Self::Storage {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::WordNotFound { .. })
    }

    /// HTTP status attached to a failed request, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::WordNotFound { .. } => Some(404),
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_includes_status_when_known() {
        let err = WordbookError::RequestFailed {
            status: Some(503),
            reason: "service unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "remote request failed with status 503: service unavailable"
        );

        let err = WordbookError::RequestFailed {
            status: None,
            reason: "connection reset".into(),
        };
        assert_eq!(err.to_string(), "remote request failed: connection reset");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn not_found_reports_404() {
        let err = WordbookError::WordNotFound {
            word: "xyzzy".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }
}
