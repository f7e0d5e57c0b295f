use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes surfaced to callers of configuration operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidUserId,
    InconsistentConfig,
    ContentConfigFailed,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUserId => "INVALID_USER_ID",
            ErrorCode::InconsistentConfig => "INCONSISTENT_CONFIG",
            ErrorCode::ContentConfigFailed => "CONTENT_CONFIG_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct HallMonitorError {
    pub message: String,
    pub code: ErrorCode,
    pub detail: ErrorDetail,
}

impl HallMonitorError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            detail: ErrorDetail::default(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.detail.user_id = Some(user_id.into());
        self
    }

    pub fn with_error(mut self, error: impl std::fmt::Display) -> Self {
        self.detail.error = Some(error.to_string());
        self
    }
}

pub type HallMonitorResult<T> = Result<T, HallMonitorError>;

/// Failures reported by a [`crate::SpecializationSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("specialization backend unavailable: {0}")]
    Unavailable(String),
    #[error("invalid user id for backend: {0}")]
    InvalidUserId(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_variants() {
        let errors = vec![
            SourceError::Unavailable("down".to_string()),
            SourceError::InvalidUserId("x".to_string()),
            SourceError::Unexpected(anyhow::anyhow!("boom")),
        ];

        for error in errors {
            let rendered = error.to_string();
            assert!(!rendered.is_empty());
        }
    }

    #[test]
    fn hall_monitor_error_carries_code_and_detail() {
        let err = HallMonitorError::new(ErrorCode::ContentConfigFailed, "config build failed")
            .with_user("user-1")
            .with_error("backend timeout");
        assert_eq!(err.to_string(), "CONTENT_CONFIG_FAILED: config build failed");
        assert_eq!(err.detail.user_id.as_deref(), Some("user-1"));

        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json["code"], "CONTENT_CONFIG_FAILED");
        assert_eq!(json["detail"]["userId"], "user-1");
        assert_eq!(json["detail"]["error"], "backend timeout");
    }

    #[test]
    fn error_codes_use_stable_wire_names() {
        for (code, wire) in [
            (ErrorCode::InvalidUserId, "INVALID_USER_ID"),
            (ErrorCode::InconsistentConfig, "INCONSISTENT_CONFIG"),
            (ErrorCode::ContentConfigFailed, "CONTENT_CONFIG_FAILED"),
        ] {
            assert_eq!(code.as_str(), wire);
            assert_eq!(serde_json::to_value(code).expect("serialize"), wire);
        }
    }
}
