#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReaderError>;

/// Failures that stop a reader from mounting or a config from loading.
///
/// Runtime input (indices, fragments, embedded poem data) never produces one
/// of these; it degrades to a no-op or the placeholder text instead.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("required element missing: {selector}")]
    MissingElement { selector: String },

    #[error("DOM operation failed ({context}): {message}")]
    Dom {
        context: &'static str,
        message: String,
    },
}

impl ReaderError {
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn missing_element(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }

    #[must_use]
    pub fn dom(context: &'static str, message: impl Into<String>) -> Self {
        Self::Dom {
            context,
            message: message.into(),
        }
    }
}
