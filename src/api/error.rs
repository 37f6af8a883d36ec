use thiserror::Error;

pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Errors from the project API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unreadable response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::Rejected {
            status,
            message: message_from_body(&body),
            body,
        }
    }

    /// Whether sending the same payload again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Rejected { status, .. } => *status >= 500 || matches!(status, 408 | 429),
            ApiError::Encode(_) | ApiError::InvalidResponse(_) => false,
        }
    }

    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Picks the user-facing message out of an error body: `detail`, then
/// `message`, then a generic fallback.
pub fn message_from_body(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return FALLBACK_MESSAGE.to_string();
    };
    ["detail", "message"]
        .iter()
        .find_map(|key| match json.get(*key) {
            Some(serde_json::Value::String(text)) => {
                (!text.trim().is_empty()).then(|| text.clone())
            }
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
