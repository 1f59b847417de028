use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Failure of a single HTTP exchange before any status line was received.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),
}

/// Every data-access failure, normalized to a message plus an HTTP status
/// (0 when no response was received).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Unexpected { message: String },
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized { .. } => 401,
            ApiError::Server { status, .. } => *status,
            ApiError::InvalidCredentials | ApiError::Network | ApiError::Unexpected { .. } => 0,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The error message, or `fallback` when the server sent nothing useful.
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.message();
        if message.trim().is_empty() || message == GENERIC_ERROR_MESSAGE {
            fallback.to_string()
        } else {
            message
        }
    }

    /// Builds the error for a non-2xx response from its status and body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Server { status, message }
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(_: TransportError) -> Self {
        ApiError::Network
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unexpected {
            message: err.to_string(),
        }
    }
}

fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return GENERIC_ERROR_MESSAGE.to_string();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string(),
        Ok(serde_json::Value::String(text)) if !text.trim().is_empty() => text,
        Ok(_) => GENERIC_ERROR_MESSAGE.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_wins() {
        let err = ApiError::from_response(
            500,
            r#"{"status":500,"error":"Internal Server Error","message":"Budget not found"}"#,
        );
        assert_eq!(err.status(), 500);
        assert_eq!(err.message(), "Budget not found");
    }

    #[test]
    fn empty_message_falls_back_to_error_field() {
        let err = ApiError::from_response(400, r#"{"error":"Bad Request","message":""}"#);
        assert_eq!(err.message(), "Bad Request");
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        let err = ApiError::from_response(409, "User already exists\n");
        assert_eq!(
            err,
            ApiError::Server {
                status: 409,
                message: "User already exists".to_string()
            }
        );
    }

    #[test]
    fn empty_body_is_generic() {
        let err = ApiError::from_response(502, "");
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.message_or("Failed to load data"), "Failed to load data");
    }

    #[test]
    fn unauthorized_carries_401() {
        let err = ApiError::from_response(401, "");
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.status(), 401);
    }

    #[test]
    fn transport_failures_become_network_errors() {
        let timed_out: ApiError = TransportError::Timeout(10_000).into();
        let refused: ApiError = TransportError::Network("connection refused".into()).into();
        assert_eq!(timed_out, ApiError::Network);
        assert_eq!(refused.status(), 0);
        assert_eq!(refused.message(), NETWORK_ERROR_MESSAGE);
    }
}
