//! Error types for dagcheck server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipeline analysis failed.
    #[error("{0}")]
    Core(#[from] dagcheck_core::Error),

    /// A configured CORS origin is not a valid header value.
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),

    /// Host and port do not form a socket address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Error body returned to HTTP clients.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // Every failure reaching a handler is reported as a generic server
        // error carrying the message.
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagcheck_core::{Endpoint, Error};

    #[test]
    fn test_core_error_message_is_passed_through() {
        let err = ServerError::from(Error::UnknownNode {
            edge: 0,
            endpoint: Endpoint::Source,
            node: "x".to_string(),
        });
        assert_eq!(err.to_string(), "edge #0 references unknown source node 'x'");
    }

    #[test]
    fn test_into_response_status() {
        let response = ServerError::Core(Error::DuplicateNode("a".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
