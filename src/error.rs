use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failures a handler surfaces to the client. Malformed input never reaches
/// this type: axum's `Path`/`Json` rejections answer 400-class on their own
/// before the handler body runs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Guarded route called without a `sessionId` cookie.
    #[error("Unauthorized.")]
    MissingSession,
    /// Store or other infrastructure failure. The cause is logged
    /// server-side and never echoed to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingSession => (StatusCode::UNAUTHORIZED, "Unauthorized.".to_string()),
            ApiError::Internal(e) => {
                error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_session_renders_401_with_error_body() {
        let response = ApiError::MissingSession.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = to_bytes(response.into_body(), 1024).await.expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(value, serde_json::json!({ "error": "Unauthorized." }));
    }

    #[tokio::test]
    async fn internal_error_hides_the_cause() {
        let response =
            ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), 1024).await.expect("read body");
        let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
        assert!(!body.contains("connection refused"));
        assert!(body.contains("Internal server error"));
    }
}
