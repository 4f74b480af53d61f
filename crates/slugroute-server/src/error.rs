//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use slugroute_pages::RouteError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Post route error.
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Route(RouteError::InvalidPath(path)) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Not a post path", "path": path}),
            ),
            Self::Route(e @ RouteError::Enumerate { shape, .. }) => {
                tracing::error!(route = %shape, error = %e, "Path enumeration failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string(), "route": shape.as_str()}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
