//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/paths", get(handlers::paths::get_paths))
        .route("/api/posts", get(handlers::posts::not_a_post))
        .route("/api/posts/", get(handlers::posts::not_a_post))
        .route("/api/posts/{prefix}", get(handlers::posts::not_a_post))
        .route("/api/posts/{prefix}/{slug}", get(handlers::posts::get_pair))
        .route(
            "/api/posts/{prefix}/{slug}/{*suffix}",
            get(handlers::posts::get_nested),
        )
        .layer(
            ServiceBuilder::new()
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
