//! Paths API endpoint.
//!
//! Returns the pre-render lists of both post routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use slugroute_pages::AllStaticPaths;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/paths.
pub(crate) async fn get_paths(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AllStaticPaths>, ServerError> {
    let paths = state.routes.static_paths(state.source.as_ref())?;
    Ok(Json(paths))
}
