//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use slugroute_pages::PostRoutes;
use slugroute_source::{PostResolver, SiteDataSource};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Both post routes with their configuration.
    pub(crate) routes: PostRoutes,
    /// Data source used for path enumeration.
    pub(crate) source: Arc<dyn SiteDataSource>,
    /// Resolver used for props resolution.
    pub(crate) resolver: Arc<dyn PostResolver>,
    /// Locale for requests without a `locale` query parameter.
    pub(crate) default_locale: String,
}
