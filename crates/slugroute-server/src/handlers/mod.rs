//! HTTP request handlers.

pub(crate) mod paths;
pub(crate) mod posts;

/// Build application state around a mock data source.
#[cfg(test)]
pub(crate) fn test_state(
    source: &std::sync::Arc<slugroute_source::MockSource>,
    config: slugroute_pages::RouteConfig,
) -> std::sync::Arc<crate::state::AppState> {
    use std::sync::Arc;

    use slugroute_source::MockSource;

    Arc::new(crate::state::AppState {
        routes: slugroute_pages::PostRoutes::new(config),
        source: Arc::<MockSource>::clone(source),
        resolver: Arc::<MockSource>::clone(source),
        default_locale: "zh-CN".to_owned(),
    })
}
