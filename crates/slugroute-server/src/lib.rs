//! HTTP server for slugroute post pages.
//!
//! This crate serves the post routes over HTTP using axum:
//! - `GET /api/paths` - pre-render lists of both post routes
//! - `GET /api/posts/{prefix}/{slug}` - props for a two-segment page
//! - `GET /api/posts/{prefix}/{slug}/{*suffix}` - props for a nested page
//!
//! Props endpoints accept a `locale` query parameter and set `Cache-Control`
//! from the page's revalidate interval.
//!
//! # Quick Start
//!
//! ```ignore
//! use slugroute_config::Config;
//! use slugroute_server::{run_server, server_config_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     run_server(server_config_from_config(&config)).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum server (slugroute-server)
//!                        │
//!                        └─► API routes (handlers)
//!                                │
//!                                └─► PostRoutes ──► FileSource (datastore export)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use slugroute_config::Config;
use slugroute_pages::{
    BuildMode, DEFAULT_REVALIDATE_SECONDS, FallbackText, PostRoutes, RouteConfig,
};
use slugroute_source::FileSource;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Datastore export file.
    pub data_file: PathBuf,
    /// Locale for requests without a `locale` query parameter.
    pub default_locale: String,
    /// Post route configuration.
    pub route: RouteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            data_file: PathBuf::from("data/site.json"),
            default_locale: "zh-CN".to_owned(),
            route: RouteConfig::default(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = Arc::new(FileSource::new(config.data_file.clone()));
    tracing::info!(data_file = %config.data_file.display(), "Using datastore export");

    let state = Arc::new(AppState {
        routes: PostRoutes::new(config.route.clone()),
        source: Arc::<FileSource>::clone(&source),
        resolver: source,
        default_locale: config.default_locale.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        production = config.route.mode.production,
        export = config.route.mode.export,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create post route configuration from slugroute config.
#[must_use]
pub fn route_config_from_config(config: &Config) -> RouteConfig {
    let defaults = FallbackText::default();
    let overrides = &config.fallback;

    RouteConfig {
        mode: BuildMode {
            production: config.build.production,
            export: config.build.export,
        },
        revalidate_seconds: config
            .site_resolved
            .revalidate_seconds
            .unwrap_or(DEFAULT_REVALIDATE_SECONDS),
        fallback: FallbackText {
            not_found_title: overrides
                .not_found_title
                .clone()
                .unwrap_or(defaults.not_found_title),
            not_found_summary: overrides
                .not_found_summary
                .clone()
                .unwrap_or(defaults.not_found_summary),
            failed_title: overrides
                .failed_title
                .clone()
                .unwrap_or(defaults.failed_title),
            failed_summary: overrides
                .failed_summary
                .clone()
                .unwrap_or(defaults.failed_summary),
        },
    }
}

/// Create server configuration from slugroute config.
#[must_use]
pub fn server_config_from_config(config: &Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_file: config.site_resolved.data_file.clone(),
        default_locale: config.site_resolved.default_locale.clone(),
        route: route_config_from_config(config),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use slugroute_config::CliSettings;

    use super::*;

    fn load(toml: &str, settings: Option<&CliSettings>) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slugroute.toml");
        std::fs::write(&path, toml).unwrap();
        Config::load(Some(&path), settings).unwrap()
    }

    #[test]
    fn test_route_config_defaults() {
        let config = load("", None);

        assert_eq!(route_config_from_config(&config), RouteConfig::default());
    }

    #[test]
    fn test_route_config_from_file() {
        let config = load(
            r#"
[build]
production = true
export = true

[site]
revalidate_seconds = 300

[fallback]
failed_title = "Build failed"
"#,
            None,
        );

        let route = route_config_from_config(&config);

        assert!(route.mode.production);
        assert!(route.mode.export);
        assert_eq!(route.revalidate_seconds, 300);
        assert_eq!(route.fallback.failed_title, "Build failed");
        assert_eq!(
            route.fallback.not_found_title,
            FallbackText::default().not_found_title
        );
    }

    #[test]
    fn test_server_config_uses_cli_settings() {
        let settings = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            data_file: Some(PathBuf::from("/srv/site.json")),
            production: Some(true),
            ..Default::default()
        };
        let config = load("[site]\ndefault_locale = \"en-US\"\n", Some(&settings));

        let server = server_config_from_config(&config);

        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 9000);
        assert_eq!(server.data_file, PathBuf::from("/srv/site.json"));
        assert_eq!(server.default_locale, "en-US");
        assert!(server.route.mode.production);
    }
}
