//! `slugroute props` command implementation.

use std::path::PathBuf;

use clap::Args;
use slugroute_config::{CliSettings, Config};
use slugroute_pages::{PostRoutes, RouteParams};
use slugroute_server::route_config_from_config;
use slugroute_source::FileSource;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the props command.
#[derive(Args)]
pub(crate) struct PropsArgs {
    /// URL path of the page, e.g. `/blog/hello` or `/archive/2023/10/post`.
    path: String,

    /// Locale passed to the resolver (default: `site.default_locale`).
    #[arg(short, long)]
    locale: Option<String>,

    /// Path to configuration file (default: auto-discover slugroute.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Datastore export file (overrides config).
    #[arg(short, long, env = "SLUGROUTE_DATA")]
    data: Option<PathBuf>,

    /// Static export: omit the revalidate interval.
    #[arg(long)]
    export: bool,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl PropsArgs {
    /// Execute the props command.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has fewer than two segments or
    /// configuration fails. Resolution failures produce placeholder props.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        validate_path(&self.path)?;

        let cli_settings = CliSettings {
            data_file: self.data,
            export: self.export.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source = FileSource::new(config.site_resolved.data_file.clone());
        let routes = PostRoutes::new(route_config_from_config(&config));

        let locale = self
            .locale
            .as_deref()
            .unwrap_or(&config.site_resolved.default_locale);
        let props = routes.static_props_for_path(&source, &self.path, locale)?;
        output.data(&serde_json::to_string_pretty(&props)?)?;

        Ok(())
    }
}

/// Reject paths no post route serves before touching configuration.
fn validate_path(path: &str) -> Result<(), CliError> {
    if RouteParams::from_url_path(path).is_none() {
        return Err(CliError::Validation(format!(
            "'{path}' is not a post path: expected /{{prefix}}/{{slug}}[/...]"
        )));
    }
    Ok(())
}
