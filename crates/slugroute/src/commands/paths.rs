//! `slugroute paths` command implementation.

use std::path::PathBuf;

use clap::Args;
use slugroute_config::{CliSettings, Config};
use slugroute_pages::{AllStaticPaths, PostRoutes};
use slugroute_server::route_config_from_config;
use slugroute_source::{FileSource, SiteDataSource};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    /// Path to configuration file (default: auto-discover slugroute.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Datastore export file (overrides config).
    #[arg(short, long, env = "SLUGROUTE_DATA")]
    data: Option<PathBuf>,

    /// Enumerate real paths (otherwise both lists are empty).
    #[arg(long)]
    production: bool,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl PathsArgs {
    /// Execute the paths command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the data source cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data_file: self.data,
            production: self.production.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source = FileSource::new(config.site_resolved.data_file.clone());

        let paths = enumerate(&PostRoutes::new(route_config_from_config(&config)), &source)?;
        output.data(&serde_json::to_string_pretty(&paths)?)?;

        Ok(())
    }
}

fn enumerate(routes: &PostRoutes, source: &dyn SiteDataSource) -> Result<AllStaticPaths, CliError> {
    let paths = routes.static_paths(source)?;
    tracing::info!(
        pair = paths.pair.paths.len(),
        nested = paths.nested.paths.len(),
        "Enumerated post routes"
    );
    Ok(paths)
}
