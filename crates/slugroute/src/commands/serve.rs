//! `slugroute serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use slugroute_config::{CliSettings, Config};
use slugroute_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover slugroute.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Datastore export file (overrides config).
    #[arg(short, long, env = "SLUGROUTE_DATA")]
    data: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enumerate real paths instead of resolving every page on demand.
    #[arg(long)]
    production: bool,

    /// Static export: never regenerate pages on a timer.
    #[arg(long)]
    export: bool,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            data_file: self.data,
            production: self.production.then_some(true),
            export: self.export.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Datastore export: {}",
            config.site_resolved.data_file.display()
        ));
        output.info(&format!(
            "Mode: {}{}",
            if config.build.production {
                "production"
            } else {
                "development"
            },
            if config.build.export { " (export)" } else { "" }
        ));

        run_server(server_config_from_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
