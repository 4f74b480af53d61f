//! slugroute CLI - blog post page routes.
//!
//! Provides commands for:
//! - `serve`: Start the HTTP server
//! - `paths`: Print the pre-render lists of both post routes
//! - `props`: Resolve props for one URL path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PathsArgs, PropsArgs, ServeArgs};
use output::Output;

/// slugroute - blog post page routes.
#[derive(Parser)]
#[command(name = "slugroute", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Print the pre-render lists of both post routes as JSON.
    Paths(PathsArgs),
    /// Resolve props for a URL path and print them as JSON.
    Props(PropsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Serve(args) => args.verbose,
            Self::Paths(args) => args.verbose,
            Self::Props(args) => args.verbose,
        }
    }
}

/// Log filter: --verbose forces INFO, otherwise `RUST_LOG` or WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let filter = log_filter(cli.command.verbose(), std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(e) => Err(e.into()),
        },
        Commands::Paths(args) => args.execute(),
        Commands::Props(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
