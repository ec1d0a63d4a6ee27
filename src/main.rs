//! skymap CLI entry point

use clap::{Parser, Subcommand};
use skymap_layout::Direction;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "skymap")]
#[command(about = "Cloud resource topology reconstruction and layered layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and lay out the topology graph, printing it as JSON
    Layout {
        /// Resource snapshot (JSON), or - for stdin
        snapshot: PathBuf,

        /// Rank direction: TB or LR (overrides the config file)
        #[arg(short, long)]
        direction: Option<Direction>,

        /// Layout config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Build the topology graph without positions
    Build {
        /// Resource snapshot (JSON), or - for stdin
        snapshot: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print node and edge counts for a snapshot
    Summary {
        /// Resource snapshot (JSON), or - for stdin
        snapshot: PathBuf,
    },
    /// Print the category of each resource type tag
    Classify {
        /// Resource type tags
        #[arg(required = true)]
        types: Vec<String>,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "skymap={0},skymap_core={0},skymap_layout={0}",
            log_level
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Layout {
            snapshot,
            direction,
            config,
            pretty,
        } => commands::layout(&snapshot, direction, config.as_deref(), pretty),
        Commands::Build { snapshot, pretty } => commands::build(&snapshot, pretty),
        Commands::Summary { snapshot } => commands::summary(&snapshot),
        Commands::Classify { types } => {
            commands::classify(&types);
            Ok(())
        }
        Commands::Version => {
            println!("skymap v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
