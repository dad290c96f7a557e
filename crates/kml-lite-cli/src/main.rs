//! kml-lite CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::InputArgs;

#[derive(Parser)]
#[command(name = "kml-lite")]
#[command(version)]
#[command(about = "Inspect the styles and placemarks of a KML file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List placemarks, styles and diagnostics
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the parsed document as JSON
    Json {
        #[command(flatten)]
        input: InputArgs,

        /// Emit compact JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print the bounding box of every shape and of the whole document
    Bounds {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    // Initialize logging on stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kml_lite=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { input } => commands::summary::execute(&input),
        Commands::Json { input, compact } => commands::json::execute(&input, compact),
        Commands::Bounds { input } => commands::bounds::execute(&input),
    }
}
