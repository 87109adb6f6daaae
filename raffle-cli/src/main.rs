mod commands;
mod config;
mod cues;
mod roster;

use clap::{Parser, Subcommand};
use config::ConfigOverrides;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "raffle")]
#[command(about = "Elimination raffle: draw every participant, one at a time")]
#[command(version)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a raffle over a participant list
    Run {
        /// Participant list (.json or .csv)
        roster: PathBuf,
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
        /// Length of each spin in seconds
        #[arg(long)]
        draw_seconds: Option<f64>,
        /// How long the winner stays on screen, in seconds
        #[arg(long)]
        dwell_seconds: Option<f64>,
        /// Disable sound cues
        #[arg(long)]
        mute: bool,
    },
    /// Validate a participant list and print it
    Check {
        /// Participant list (.json or .csv)
        roster: PathBuf,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "raffle={},raffle_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match cli.command {
        Commands::Run {
            roster,
            seed,
            draw_seconds,
            dwell_seconds,
            mute,
        } => {
            let overrides = ConfigOverrides {
                seed,
                draw_seconds,
                dwell_seconds,
            };
            match config::load_config(cli.config.as_deref(), &overrides).await {
                Ok(config) => commands::run_raffle(config, &roster, mute).await,
                Err(e) => Err(e),
            }
        }
        Commands::Check { roster } => commands::check_roster(&roster).await,
        Commands::Config => {
            match config::load_config(cli.config.as_deref(), &ConfigOverrides::default()).await {
                Ok(config) => commands::show_config(&config),
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
