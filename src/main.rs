use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nanum::commands;

#[derive(Parser)]
#[command(
    name = "nanum",
    version,
    about = "Issuer workload allocator with market-tier priorities and balance validation",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate an issuer file across a team
    Allocate {
        /// Issuer file to read (.csv, .xlsx)
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated team member names
        #[arg(short, long)]
        members: Option<String>,

        /// Allocation strategy (tier-greedy, phased-round-robin)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Write the allocation as CSV to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format on stdout (text, csv, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the market-tier breakdown of an issuer file
    Tiers {
        /// Issuer file to read (.csv, .xlsx)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Allocate {
            input,
            members,
            strategy,
            output,
            format,
        } => {
            tracing::info!(
                input = %input.display(),
                strategy = ?strategy,
                format = %format,
                "Starting allocate command"
            );
            commands::allocate(input, members, strategy, output, format)?;
        }

        Commands::Tiers { input } => {
            tracing::info!(input = %input.display(), "Starting tiers command");
            commands::tiers(input)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("nanum=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("nanum=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
