//! Unveil CLI - Simulate reveal-on-scroll behaviour on a page description

mod commands;
mod presets;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, inspect, simulate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unveil_page::SplashDismiss;

#[derive(Parser)]
#[command(name = "unveil")]
#[command(about = "Headless reveal-on-scroll simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through a page top to bottom and print every visual change
    Simulate {
        /// Path to .page.toml file
        page: String,

        /// Scroll distance per step in pixels
        #[arg(long, default_value = "100")]
        step: f64,

        /// Seconds of time that pass per step
        #[arg(long, default_value = "0.1")]
        tick: f64,

        /// Splash dismissal: on-load, timeout:SECS or timeout-or-click:SECS
        #[arg(long, default_value = "on-load", value_parser = parse_splash)]
        splash: SplashDismiss,

        /// Observer presets file with [fade_in] and [slides] tables
        #[arg(long)]
        config: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = simulate::OutputFormat::Text)]
        format: simulate::OutputFormat,
    },

    /// List a page's elements and the observers that would watch them
    Inspect {
        /// Path to .page.toml file
        page: String,

        /// Observer presets file with [fade_in] and [slides] tables
        #[arg(long)]
        config: Option<String>,
    },

    /// Validate an observer presets file and print it normalised
    Check {
        /// Path to presets file
        config: String,
    },
}

fn parse_splash(s: &str) -> Result<SplashDismiss, String> {
    s.parse().map_err(|e: unveil_core::UnveilError| e.to_string())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unveil=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            page,
            step,
            tick,
            splash,
            config,
            format,
        } => simulate::run(simulate::SimulateArgs {
            page,
            step,
            tick,
            splash,
            config,
            format,
        }),
        Commands::Inspect { page, config } => inspect::run(&page, config.as_deref()),
        Commands::Check { config } => check::run(&config),
    }
}
