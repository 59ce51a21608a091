//! Binary entrypoint for the traffic signal simulation.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use humantime::format_duration;
use tokio::select;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use traffic_signal::config::RuntimeOptions;
use traffic_signal::lifecycle::Lifecycle;
use traffic_signal::presenter::ConsolePresenter;

#[derive(Debug, Parser)]
#[command(
    name = "traffic-signal",
    version,
    about = "Traffic signal controller simulation"
)]
struct Args {
    /// Optional YAML file with runtime options
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    // Quiet by default so logs do not scribble over the signal panel.
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args { config, verbose } = Args::parse();
    init_tracing(verbose);

    let options = match config {
        Some(path) => RuntimeOptions::from_yaml_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
            .validated()
            .context("invalid configuration values")?,
        None => RuntimeOptions::default(),
    };
    tracing::debug!(?options, "runtime options");

    println!("Traffic signal simulation");
    println!("Press Ctrl+C to exit.");

    let lifecycle = Lifecycle::new();

    {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            lifecycle.stop();
        });
    }

    let cancel = lifecycle.cancel_token();
    select! {
        _ = cancel.cancelled() => {
            println!("\nStopped by user.");
            return Ok(());
        }
        _ = sleep(options.startup_delay) => {}
    }

    tracing::info!(
        startup_delay = %format_duration(options.startup_delay),
        "starting signal"
    );
    let running = lifecycle.spawn(
        ConsolePresenter::stdout(options.clear_screen),
        options.presenter_poll,
    );
    running.join().await?;

    println!("\nStopped by user.");
    Ok(())
}
