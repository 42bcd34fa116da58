// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Simulated sensor demo
//!
//! Starts one generator per configured sensor, attaches a monitor to each,
//! calibrates every sensor once, and shuts the registry down after the
//! configured duration or on Ctrl+C.
//!
//! ```text
//! SensorRegistry (owner)          SensorMonitor (consumers)
//! ┌──────────────────┐           ┌──────────────────┐
//! │ room   ── tick ──│──────────▶│ prints readings  │
//! │ device ── tick ──│──────────▶│ prints readings  │
//! │ city   ── tick ──│──────────▶│ prints readings  │
//! └──────────────────┘           └──────────────────┘
//! ```
//!
//! Run with: `cargo run -p simsense-demo -- --config simsense-demo/config/sensors.toml`

mod monitor;

use clap::Parser;
use monitor::SensorMonitor;
use simsense::{CancellationToken, SensorRegistry, SimulationConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::select;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Run a set of simulated sensors and print what their consumers observe.
#[derive(Parser, Debug)]
#[command(name = "simsense-demo")]
#[command(version, about, long_about = None)]
struct Args {
    /// Sensor configuration (TOML); the built-in room/device/city set if omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds to run before shutting down
    #[arg(short, long, default_value_t = 5)]
    duration_secs: u64,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG wins over --verbose
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    tracing::debug!(?config, "configuration loaded");

    let app_scope = CancellationToken::new();
    let mut registry = SensorRegistry::with_scope(&app_scope);
    for sensor in &config.sensors {
        registry.insert(sensor)?;
    }

    println!("\nSimulated sensors ({}), Ctrl+C to stop\n", registry.len());

    let monitor_scope = app_scope.child_token();
    let mut monitors: Vec<SensorMonitor> = registry
        .iter()
        .map(|(id, sensor)| SensorMonitor::new(id.clone(), sensor.clone(), monitor_scope.clone()))
        .collect();
    for monitor in &mut monitors {
        monitor.start();
    }

    tokio::time::sleep(Duration::from_millis(1500)).await;
    for monitor in &monitors {
        monitor.calibrate(1);
    }

    select! {
        _ = signal::ctrl_c() => {
            println!("\nShutting down...\n");
        }
        () = tokio::time::sleep(Duration::from_secs(args.duration_secs)) => {
            println!("\n{} seconds elapsed, shutting down...\n", args.duration_secs);
        }
    }

    registry.shutdown();
    for monitor in &mut monitors {
        let seen = monitor.join().await;
        tracing::info!(seen, "monitor stopped");
    }

    app_scope.cancel();
    Ok(())
}
