//! Main Entrypoint for the Robot Show
//!
//! This binary is a dry run: the show is performed against the in-memory
//! `SimulatedRobot`, not real hardware. `ROBOT_IP` only sets the registry address the
//! simulated connector is asked for and shows up in the logs. Driving a real robot
//! needs a `Connector` for its service registry in place of `SimulatedConnector`.
//!
//! This binary is responsible for:
//! 1. Parsing the command line and loading configuration from the environment.
//! 2. Generating the speech files the show plays.
//! 3. Connecting to the simulated robot and running the show, resting it afterwards.

use anyhow::Context;
use clap::Parser;
use nao_core::{
    Dance, Robot,
    download::SpeechGenerator,
    sim::{SimulatedConnector, SimulatedRobot},
};
use nao_driver::{
    cli::Args,
    config::Config,
    routine::{ShowOutcome, prepare_speech, run_show},
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

/// Listens for the `Ctrl+C` signal so the show can be cut short.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Stopping the show...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!(dance = ?args.dance, "Configuration loaded.");

    // --- 3. Prepare Speech ---
    if args.skip_speech {
        info!("Skipping speech generation.");
    } else {
        let generator = SpeechGenerator::new(&config.sound_location, config.speech_url.as_str())
            .with_voice(config.speech_voice);
        let generated = prepare_speech(&generator)
            .await
            .context("Failed to generate speech")?;
        info!(generated = ?generated, "Speech files are ready.");
    }

    // --- 4. Connect (simulated) ---
    let backend = SimulatedRobot::new("Nao")
        .with_latency(Duration::from_millis(250))
        .with_behavior_duration(Duration::from_secs(10));
    let connector = SimulatedConnector::new(Arc::new(backend));
    let robot = Robot::connect(
        &connector,
        &config.robot_ip,
        Some(config.sound_location.clone()),
    )
    .await
    .context("Failed to connect to robot")?;

    // --- 5. Run the Show ---
    let dance: Dance = args.dance.into();
    let outcome = robot
        .scoped(|robot| {
            Box::pin(async move {
                tokio::select! {
                    outcome = run_show(robot, dance) => outcome,
                    _ = shutdown_signal() => Ok(ShowOutcome::Interrupted),
                }
            })
        })
        .await
        .context("Show failed")?;

    info!(?outcome, "Robot is resting. Goodbye.");
    Ok(())
}
