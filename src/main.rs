//! touch-recorder: drives the record/stop state machine from stdin
//!
//! Reads newline-delimited JSON touch batches, e.g.
//! `{"phase":"began","touches":[{"id":1,"x":375.0,"y":125.0}]}`,
//! and prints every resulting surface event as a JSON line on stdout.
//! Logs go to stderr. Exits at end of input or on SIGINT/SIGTERM.

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use touch_recorder::config::Config;
use touch_recorder::dispatch::Dispatcher;
use touch_recorder::events::SurfaceEvent;
use touch_recorder::input::InputReader;
use touch_recorder::lifecycle::ShutdownSignal;
use touch_recorder::scene::{ButtonRegion, Scene};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "touch-recorder starting"
    );

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;
    info!(?config, "configuration loaded");

    let shutdown = ShutdownSignal::new();

    // Input reader -> dispatcher
    let (batch_tx, batch_rx) = mpsc::channel(config.queue_capacity);
    // Scene -> stdout
    let (event_tx, mut event_rx) = broadcast::channel::<SurfaceEvent>(config.event_capacity);

    let button = ButtonRegion::for_surface(config.surface_width);
    info!(?button, "button region");

    let scene = Scene::new(button, event_tx);
    let mut dispatcher = Dispatcher::new(scene);

    let input = InputReader::new(batch_tx);
    input.start().context("failed to start input reader")?;

    info!("entering main loop");

    tokio::select! {
        // Feed touch batches through the state machine
        _ = dispatcher.run(batch_rx) => {
            info!("input closed");
        }

        // Print surface events as they happen
        _ = async {
            loop {
                match event_rx.recv().await {
                    Ok(event) => print_event(&event),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "surface event receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        } => {
            info!("surface event stream closed");
        }

        result = shutdown.wait() => {
            match result {
                Ok(()) => info!("shutdown signal received"),
                Err(e) => error!(?e, "failed to register signal handlers"),
            }
        }
    }

    // Flush events published by the final batch
    while let Ok(event) = event_rx.try_recv() {
        print_event(&event);
    }

    info!(state = %dispatcher.state(), "shutting down...");
    input.stop();

    info!("touch-recorder stopped");

    Ok(())
}

fn print_event(event: &SurfaceEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!(%event, ?e, "failed to encode surface event"),
    }
}
