//! Gesture Stopwatch - a countdown and stopwatch driven by hand gestures
//!
//! This is the main entry point for the gesture-stopwatch application.

use std::sync::Arc;
use tokio::{io::BufReader, sync::mpsc};
use tracing::info;

use gesture_stopwatch::{
    config::Config,
    state::AppState,
    tasks::{display_printer_task, event_loop_task, input_reader_task},
    utils::{shutdown_signal, shutdown_signals},
};

/// Input messages buffered between the reader and the event loop
const INPUT_CHANNEL_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout carries display frames
    tracing_subscriber::fmt()
        .with_env_filter(format!("gesture_stopwatch={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting gesture-stopwatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: start={}, stop={}, tick={}ms, resumable={}, gesture_stops_manual={}",
          config.start_gesture, config.stop_gesture, config.tick_ms,
          config.resumable, config.gesture_stops_manual);

    let signals = shutdown_signals()?;

    // Create application state
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let state = Arc::new(AppState::new(config.settings(), tick_tx));

    // Start the input reader and display printer
    let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    tokio::spawn(input_reader_task(BufReader::new(tokio::io::stdin()), input_tx));
    let printer = tokio::spawn(display_printer_task(
        Arc::clone(&state),
        config.format,
        tokio::io::stdout(),
    ));

    info!("Reading input lines from stdin:");
    info!("  {{\"type\":\"gesture\",\"gestureName\":\"...\",\"isActive\":true}} - Recognizer frame");
    info!("  {{\"type\":\"command\",\"command\":\"start|stop|reset\"}}        - Manual command");
    info!("  start | stop | reset                                         - Manual command shorthand");

    event_loop_task(Arc::clone(&state), input_rx, tick_rx, shutdown_signal(signals)).await;

    printer.abort();
    let (last_action, last_action_time) = state.get_last_action();
    info!("Session ended after {} (last action: {} at {})",
          state.get_uptime(),
          last_action.as_deref().unwrap_or("none"),
          last_action_time.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string()));

    // The stdin reader blocks on a read that cannot be cancelled, so exit
    // instead of waiting for runtime shutdown
    std::process::exit(0);
}
