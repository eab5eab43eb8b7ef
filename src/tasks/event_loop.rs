//! Stopwatch event loop task

use std::{future::Future, sync::Arc};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{
    api::{handle_input, InputMessage},
    services::TickReceiver,
    state::AppState,
};

/// Serialises schedule ticks and input messages onto one task until `shutdown` resolves
///
/// On exit the stopwatch is torn down, so no schedule outlives the loop.
pub async fn event_loop_task<F>(
    state: Arc<AppState>,
    mut inputs: mpsc::Receiver<InputMessage>,
    mut ticks: TickReceiver,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    info!("Starting stopwatch event loop");

    tokio::pin!(shutdown);
    let mut inputs_open = true;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, tearing down stopwatch");
                break;
            }

            Some(handle) = ticks.recv() => {
                if let Err(e) = state.on_tick(handle) {
                    error!("Failed to apply tick {}: {}", handle, e);
                }
            }

            message = inputs.recv(), if inputs_open => {
                match message {
                    Some(message) => {
                        if let Err(e) = handle_input(&state, message) {
                            error!("Failed to apply input: {}", e);
                        }
                    }
                    None => {
                        info!("Input closed, stopwatch keeps running until shutdown");
                        inputs_open = false;
                    }
                }
            }
        }
    }

    if let Err(e) = state.teardown() {
        error!("Failed to tear down stopwatch: {}", e);
    }
    info!("Stopwatch event loop stopped");
}
