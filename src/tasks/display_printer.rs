//! Display printer task

use std::sync::Arc;
use clap::ValueEnum;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{error, info};

use crate::{api::DisplayResponse, state::AppState};

/// How display frames are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable status line
    Text,
    /// One JSON object per line
    Json,
}

/// Background task that writes one line per published status change
pub async fn display_printer_task<W>(state: Arc<AppState>, format: OutputFormat, mut out: W)
where
    W: AsyncWrite + Unpin,
{
    info!("Starting display printer task ({:?})", format);

    let mut status_rx = state.subscribe();
    let start_trigger = state.settings.gestures.start_trigger.clone();

    loop {
        let snapshot = status_rx.borrow_and_update().clone();
        let response = DisplayResponse::new(&snapshot, &start_trigger);

        let line = match format {
            OutputFormat::Text => Some(response.render_line()),
            OutputFormat::Json => serde_json::to_string(&response)
                .map_err(|e| error!("Failed to encode display frame: {}", e))
                .ok(),
        };

        if let Some(mut line) = line {
            line.push('\n');
            if let Err(e) = out.write_all(line.as_bytes()).await {
                error!("Failed to write display frame: {}", e);
                break;
            }
            if let Err(e) = out.flush().await {
                error!("Failed to flush display output: {}", e);
                break;
            }
        }

        if status_rx.changed().await.is_err() {
            break;
        }
    }
}
