//! Input line reader task

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};
use tracing::{debug, error, info, warn};

use crate::api::{parse_line, InputMessage};

/// Background task that parses input lines and forwards them to the event loop
pub async fn input_reader_task<R>(reader: R, input_tx: mpsc::Sender<InputMessage>)
where
    R: AsyncBufRead + Unpin,
{
    info!("Starting input reader task");

    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_line(&line) {
                    Ok(message) => {
                        if input_tx.send(message).await.is_err() {
                            debug!("Event loop gone, stopping input reader");
                            break;
                        }
                    }
                    Err(e) => warn!("Skipping input line: {}", e),
                }
            }
            Ok(None) => {
                info!("Input stream ended");
                break;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}
