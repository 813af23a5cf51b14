use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::telegram::client::TelegramClient;
use crate::telegram::types::Update;

pub const READY_REPLY: &str = "The bot is set up and ready to send notifications!";

const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// True for `/start`, `/start@SomeBot` and `/start <payload>`.
pub fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    let name = command.split('@').next().unwrap_or_default();
    name == "/start"
}

/// Reply to every `/start` in a batch of updates. Returns the next offset.
/// A failed reply is logged and skipped so the batch is not replayed.
pub async fn handle_updates(client: &TelegramClient, updates: &[Update], offset: i64) -> i64 {
    let mut next = offset;
    for update in updates {
        next = next.max(update.update_id + 1);
        let Some(message) = &update.message else {
            continue;
        };
        if !message.text.as_deref().is_some_and(is_start_command) {
            continue;
        }
        match client.reply(message.chat.id, READY_REPLY).await {
            Ok(()) => info!(chat_id = message.chat.id, "Answered /start"),
            Err(e) => warn!(chat_id = message.chat.id, error = %e, "Failed to answer /start"),
        }
    }
    next
}

/// Long-poll for `/start` until `running` is cleared.
pub async fn listen(client: &TelegramClient, running: Arc<AtomicBool>) {
    let mut offset = 0;
    info!("Listening for /start");

    while running.load(Ordering::SeqCst) {
        let polled = tokio::select! {
            res = client.get_updates(offset) => res,
            _ = wait_for_stop(&running) => break,
        };
        match polled {
            Ok(updates) => {
                offset = handle_updates(client, &updates, offset).await;
                debug!(offset, "Poll complete");
            }
            Err(e) => {
                warn!(error = %e, "Polling failed, retrying");
                tokio::select! {
                    _ = sleep(POLL_ERROR_BACKOFF) => {}
                    _ = wait_for_stop(&running) => break,
                }
            }
        }
    }

    info!("Listener stopped");
}

async fn wait_for_stop(running: &AtomicBool) {
    while running.load(Ordering::SeqCst) {
        sleep(Duration::from_millis(200)).await;
    }
}
