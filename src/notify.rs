use tracing::{error, info};

use crate::config::Config;
use crate::error::NotifyError;
use crate::message;
use crate::outcome::{OutputSink, DELIVERED, NOT_DELIVERED};
use crate::telegram::client::TelegramClient;

/// Step output key read back by the workflow.
pub const OUTPUT_KEY: &str = "status";

/// Load config, send one notification, record the outcome.
///
/// Configuration errors return before any request is made and before anything
/// is written to the sink.
pub async fn run<F>(lookup: F, sink: &OutputSink) -> Result<(), NotifyError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = Config::from_lookup(lookup)?;
    let client = TelegramClient::new(&config.notify.api_url, &config.notify.token)?;
    deliver(&config, &client, sink).await
}

/// Send the rendered message once and write the outcome line on both paths.
pub async fn deliver(
    config: &Config,
    client: &TelegramClient,
    sink: &OutputSink,
) -> Result<(), NotifyError> {
    let text = message::render(&config.run, &config.notify.raw_status, config.notify.status);

    info!(
        repository = %config.run.repository,
        workflow = %config.run.workflow,
        ref_name = %config.run.ref_name,
        status = ?config.notify.status,
        chat_id = %config.notify.chat_id,
        output = ?sink.path(),
        "Sending notification"
    );

    match client.send_message(&config.notify.chat_id, &text).await {
        Ok(()) => {
            sink.set(OUTPUT_KEY, DELIVERED)?;
            info!(chat_id = %config.notify.chat_id, "Notification delivered");
            Ok(())
        }
        Err(e) => {
            if let Err(write_err) = sink.set(OUTPUT_KEY, NOT_DELIVERED) {
                error!(error = %write_err, "Failed to record delivery failure");
            }
            error!(
                chat_id = %config.notify.chat_id,
                error = ?e,
                "Notification has not been delivered"
            );
            Err(e.into())
        }
    }
}
