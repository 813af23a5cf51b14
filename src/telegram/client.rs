use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::types::*;
use crate::error::{BuildError, DeliveryError};

/// Server-side long-poll window for getUpdates.
pub const POLL_TIMEOUT_SECS: u64 = 30;

/// Minimal Bot API client. Built once per process.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, BuildError> {
        let http = Client::builder().build().map_err(BuildError)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn call<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, DeliveryError> {
        // The token is part of the path, so reqwest errors are stripped of their URL.
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);

        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            // Bot API errors still carry the JSON envelope; prefer its description.
            return Err(match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
                Ok(ApiResponse {
                    ok: false,
                    error_code,
                    description: Some(description),
                    ..
                }) => DeliveryError::Api {
                    code: error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                    description,
                },
                _ => DeliveryError::Http { status, body },
            });
        }

        let envelope: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| DeliveryError::Decode(e.without_url()))?;
        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                error_code,
                description,
                ..
            } => Err(DeliveryError::Api {
                code: error_code.unwrap_or_default(),
                description: description.unwrap_or_else(|| "missing result".to_string()),
            }),
        }
    }

    /// Send one HTML-formatted message. No retry.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let req = SendMessageRequest {
            chat_id,
            text,
            parse_mode: ParseMode::Html,
        };
        let sent: serde_json::Value = self.call("sendMessage", &req).await?;
        debug!(
            chat_id,
            message_id = sent.get("message_id").and_then(|v| v.as_i64()),
            "Message sent"
        );
        Ok(())
    }

    /// Plain-text reply into a chat by numeric id.
    pub async fn reply(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        let body = serde_json::json!({ "chat_id": chat_id, "text": text });
        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, DeliveryError> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"],
        });
        let updates: Vec<Update> = self.call("getUpdates", &body).await?;
        debug!("Fetched {} updates", updates.len());
        Ok(updates)
    }
}
