use serde::{Deserialize, Serialize};

// --- Envelope ---

/// Every Bot API response is wrapped in `{ "ok": .., "result": .. }`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
}

// --- Requests ---

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: ParseMode,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

// --- Updates ---

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}
