use std::path::PathBuf;
use thiserror::Error;

/// Bad or missing inputs. Raised before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is required (set {var})")]
    MissingInput {
        name: &'static str,
        var: &'static str,
    },
    #[error("unknown status {0:?}, expected one of: success, failure, cancelled")]
    UnknownStatus(String),
}

/// The single sendMessage attempt failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request to Telegram failed")]
    Transport(#[source] reqwest::Error),
    #[error("Telegram returned HTTP {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Telegram rejected the request ({code}): {description}")]
    Api { code: i64, description: String },
    #[error("failed to decode Telegram response")]
    Decode(#[source] reqwest::Error),
}

/// The HTTP client could not be constructed. Nothing was sent.
#[derive(Debug, Error)]
#[error("failed to build HTTP client")]
pub struct BuildError(#[source] pub reqwest::Error);

#[derive(Debug, Error)]
#[error("failed to write CI output to {}", path.display())]
pub struct OutputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Everything the notification flow can fail with.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("notification has not been delivered")]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error(transparent)]
    Setup(#[from] BuildError),
}
