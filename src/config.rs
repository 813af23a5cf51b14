use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Outcome of the CI run being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    Cancelled,
}

impl Status {
    pub fn icon(self) -> &'static str {
        match self {
            Status::Success => "🟢",
            Status::Failure => "🔴",
            Status::Cancelled => "⚪️",
        }
    }
}

impl FromStr for Status {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(Status::Success),
            "failure" => Ok(Status::Failure),
            "cancelled" => Ok(Status::Cancelled),
            _ => Err(ConfigError::UnknownStatus(s.to_string())),
        }
    }
}

/// CI metadata for the run. Every field is optional upstream and becomes an
/// empty string when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    pub server_url: String,
    pub repository: String,
    pub workflow: String,
    pub ref_name: String,
    pub commit: String,
    pub run_id: String,
}

impl RunContext {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            server_url: get("GITHUB_SERVER_URL"),
            repository: get("GITHUB_REPOSITORY"),
            workflow: get("GITHUB_WORKFLOW"),
            ref_name: get("GITHUB_REF_NAME"),
            commit: get("GITHUB_SHA"),
            run_id: get("GITHUB_RUN_ID"),
        }
    }

    pub fn repo_url(&self) -> String {
        format!("{}/{}", self.server_url, self.repository)
    }

    pub fn ref_url(&self) -> String {
        format!("{}/tree/{}", self.repo_url(), self.ref_name)
    }

    pub fn commit_url(&self) -> String {
        format!("{}/commit/{}", self.repo_url(), self.commit)
    }

    pub fn run_url(&self) -> String {
        format!("{}/actions/runs/{}", self.repo_url(), self.run_id)
    }
}

/// Bot credentials, destination and the status to report.
#[derive(Clone)]
pub struct NotifyConfig {
    pub token: String,
    pub chat_id: String,
    /// Status token exactly as supplied, shown in the message.
    pub raw_status: String,
    pub status: Status,
    pub api_url: String,
}

// Keeps the token out of logs.
impl fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("raw_status", &self.raw_status)
            .field("status", &self.status)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl NotifyConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = required(&lookup, "Telegram token", "INPUT_TOKEN")?;
        let chat_id = required(&lookup, "Telegram chat_id", "INPUT_CHAT_ID")?;
        let raw_status = required(&lookup, "GitHub status", "INPUT_STATUS")?;
        let status = raw_status.parse()?;
        Ok(Self {
            token,
            chat_id,
            raw_status,
            status,
            api_url: api_url(&lookup),
        })
    }
}

/// Everything the notify flow needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub run: RunContext,
    pub notify: NotifyConfig,
}

impl Config {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let notify = NotifyConfig::from_lookup(&lookup)?;
        Ok(Self {
            run: RunContext::from_lookup(&lookup),
            notify,
        })
    }
}

/// Settings for the `/start` responder. Only the token is needed.
#[derive(Clone)]
pub struct ListenConfig {
    pub token: String,
    pub api_url: String,
}

impl ListenConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            token: required(&lookup, "Telegram token", "INPUT_TOKEN")?,
            api_url: api_url(&lookup),
        })
    }
}

pub fn is_listen_mode() -> bool {
    env_var("INPUT_LISTEN")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// Process-environment lookup, for the `from_lookup` constructors.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn required<F>(lookup: &F, name: &'static str, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).ok_or(ConfigError::MissingInput { name, var })
}

fn api_url<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("TELEGRAM_API_URL")
        .filter(|u| !u.is_empty())
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}
