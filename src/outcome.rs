use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::OutputError;

pub const DELIVERED: &str = "Successfully delivered";
pub const NOT_DELIVERED: &str = "Notification has not been delivered";

/// Where `key=value` step outputs go. Usually `$GITHUB_OUTPUT`.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    path: Option<PathBuf>,
}

impl OutputSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A sink that only logs. Used when running outside a CI runner.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn from_env() -> Self {
        match std::env::var_os("GITHUB_OUTPUT") {
            Some(p) if !p.is_empty() => Self::new(p),
            _ => Self::disabled(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one `name=value` line. Values are written as-is.
    pub fn set(&self, name: &str, value: &str) -> Result<(), OutputError> {
        let Some(path) = &self.path else {
            // Runners always set it; only local runs get here.
            warn!(
                name,
                value,
                "GITHUB_OUTPUT not set, step output not recorded; on a CI runner this is a misconfiguration"
            );
            return Ok(());
        };
        append_line(path, &format!("{}={}", name, value)).map_err(|source| OutputError {
            path: path.clone(),
            source,
        })?;
        info!(name, value, "Step output written");
        Ok(())
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}
