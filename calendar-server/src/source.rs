use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calendar_layout::Event;
use log::debug;

/// Where the flat JSON list of events is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventSource {
    File(PathBuf),
    Url(String),
}

impl From<&str> for EventSource {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl From<String> for EventSource {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl EventSource {
    pub async fn fetch(&self) -> Result<Vec<Event>> {
        let body = match self {
            Self::File(path) => {
                debug!("Reading events from {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?
            }
            Self::Url(url) => {
                debug!("Sending HTTP request to {url}");
                reqwest::get(url)
                    .await
                    .and_then(|resp| resp.error_for_status())
                    .with_context(|| format!("Failed to request {url}"))?
                    .text()
                    .await
                    .with_context(|| format!("Failed to read response body from {url}"))?
            }
        };

        serde_json::from_str(&body).with_context(|| format!("Invalid event list in {self}"))
    }
}
