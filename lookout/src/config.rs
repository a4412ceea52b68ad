//! Process configuration.
//!
//! Every setting comes from the environment, optionally via a `.env` file
//! loaded at startup. The API endpoint, webhook endpoint, and credentials
//! are required; the watch mode and poll cadence have defaults.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default poll cadence for [`WatchMode::Poll`] (seconds).
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Which acquisition strategy a running instance uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// Poll the roster endpoint on a fixed cadence and diff snapshots.
    Poll,
    /// Subscribe to the server-sent-event log stream and match lines.
    Stream,
}

impl std::str::FromStr for WatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poll" => Ok(Self::Poll),
            "stream" => Ok(Self::Stream),
            other => Err(Error::config(format!(
                "unknown WATCH_MODE {other:?} (expected \"poll\" or \"stream\")"
            ))),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the game server API, stored without a trailing slash.
    pub api_url: String,
    /// Chat webhook endpoint notifications are POSTed to.
    pub webhook_url: String,
    /// Login name for the game server API.
    pub username: String,
    /// Login password for the game server API.
    pub password: String,
    /// Active acquisition strategy.
    pub mode: WatchMode,
    /// Cadence of roster polls in [`WatchMode::Poll`].
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Absence of any required variable is fatal; monitoring never starts on
    /// a partial configuration.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = required(&lookup, "API_URL")?;
        let webhook_url = required(&lookup, "WEBHOOK_URL")?;
        let username = required(&lookup, "USERNAME")?;
        let password = required(&lookup, "PASSWORD")?;

        Url::parse(&api_url)
            .map_err(|e| Error::config(format!("API_URL is not a valid URL: {e}")))?;
        Url::parse(&webhook_url)
            .map_err(|e| Error::config(format!("WEBHOOK_URL is not a valid URL: {e}")))?;

        let mode = match lookup("WATCH_MODE") {
            Some(value) => value.parse()?,
            None => WatchMode::Stream,
        };

        let poll_interval = match lookup("POLL_INTERVAL_SECS") {
            Some(value) => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        Error::config(format!(
                            "POLL_INTERVAL_SECS must be a positive integer, got {value:?}"
                        ))
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            webhook_url,
            username,
            password,
            mode,
            poll_interval,
        })
    }
}

fn required(lookup: &dyn Fn(&str) -> Option<String>, name: &'static str) -> Result<String> {
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::config(format!("{name} is not set")))
}
