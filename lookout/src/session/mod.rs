//! Authenticated game server API session.
//!
//! The session owns the HTTP client and the `sid` token captured at login,
//! and exposes the two acquisition capabilities: the roster endpoint and the
//! server-sent-event log stream. Login failures are fatal; everything after
//! login is transient from the caller's point of view.

mod sse;

pub use sse::{SseDecoder, SseEvent};

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Cookie that carries the session token.
const SESSION_COOKIE: &str = "sid";

/// Errors raised at the session boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server rejected the login. Fatal: monitoring must not start.
    #[error("login failed with status {0}")]
    Auth(reqwest::StatusCode),

    /// Login succeeded but no session cookie came back. Fatal.
    #[error("no `sid` cookie present after login")]
    MissingSessionToken,

    /// Transport-level failure. Transient for roster and stream calls.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One player record in the roster response. Fields other than the name are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
}

/// An authenticated session against the game server API.
pub struct ApiSession {
    client: Client,
    api_url: String,
    sid: String,
}

impl ApiSession {
    /// Authenticate against the server and capture the session cookie.
    pub async fn login(
        client: Client,
        api_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, SessionError> {
        let response = client
            .post(format!("{api_url}/session/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Auth(status));
        }

        let sid = response
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(SessionError::MissingSessionToken)?;

        debug!("session established");
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            sid,
        })
    }

    /// Fetch the full current roster.
    pub async fn fetch_roster(&self) -> Result<Vec<PlayerRecord>, SessionError> {
        let records = self
            .client
            .get(format!("{}/api/player", self.api_url))
            .header(reqwest::header::COOKIE, self.cookie_header())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PlayerRecord>>()
            .await?;
        Ok(records)
    }

    /// Open the server-sent-event log stream.
    ///
    /// Returns the raw response; the caller consumes `bytes_stream()` and
    /// decodes it with [`SseDecoder`]. Reconnecting means calling this again.
    pub async fn open_log_stream(&self) -> Result<reqwest::Response, SessionError> {
        let response = self
            .client
            .get(format!("{}/sse/?events=log", self.api_url))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .header(reqwest::header::COOKIE, self.cookie_header())
            .send()
            .await?
            .error_for_status()?;
        Ok(response)
    }

    fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.sid)
    }
}
