//! Log stream driver.
//!
//! Reads the server-sent-event log stream and turns matching lines into
//! notifications, one per transition, in server log order. Each decoded
//! event is processed to completion before the next read. Heartbeats,
//! unrelated log lines, and malformed payloads are expected traffic and are
//! skipped without raising errors.
//!
//! This driver holds no player set: every matched line is itself a
//! transition.

use std::time::Duration;

use futures::StreamExt;
use presence::parse_line;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::Result;
use crate::notify::{NotificationSink, Notifier};
use crate::session::{ApiSession, SessionError, SseDecoder};

/// Delay before re-opening the stream after it ends or errors.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// One record on the `log` event stream. Everything but `msg` is ignored.
#[derive(Debug, Deserialize)]
struct LogRecord {
    #[serde(default)]
    msg: Option<String>,
}

pub(super) async fn run<S: NotificationSink>(
    session: &ApiSession,
    notifier: &Notifier<S>,
    cancel: CancellationToken,
) -> Result<()> {
    info!("watching log stream");

    let mut consecutive_failures: u32 = 0;
    loop {
        match watch_connection(session, notifier, &cancel).await {
            Ok(Outcome::Cancelled) => return Ok(()),
            Ok(Outcome::StreamEnded) => {
                consecutive_failures = 0;
                info!("log stream ended, reconnecting");
            }
            Err(e) => {
                consecutive_failures += 1;
                warn!(consecutive_failures, "log stream failed: {e}");
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
        }
    }
}

enum Outcome {
    Cancelled,
    StreamEnded,
}

/// Read one connection to exhaustion.
async fn watch_connection<S: NotificationSink>(
    session: &ApiSession,
    notifier: &Notifier<S>,
    cancel: &CancellationToken,
) -> std::result::Result<Outcome, SessionError> {
    let response = session.open_log_stream().await?;
    let mut stream = response.bytes_stream();
    let mut decoder = SseDecoder::new();

    loop {
        let chunk = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                info!("stream watcher shutting down");
                return Ok(Outcome::Cancelled);
            }
            chunk = stream.next() => chunk,
        };

        let Some(chunk) = chunk else {
            return Ok(Outcome::StreamEnded);
        };
        for event in decoder.feed(&chunk?) {
            handle_event(&event.data, notifier).await;
        }
    }
}

/// Process one decoded event to completion.
async fn handle_event<S: NotificationSink>(data: &str, notifier: &Notifier<S>) {
    if data.is_empty() {
        return;
    }
    let Ok(record) = serde_json::from_str::<LogRecord>(data) else {
        debug!("skipping non-JSON event payload");
        return;
    };
    let Some(msg) = record.msg else {
        return;
    };
    if let Some(transition) = parse_line(&msg) {
        notifier.notify_transition(&transition).await;
    }
}
