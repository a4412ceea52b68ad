//! Watch drivers.
//!
//! Exactly one driver runs per process: the roster poller or the log stream
//! reader. Both feed the same diff/notify contract and stop on cancellation.

mod poller;
mod stream;

use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::config::{Config, WatchMode};
use crate::notify::{NotificationSink, Notifier};
use crate::session::ApiSession;

/// Run the configured watch driver until cancellation.
pub async fn run<S: NotificationSink>(
    config: &Config,
    session: &ApiSession,
    notifier: &Notifier<S>,
    cancel: CancellationToken,
) -> Result<()> {
    match config.mode {
        WatchMode::Poll => poller::run(session, notifier, config.poll_interval, cancel).await,
        WatchMode::Stream => stream::run(session, notifier, cancel).await,
    }
}
