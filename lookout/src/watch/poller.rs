//! Roster polling driver.
//!
//! One cycle: fetch the roster, diff against the previously observed set,
//! notify, sleep. Cycles never overlap. The known set is replaced wholesale
//! after every successful observation; a failed fetch skips the cycle and
//! leaves it untouched, so a transient error is never reported as everyone
//! leaving.
//!
//! An empty roster that the server actually returned does report every known
//! player as left. That is indistinguishable from a partial response the
//! server served with a success status; the next successful poll heals the
//! state either way.

use std::time::Duration;

use presence::{PlayerSet, diff};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::Result;
use crate::notify::{NotificationSink, Notifier};
use crate::session::ApiSession;

pub(super) async fn run<S: NotificationSink>(
    session: &ApiSession,
    notifier: &Notifier<S>,
    interval: Duration,
    cancel: CancellationToken,
) -> Result<()> {
    info!(interval_secs = interval.as_secs(), "polling roster");

    let mut known = PlayerSet::new();
    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                info!("poller shutting down");
                return Ok(());
            }
            result = session.fetch_roster() => match result {
                Ok(records) => {
                    let observed: PlayerSet =
                        records.into_iter().map(|record| record.name).collect();
                    let batch = diff(&known, &observed);
                    known = observed;

                    if !batch.is_empty() {
                        debug!(
                            joined = batch.joined.len(),
                            left = batch.left.len(),
                            "roster changed"
                        );
                        notifier.notify_batch(&batch).await;
                    }
                }
                Err(e) => warn!("roster fetch failed, skipping cycle: {e}"),
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                info!("poller shutting down");
                return Ok(());
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
