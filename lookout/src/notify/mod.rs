//! Notification formatting and webhook dispatch.
//!
//! The [`Notifier`] turns transitions into chat messages and pushes them to
//! a [`NotificationSink`]. Delivery is at-most-once: a failed send is logged
//! and the watch cycle continues without it.

use async_trait::async_trait;
use presence::{LineEvent, PlayerSet, TransitionBatch};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Delivery endpoint for finished notification messages.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message. Implementations must not retry.
    async fn deliver(&self, content: &str) -> Result<()>;
}

/// Chat webhook sink: `POST <url>` with a single-field JSON body.
pub struct ChatWebhook {
    client: Client,
    url: String,
}

impl ChatWebhook {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for ChatWebhook {
    async fn deliver(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "content": content }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Delivery(format!("webhook returned {status}")));
        }
        Ok(())
    }
}

/// Formats transitions into chat messages and dispatches them.
pub struct Notifier<S: NotificationSink> {
    sink: S,
}

impl<S: NotificationSink> Notifier<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Announce a polled transition batch.
    ///
    /// At most two messages: one combining all leavers, then one combining
    /// all joiners. Empty groups send nothing.
    pub async fn notify_batch(&self, batch: &TransitionBatch) {
        if !batch.left.is_empty() {
            self.send(format!("{} left the game", format_names(&batch.left)))
                .await;
        }
        if !batch.joined.is_empty() {
            self.send(format!("{} joined the game", format_names(&batch.joined)))
                .await;
        }
    }

    /// Announce a single stream-derived transition.
    pub async fn notify_transition(&self, transition: &LineEvent) {
        let message = match transition {
            LineEvent::Join(name) => format!("**{name}** joined the game"),
            LineEvent::Leave(name) => format!("**{name}** left the game"),
        };
        self.send(message).await;
    }

    async fn send(&self, content: String) {
        debug!(%content, "dispatching notification");
        if let Err(e) = self.sink.deliver(&content).await {
            warn!("notification delivery failed: {e}");
        }
    }
}

/// Render a group of names as `**a**, **b**`.
fn format_names(names: &PlayerSet) -> String {
    names
        .iter()
        .map(|name| format!("**{name}**"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::NotificationSink;
    use crate::{Error, Result};

    /// Handle to the messages a [`RecordingSink`] has delivered.
    pub(crate) type SentMessages = Arc<Mutex<Vec<String>>>;

    /// Sink that records every delivered message.
    pub(crate) struct RecordingSink {
        messages: SentMessages,
    }

    impl RecordingSink {
        /// Create a sink plus a handle for asserting on what it delivered.
        pub(crate) fn new() -> (Self, SentMessages) {
            let messages = SentMessages::default();
            (
                Self {
                    messages: messages.clone(),
                },
                messages,
            )
        }
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn deliver(&self, content: &str) -> Result<()> {
            self.messages.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    /// Sink that fails every delivery.
    pub(crate) struct FailingSink;

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn deliver(&self, _content: &str) -> Result<()> {
            Err(Error::Delivery("webhook returned 503".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use presence::diff;

    use super::test_support::{FailingSink, RecordingSink};
    use super::*;

    fn set(names: &[&str]) -> PlayerSet {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let (sink, sent) = RecordingSink::new();
        let notifier = Notifier::new(sink);

        notifier.notify_batch(&TransitionBatch::default()).await;

        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_sends_leavers_then_joiners() {
        let (sink, sent) = RecordingSink::new();
        let notifier = Notifier::new(sink);
        let batch = diff(&set(&["alice", "bob"]), &set(&["carol"]));

        notifier.notify_batch(&batch).await;

        assert_eq!(
            *sent.lock().unwrap(),
            vec![
                "**alice**, **bob** left the game".to_string(),
                "**carol** joined the game".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_one_sided_batch_sends_one_message() {
        let (sink, sent) = RecordingSink::new();
        let notifier = Notifier::new(sink);
        let batch = diff(&PlayerSet::new(), &set(&["alice"]));

        notifier.notify_batch(&batch).await;

        assert_eq!(
            *sent.lock().unwrap(),
            vec!["**alice** joined the game".to_string()]
        );
    }

    #[tokio::test]
    async fn test_transition_sends_exactly_one_message() {
        let (sink, sent) = RecordingSink::new();
        let notifier = Notifier::new(sink);

        notifier
            .notify_transition(&LineEvent::Join("carol".to_string()))
            .await;
        notifier
            .notify_transition(&LineEvent::Leave("dana".to_string()))
            .await;

        assert_eq!(
            *sent.lock().unwrap(),
            vec![
                "**carol** joined the game".to_string(),
                "**dana** left the game".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let notifier = Notifier::new(FailingSink);
        let batch = diff(&PlayerSet::new(), &set(&["alice"]));

        // Must not panic or surface the error; the cycle continues.
        notifier.notify_batch(&batch).await;
        notifier
            .notify_transition(&LineEvent::Leave("alice".to_string()))
            .await;
    }

    #[test]
    fn test_format_names_renders_in_set_order() {
        assert_eq!(format_names(&set(&["bob", "alice"])), "**alice**, **bob**");
        assert_eq!(format_names(&set(&["solo"])), "**solo**");
    }
}
