//! Broadcast log bus for protocol progress
//!
//! The UI shows a live log of key-exchange progress ("Encrypting key shard
//! 2/4...", "Unsealing shared game key..."). Producers publish plain
//! strings; any number of observers subscribe and each receives every
//! message. Dropping a receiver unsubscribes it, so a subscription is scoped
//! to the receiver's lifetime with no explicit bookkeeping.

use tokio::sync::broadcast;

/// Messages buffered per subscriber before the oldest are dropped
const CHANNEL_CAPACITY: usize = 64;

/// A broadcast channel for human-readable protocol progress messages
///
/// Cloning is cheap and every clone publishes into the same channel.
/// Publishing with no subscribers is not an error; messages are simply
/// dropped. Every published message is also mirrored to `tracing` so
/// progress shows up in ambient logs even without a UI observer.
#[derive(Debug, Clone)]
pub struct LogBus {
    sender: broadcast::Sender<String>,
}

impl Default for LogBus {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to all messages published after this call
    ///
    /// Dropping the returned receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Publish a progress message to all current subscribers
    pub fn publish(&self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::info!("{}", msg);
        // send only fails when there are no subscribers, which is fine
        let _ = self.sender.send(msg);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_every_subscriber_sees_every_message() {
        let bus = LogBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish("first");
        bus.publish("second");

        assert_eq!(a.recv().await.unwrap(), "first");
        assert_eq!(a.recv().await.unwrap(), "second");
        assert_eq!(b.recv().await.unwrap(), "first");
        assert_eq!(b.recv().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let bus = LogBus::new();
        bus.publish("nobody listening");
    }

    #[tokio::test]
    async fn test_dropped_receiver_unsubscribes() {
        let bus = LogBus::new();
        let a = bus.subscribe();
        let mut b = bus.subscribe();
        drop(a);

        bus.publish("still delivered");
        assert_eq!(b.recv().await.unwrap(), "still delivered");
    }
}
