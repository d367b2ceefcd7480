//! Per-user snapshot channels shared by the document stores.
//!
//! A channel lives as long as somebody listens: senders whose receivers have
//! all been dropped are pruned on the next subscribe or publish.

use dialed_core::user::UserDocument;
use std::collections::HashMap;
use tokio::sync::{Mutex, watch};

#[derive(Default)]
pub(crate) struct SnapshotHub {
    channels: Mutex<HashMap<String, watch::Sender<Option<UserDocument>>>>,
}

impl SnapshotHub {
    /// Receiver for `uid`, seeded with `current` when the channel is new.
    pub(crate) async fn subscribe(
        &self,
        uid: &str,
        current: Option<UserDocument>,
    ) -> watch::Receiver<Option<UserDocument>> {
        let mut channels = self.channels.lock().await;
        channels.retain(|_, sender| sender.receiver_count() > 0);
        channels
            .entry(uid.to_string())
            .or_insert_with(|| watch::channel(current).0)
            .subscribe()
    }

    /// Pushes a fresh snapshot to every receiver of `uid`.
    pub(crate) async fn publish(&self, uid: &str, document: &UserDocument) {
        let mut channels = self.channels.lock().await;
        let Some(sender) = channels.get(uid) else {
            return;
        };
        if sender.receiver_count() == 0 {
            channels.remove(uid);
            tracing::debug!(uid, "dropped snapshot channel without receivers");
            return;
        }
        sender.send_replace(Some(document.clone()));
        tracing::debug!(uid, receivers = sender.receiver_count(), "published snapshot");
    }

    #[cfg(test)]
    async fn channel_count(&self) -> usize {
        self.channels.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialed_core::user::UserRole;

    fn document(role: UserRole) -> UserDocument {
        UserDocument {
            role: Some(role),
            ..UserDocument::default()
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_live_receivers() {
        let hub = SnapshotHub::default();
        let mut rx = hub.subscribe("u1", None).await;
        hub.publish("u1", &document(UserRole::Coach)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().and_then(|d| d.role),
            Some(UserRole::Coach)
        );
    }

    #[tokio::test]
    async fn test_channels_without_receivers_are_dropped() {
        let hub = SnapshotHub::default();
        let rx = hub.subscribe("u1", None).await;
        drop(rx);
        hub.publish("u1", &document(UserRole::Coach)).await;
        assert_eq!(hub.channel_count().await, 0);

        let stale = hub.subscribe("u2", None).await;
        drop(stale);
        let _live = hub.subscribe("u3", None).await;
        assert_eq!(hub.channel_count().await, 1);
    }

    #[tokio::test]
    async fn test_resubscribe_after_drop_sees_fresh_seed() {
        let hub = SnapshotHub::default();
        drop(hub.subscribe("u1", Some(document(UserRole::Practice))).await);

        let rx = hub.subscribe("u1", Some(document(UserRole::Coach))).await;
        assert_eq!(rx.borrow().as_ref().and_then(|d| d.role), Some(UserRole::Coach));
    }
}
