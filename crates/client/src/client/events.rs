//! State-change subscriptions.

use situps_core::entry::{EntryKey, EntryStateChange};
use tokio::task::JoinHandle;

use super::{validate_key, SitupsClient, StateChangeSubscription};
use crate::error::{ClientError, Result};

impl SitupsClient {
    /// Listen for updates of `key`.
    ///
    /// Only one subscription per key is live: subscribing again ends the
    /// previous subscription for that key.
    pub async fn subscribe_to_state_change(
        &self,
        key: &EntryKey,
    ) -> Result<StateChangeSubscription> {
        validate_key(key)?;
        let identifier = key.identifier();
        tracing::debug!(key = %identifier, "subscribing to state changes");
        self.dispatcher.subscribe(&identifier).await
    }

    /// Stop listening for updates of `key`. Returns true if a subscription existed.
    pub async fn unsubscribe(&self, key: &EntryKey) -> bool {
        self.dispatcher.unsubscribe(&key.identifier()).await
    }

    /// Calls `on_change` for every update of `key` until the subscription ends.
    pub async fn subscribe_with<F>(
        &self,
        key: &EntryKey,
        mut on_change: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnMut(EntryStateChange) + Send + 'static,
    {
        let mut subscription = self.subscribe_to_state_change(key).await?;

        Ok(tokio::spawn(async move {
            while let Some(change) = subscription.recv().await {
                on_change(change);
            }
            tracing::debug!(key = subscription.key(), "state-change subscription ended");
        }))
    }

    /// Watch updates of `key` as a stream.
    ///
    /// The stream yields [`ClientError::ConnectionClosed`] once and ends when
    /// the connection drops. It ends silently when replaced by a newer
    /// subscription for the same key.
    pub async fn watch_entry(
        &self,
        key: &EntryKey,
    ) -> Result<impl futures_core::Stream<Item = Result<EntryStateChange>>> {
        let mut subscription = self.subscribe_to_state_change(key).await?;
        let dispatcher = std::sync::Arc::clone(&self.dispatcher);

        let stream = async_stream::stream! {
            while let Some(change) = subscription.recv().await {
                yield Ok(change);
            }

            if dispatcher.is_closed() {
                yield Err(ClientError::ConnectionClosed);
            }
        };

        Ok(stream)
    }
}
