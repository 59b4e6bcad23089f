//! Entry requests.

use situps_core::entry::{Entry, EntryData, EntryGetResponse, EntryKey};
use situps_core::protocol::ClientMessage;

use super::{validate_key, SitupsClient};
use crate::error::{ClientError, Result};

impl SitupsClient {
    /// Request the data stored for `key` and wait for the server's answer.
    ///
    /// A later `get_entry` for the same key supersedes this one, which then
    /// fails with [`ClientError::Superseded`].
    pub async fn get_entry(&self, key: EntryKey) -> Result<EntryGetResponse> {
        validate_key(&key)?;
        let identifier = key.identifier();
        let receiver = self.dispatcher.register_request(&identifier).await?;
        self.send(ClientMessage::get_entry_data(key)).await?;

        match tokio::time::timeout(self.request_timeout, receiver).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) if self.dispatcher.is_closed() => Err(ClientError::ConnectionClosed),
            Ok(Err(_)) => Err(ClientError::Superseded { key: identifier }),
            Err(_) => {
                self.dispatcher.prune_request(&identifier).await;
                tracing::warn!(key = %identifier, "entry request timed out");
                Err(ClientError::Timeout {
                    key: identifier,
                    timeout_ms: self.request_timeout.as_millis() as u64,
                })
            }
        }
    }

    /// Store `amount` for `key`. `None` clears the entry.
    ///
    /// The server acknowledges by broadcasting the update to every
    /// subscriber of the key, this client included.
    pub async fn update_entry(&self, key: EntryKey, amount: Option<u32>) -> Result<()> {
        validate_key(&key)?;
        tracing::debug!(key = %key.identifier(), ?amount, "updating entry");
        let entry = Entry::new(key, EntryData::new(amount));
        self.send(ClientMessage::update_entry(entry)).await
    }
}
