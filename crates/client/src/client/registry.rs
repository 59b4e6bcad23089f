//! Routing of server messages to pending requests and state-change listeners.
//!
//! Both registries are keyed by [`EntryKey::identifier`] and hold at most one
//! callback per key: a newer request or subscription replaces the older one.
//!
//! [`EntryKey::identifier`]: situps_core::EntryKey::identifier

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use situps_core::entry::{EntryGetResponse, EntryStateChange};
use situps_core::protocol::ServerMessage;
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::error::{ClientError, Result};

/// Receives state changes for a single entry.
///
/// The subscription ends (`recv` returns `None`) when the connection closes
/// or when another subscription for the same entry replaces it.
#[derive(Debug)]
pub struct StateChangeSubscription {
    key: String,
    receiver: mpsc::UnboundedReceiver<EntryStateChange>,
}

impl StateChangeSubscription {
    /// Identifier of the entry this subscription listens to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Waits for the next state change.
    pub async fn recv(&mut self) -> Option<EntryStateChange> {
        self.receiver.recv().await
    }
}

#[derive(Debug, Default)]
struct Registries {
    pending: HashMap<String, oneshot::Sender<EntryGetResponse>>,
    listeners: HashMap<String, mpsc::UnboundedSender<EntryStateChange>>,
}

#[derive(Debug, Default)]
pub(crate) struct Dispatcher {
    registries: Mutex<Registries>,
    closed: AtomicBool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Registers a pending request, dropping any older waiter for the key.
    pub async fn register_request(
        &self,
        identifier: &str,
    ) -> Result<oneshot::Receiver<EntryGetResponse>> {
        let mut registries = self.registries.lock().await;
        if self.is_closed() {
            return Err(ClientError::ConnectionClosed);
        }

        let (sender, receiver) = oneshot::channel();
        if registries
            .pending
            .insert(identifier.to_string(), sender)
            .is_some()
        {
            tracing::debug!(key = identifier, "superseding pending request");
        }

        Ok(receiver)
    }

    /// Removes the pending request for `identifier` if its waiter is gone.
    pub async fn prune_request(&self, identifier: &str) {
        let mut registries = self.registries.lock().await;
        if registries
            .pending
            .get(identifier)
            .is_some_and(|sender| sender.is_closed())
        {
            registries.pending.remove(identifier);
        }
    }

    /// Registers the listener for `identifier`, replacing any previous one.
    pub async fn subscribe(&self, identifier: &str) -> Result<StateChangeSubscription> {
        let mut registries = self.registries.lock().await;
        if self.is_closed() {
            return Err(ClientError::ConnectionClosed);
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        if registries
            .listeners
            .insert(identifier.to_string(), sender)
            .is_some()
        {
            tracing::debug!(key = identifier, "replacing state-change listener");
        }

        Ok(StateChangeSubscription {
            key: identifier.to_string(),
            receiver,
        })
    }

    /// Removes the listener for `identifier`. Returns true if one existed.
    pub async fn unsubscribe(&self, identifier: &str) -> bool {
        self.registries
            .lock()
            .await
            .listeners
            .remove(identifier)
            .is_some()
    }

    /// Routes a message from the server.
    pub async fn dispatch(&self, message: ServerMessage) {
        let identifier = message.entry_key().identifier();
        let mut registries = self.registries.lock().await;

        match message {
            ServerMessage::GetEntryData(response) => match registries.pending.remove(&identifier) {
                Some(sender) => {
                    if sender.send(response).is_err() {
                        tracing::debug!(key = %identifier, "requester stopped waiting");
                    }
                }
                None => {
                    tracing::warn!(key = %identifier, "no pending request for response");
                }
            },
            update => {
                let Some(change) = update.into_state_change() else {
                    return;
                };
                let delivered = match registries.listeners.get(&identifier) {
                    Some(listener) => listener.send(change).is_ok(),
                    None => {
                        tracing::debug!(key = %identifier, "no listener for state change");
                        return;
                    }
                };
                if !delivered {
                    tracing::debug!(key = %identifier, "dropping closed listener");
                    registries.listeners.remove(&identifier);
                }
            }
        }
    }

    /// Marks the connection closed and releases every waiter and listener.
    pub async fn close(&self) {
        let mut registries = self.registries.lock().await;
        self.closed.store(true, Ordering::Release);

        let pending = registries.pending.len();
        let listeners = registries.listeners.len();
        registries.pending.clear();
        registries.listeners.clear();

        tracing::debug!(pending, listeners, "dispatcher closed");
    }

    #[cfg(test)]
    pub async fn pending_count(&self) -> usize {
        self.registries.lock().await.pending.len()
    }

    /// Pending requests whose caller stopped waiting.
    #[cfg(test)]
    pub async fn abandoned_count(&self) -> usize {
        self.registries
            .lock()
            .await
            .pending
            .values()
            .filter(|sender| sender.is_closed())
            .count()
    }

    #[cfg(test)]
    pub async fn listener_count(&self) -> usize {
        self.registries.lock().await.listeners.len()
    }
}
