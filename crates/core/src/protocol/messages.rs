use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryGetResponse, EntryKey, EntryStateChange};

/// Payload of a `getEntryData` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEntryDataRequest {
    pub entry_key: EntryKey,
}

/// Payload of an `updateEntry` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub entry: Entry,
}

/// Messages sent from the client to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientMessage {
    /// Sent once, right after the connection is established.
    AckConnect,
    GetEntryData(GetEntryDataRequest),
    UpdateEntry(UpdateEntryRequest),
}

impl ClientMessage {
    pub fn get_entry_data(entry_key: EntryKey) -> Self {
        ClientMessage::GetEntryData(GetEntryDataRequest { entry_key })
    }

    pub fn update_entry(entry: Entry) -> Self {
        ClientMessage::UpdateEntry(UpdateEntryRequest { entry })
    }
}

/// Messages sent from the server to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerMessage {
    /// Answer to a [`ClientMessage::GetEntryData`] request.
    GetEntryData(EntryGetResponse),
    /// Broadcast whenever an entry is updated, by any client.
    UpdateEntry(Entry),
}

impl ServerMessage {
    /// Key of the entry this message is about.
    pub fn entry_key(&self) -> &EntryKey {
        match self {
            ServerMessage::GetEntryData(response) => &response.entry_key,
            ServerMessage::UpdateEntry(entry) => &entry.id,
        }
    }

    /// Interprets an update broadcast as a state change.
    pub fn into_state_change(self) -> Option<EntryStateChange> {
        match self {
            ServerMessage::UpdateEntry(entry) => Some(entry.into()),
            ServerMessage::GetEntryData(_) => None,
        }
    }
}
