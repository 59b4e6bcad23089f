use serde::{Deserialize, Serialize};

use crate::schedule::{ScheduleDate, ScheduleDateError};

/// Identifier of the user an entry belongs to.
pub type UserId = String;

/// Wire representation of a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GregorianDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl GregorianDate {
    pub fn new(year: i64, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl From<ScheduleDate> for GregorianDate {
    fn from(date: ScheduleDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl TryFrom<GregorianDate> for ScheduleDate {
    type Error = ScheduleDateError;

    fn try_from(date: GregorianDate) -> Result<Self, Self::Error> {
        ScheduleDate::from_gregorian(date.year, date.month, date.day)
    }
}

/// Key used to identify an entry on the server and in the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    #[serde(rename = "userID")]
    pub user_id: UserId,
    #[serde(rename = "scheduleDate")]
    pub schedule_date: GregorianDate,
}

impl EntryKey {
    pub fn new(user_id: impl Into<UserId>, date: ScheduleDate) -> Self {
        Self {
            user_id: user_id.into(),
            schedule_date: date.into(),
        }
    }

    /// Canonical string form of the key, used to match server messages to
    /// pending requests and listeners.
    ///
    /// This is the key's compact JSON serialization.
    pub fn identifier(&self) -> String {
        // Only strings and integers: serializing to a string never fails.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The key's date, validated.
    pub fn date(&self) -> Result<ScheduleDate, ScheduleDateError> {
        ScheduleDate::try_from(self.schedule_date)
    }
}

/// Recorded value of an entry. A `None` amount means nothing was recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryData {
    pub amount: Option<u32>,
}

impl EntryData {
    pub fn new(amount: Option<u32>) -> Self {
        Self { amount }
    }
}

/// An entry as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: EntryKey,
    pub value: EntryData,
}

impl Entry {
    pub fn new(id: EntryKey, value: EntryData) -> Self {
        Self { id, value }
    }
}

/// Answer to a request for an entry's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryGetResponse {
    pub entry_key: EntryKey,
    pub entry_data: Option<EntryData>,
}

/// Notification that an entry's value changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStateChange {
    pub entry_key: EntryKey,
    pub old_value: Option<EntryData>,
    pub new_value: EntryData,
}

impl From<Entry> for EntryStateChange {
    /// The server only reports the new value, so `old_value` is always `None`.
    fn from(entry: Entry) -> Self {
        Self {
            entry_key: entry.id,
            old_value: None,
            new_value: entry.value,
        }
    }
}
