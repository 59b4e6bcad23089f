//! Client-side view of the entries being displayed.

use situps_core::entry::{build_day_amounts, DayAmount, EntryGetResponse, EntryKey};
use situps_core::schedule::{
    InclusiveScheduleDateRange, ScheduleDate, ScheduleDateRangeConfig, ScheduleWeek,
    WeekNumbering,
};

use crate::client::{SitupsClient, StateChangeSubscription};
use crate::error::{ClientError, Result};

/// Holds a client together with the dates currently on screen.
#[derive(Debug, Clone)]
pub struct EntriesStore {
    client: SitupsClient,
    schedule_dates: Vec<ScheduleDate>,
}

impl EntriesStore {
    /// Creates a store with no dates selected.
    pub fn new(client: SitupsClient) -> Self {
        Self {
            client,
            schedule_dates: Vec::new(),
        }
    }

    pub fn client(&self) -> &SitupsClient {
        &self.client
    }

    /// Selects every date from `from` to `to`, both inclusive.
    ///
    /// Selects nothing if `from` comes after `to`.
    pub fn set_schedule_date_range(&mut self, from: ScheduleDate, to: ScheduleDate) {
        self.set_range(InclusiveScheduleDateRange::new(from, to));
    }

    /// Selects the dates described by `config`, reading the clock if needed.
    pub fn set_range_config(&mut self, config: &ScheduleDateRangeConfig) {
        self.set_range(config.build());
    }

    pub fn set_range(&mut self, range: InclusiveScheduleDateRange) {
        self.schedule_dates = range.iter().collect();
        tracing::debug!(
            begin = %range.begin,
            end = %range.end,
            days = self.schedule_dates.len(),
            "schedule range selected"
        );
    }

    pub fn schedule_dates(&self) -> &[ScheduleDate] {
        &self.schedule_dates
    }

    /// Selected dates grouped into Monday-to-Sunday weeks.
    pub fn weeks(&self, numbering: WeekNumbering) -> Vec<ScheduleWeek> {
        situps_core::schedule::group_by_week(self.schedule_dates.iter().copied(), numbering)
    }

    pub async fn get_entry(&self, key: EntryKey) -> Result<EntryGetResponse> {
        self.client.get_entry(key).await
    }

    pub async fn update_entry(&self, key: EntryKey, amount: Option<u32>) -> Result<()> {
        self.client.update_entry(key, amount).await
    }

    pub async fn subscribe_to_state_change(
        &self,
        key: &EntryKey,
    ) -> Result<StateChangeSubscription> {
        self.client.subscribe_to_state_change(key).await
    }

    /// Fetches the amount `user_id` recorded on every selected date.
    ///
    /// Requests are issued concurrently. The first failure aborts the
    /// requests still in flight and is returned.
    pub async fn load_amounts(&self, user_id: &str) -> Result<Vec<DayAmount>> {
        let handles: Vec<_> = self
            .schedule_dates
            .iter()
            .map(|date| {
                let client = self.client.clone();
                let key = EntryKey::new(user_id, *date);
                tokio::spawn(async move { client.get_entry(key).await })
            })
            .collect();

        let mut responses = Vec::with_capacity(handles.len());
        let mut handles = handles.into_iter();
        while let Some(handle) = handles.next() {
            match handle.await.map_err(ClientError::from).and_then(|result| result) {
                Ok(response) => responses.push(response),
                Err(e) => {
                    for pending in handles {
                        pending.abort();
                    }
                    tracing::warn!(user = user_id, error = %e, "loading entry amounts failed");
                    return Err(e);
                }
            }
        }

        tracing::info!(user = user_id, days = responses.len(), "loaded entry amounts");
        Ok(build_day_amounts(&self.schedule_dates, &responses))
    }
}
