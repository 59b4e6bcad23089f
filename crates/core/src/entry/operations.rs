use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::{EntryGetResponse, GregorianDate};
use crate::schedule::ScheduleDate;

/// The amount recorded on a single day, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAmount {
    pub date: ScheduleDate,
    pub amount: Option<u32>,
}

/// Pairs every date with the amount found in `responses`.
///
/// Dates without a response, or whose response carries no data, get `None`.
/// When several responses share a date the last one wins.
pub fn build_day_amounts(dates: &[ScheduleDate], responses: &[EntryGetResponse]) -> Vec<DayAmount> {
    let by_date: HashMap<GregorianDate, Option<u32>> = responses
        .iter()
        .map(|response| {
            (
                response.entry_key.schedule_date,
                response.entry_data.and_then(|data| data.amount),
            )
        })
        .collect();

    dates
        .iter()
        .map(|date| DayAmount {
            date: *date,
            amount: by_date
                .get(&GregorianDate::from(*date))
                .copied()
                .flatten(),
        })
        .collect()
}

/// Sum of all recorded amounts.
pub fn total_amount(days: &[DayAmount]) -> u64 {
    days.iter()
        .filter_map(|day| day.amount)
        .map(u64::from)
        .sum()
}
