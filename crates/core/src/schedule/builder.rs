use serde::{Deserialize, Serialize};

use super::date::ScheduleDate;
use super::range::InclusiveScheduleDateRange;
use super::weekday::Weekday;

/// Reference point of a week-aligned range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorDate {
    /// A fixed date.
    Date(ScheduleDate),
    /// Whatever today is when the range gets built.
    #[default]
    Now,
}

impl AnchorDate {
    /// Resolves the anchor, using `today` for [`AnchorDate::Now`].
    pub fn resolve(&self, today: ScheduleDate) -> ScheduleDate {
        match self {
            AnchorDate::Date(date) => *date,
            AnchorDate::Now => today,
        }
    }
}

impl From<ScheduleDate> for AnchorDate {
    fn from(date: ScheduleDate) -> Self {
        AnchorDate::Date(date)
    }
}

/// Describes a range of whole weeks around an anchor date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDateRangeConfig {
    pub anchor_date: AnchorDate,
    pub previous_weeks_amount: u32,
    pub upcoming_weeks_amount: u32,
}

impl ScheduleDateRangeConfig {
    pub fn new(
        anchor_date: impl Into<AnchorDate>,
        previous_weeks_amount: u32,
        upcoming_weeks_amount: u32,
    ) -> Self {
        Self {
            anchor_date: anchor_date.into(),
            previous_weeks_amount,
            upcoming_weeks_amount,
        }
    }

    /// Builds the range, reading the system clock if the anchor is `Now`.
    pub fn build(&self) -> InclusiveScheduleDateRange {
        self.build_at(ScheduleDate::today())
    }

    /// Builds the range from the Monday `previous_weeks_amount` weeks before
    /// the anchor's week to the Sunday `upcoming_weeks_amount` weeks after it.
    ///
    /// ```
    /// use situps_core::{ScheduleDate, ScheduleDateRangeConfig};
    ///
    /// let wednesday = ScheduleDate::from_gregorian(2024, 3, 6).unwrap();
    /// let range = ScheduleDateRangeConfig::new(wednesday, 0, 0).build_at(wednesday);
    ///
    /// assert_eq!(range.begin.to_string(), "2024-03-04");
    /// assert_eq!(range.end.to_string(), "2024-03-10");
    /// ```
    pub fn build_at(&self, today: ScheduleDate) -> InclusiveScheduleDateRange {
        let anchor = self
            .anchor_date
            .resolve(today)
            .reversed_to_weekday(Weekday::Monday);
        let year = anchor.year();
        let offset = i64::from(anchor.day_offset());

        let begin = ScheduleDate::new(year, offset - i64::from(self.previous_weeks_amount) * 7)
            .reversed_to_weekday(Weekday::Monday);

        // Monday of the week after the last upcoming week, snapped back to
        // the Sunday before it.
        let end = ScheduleDate::new(
            year,
            offset + (i64::from(self.upcoming_weeks_amount) + 1) * 7,
        )
        .reversed_to_weekday(Weekday::Sunday);

        InclusiveScheduleDateRange::new(begin, end)
    }
}
