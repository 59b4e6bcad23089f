use serde::{Deserialize, Serialize};

use super::date::ScheduleDate;
use super::weekday::{WeekNumbering, Weekday};

/// A run of dates that fall in the same Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWeek {
    /// Monday of the week, even if it is not part of `dates`.
    pub monday: ScheduleDate,
    /// Week number of `monday` under the numbering used for grouping.
    pub number: u32,
    pub dates: Vec<ScheduleDate>,
}

impl ScheduleWeek {
    /// Creates an empty week starting on the Monday on or before `date`.
    pub fn containing(date: ScheduleDate, numbering: WeekNumbering) -> Self {
        let monday = date.reversed_to_weekday(Weekday::Monday);
        Self {
            monday,
            number: monday.week_of_year(numbering),
            dates: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Groups ascending dates into weeks.
///
/// Consecutive dates sharing a Monday end up in the same group, so a week
/// spanning New Year's stays whole instead of being split by year.
pub fn group_by_week<I>(dates: I, numbering: WeekNumbering) -> Vec<ScheduleWeek>
where
    I: IntoIterator<Item = ScheduleDate>,
{
    let mut weeks: Vec<ScheduleWeek> = Vec::new();

    for date in dates {
        let monday = date.reversed_to_weekday(Weekday::Monday);
        match weeks.last_mut() {
            Some(week) if week.monday == monday => week.dates.push(date),
            _ => {
                let mut week = ScheduleWeek::containing(date, numbering);
                week.dates.push(date);
                weeks.push(week);
            }
        }
    }

    weeks
}
