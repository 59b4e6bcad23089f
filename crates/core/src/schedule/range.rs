use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::date::ScheduleDate;
use super::grouping::{group_by_week, ScheduleWeek};
use super::weekday::WeekNumbering;

/// A range of dates where both `begin` and `end` are included.
///
/// The range is not validated: a `begin` after `end` is a valid, empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InclusiveScheduleDateRange {
    pub begin: ScheduleDate,
    pub end: ScheduleDate,
}

impl InclusiveScheduleDateRange {
    pub fn new(begin: ScheduleDate, end: ScheduleDate) -> Self {
        Self { begin, end }
    }

    /// Returns a fresh iterator over the dates of this range.
    pub fn iter(&self) -> ScheduleDateIter {
        ScheduleDateIter::new(self.begin, self.end)
    }

    /// Returns true if the range holds no dates.
    pub fn is_empty(&self) -> bool {
        self.end.before(&self.begin)
    }

    /// Number of dates in the range.
    pub fn len(&self) -> usize {
        self.iter().len()
    }

    pub fn contains(&self, date: &ScheduleDate) -> bool {
        !date.before(&self.begin) && !self.end.before(date)
    }

    /// Groups the dates of this range by Monday-aligned week.
    pub fn weeks(&self, numbering: WeekNumbering) -> Vec<ScheduleWeek> {
        group_by_week(self.iter(), numbering)
    }
}

impl IntoIterator for InclusiveScheduleDateRange {
    type Item = ScheduleDate;
    type IntoIter = ScheduleDateIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &InclusiveScheduleDateRange {
    type Item = ScheduleDate;
    type IntoIter = ScheduleDateIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Single-pass iterator over consecutive dates, one calendar day per step.
#[derive(Debug, Clone)]
pub struct ScheduleDateIter {
    current: ScheduleDate,
    /// First date past the range.
    end: ScheduleDate,
}

impl ScheduleDateIter {
    /// Iterates from `begin` through `end`, inclusive.
    pub fn new(begin: ScheduleDate, end: ScheduleDate) -> Self {
        Self {
            current: begin,
            end: end.succ(),
        }
    }

    // Saturates for spans longer than `usize::MAX` days.
    fn remaining(&self) -> usize {
        let days = (self.end.day_number() - self.current.day_number()).max(0);
        usize::try_from(days).unwrap_or(usize::MAX)
    }
}

impl Iterator for ScheduleDateIter {
    type Item = ScheduleDate;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.current.before(&self.end) {
            return None;
        }

        let value = self.current;
        self.current = value.succ();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScheduleDateIter {}

impl FusedIterator for ScheduleDateIter {}
