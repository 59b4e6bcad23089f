//! situps_core - functional core for the situps tracker.
//!
//! Everything in this crate is pure: calendar arithmetic, week-aligned date
//! ranges, entry types and the line-delimited wire protocol spoken with the
//! live-update server. The socket client lives in `situps_client`.

pub mod entry;
pub mod protocol;
pub mod schedule;

pub use entry::{EntryData, EntryKey, GregorianDate};
pub use schedule::{
    AnchorDate, InclusiveScheduleDateRange, ScheduleDate, ScheduleDateError,
    ScheduleDateRangeConfig, ScheduleWeek, WeekNumbering, Weekday,
};
