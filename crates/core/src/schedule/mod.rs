mod builder;
mod date;
mod error;
mod grouping;
mod range;
mod weekday;

pub use builder::{AnchorDate, ScheduleDateRangeConfig};
pub use date::{days_in_year, is_leap_year, ScheduleDate};
pub use error::{Result, ScheduleDateError};
pub use grouping::{group_by_week, ScheduleWeek};
pub use range::{InclusiveScheduleDateRange, ScheduleDateIter};
pub use weekday::{WeekNumbering, Weekday};
