mod operations;
mod types;

pub use operations::{build_day_amounts, total_amount, DayAmount};
pub use types::{
    Entry, EntryData, EntryGetResponse, EntryKey, EntryStateChange, GregorianDate, UserId,
};
