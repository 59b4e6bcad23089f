//! Entry CLI arguments.

use clap::Args;
use situps_core::schedule::ScheduleDate;

use super::range::RangeArgs;

/// Arguments of `get`.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Entry date (YYYY-MM-DD).
    #[arg(long)]
    pub date: ScheduleDate,
}

/// Arguments of `update`.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Entry date (YYYY-MM-DD).
    #[arg(long)]
    pub date: ScheduleDate,
    /// Amount to record.
    #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
    pub amount: Option<u32>,
    /// Remove the recorded amount.
    #[arg(long)]
    pub clear: bool,
}

impl UpdateArgs {
    /// The value to store. `None` clears the entry.
    pub fn new_amount(&self) -> Option<u32> {
        if self.clear {
            None
        } else {
            self.amount
        }
    }
}

/// Arguments of `load`.
#[derive(Debug, Clone, Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}
