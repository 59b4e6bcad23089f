//! Events CLI arguments.

use clap::Args;
use situps_core::schedule::ScheduleDate;

/// Arguments of `watch`.
#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Entry date to watch (YYYY-MM-DD).
    #[arg(long)]
    pub date: ScheduleDate,
}
