//! Range CLI arguments.

use clap::{Args, ValueEnum};
use situps_core::schedule::{AnchorDate, ScheduleDate, ScheduleDateRangeConfig, WeekNumbering};

use crate::config::ClientConfig;

/// CLI week numbering (with clap ValueEnum).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum WeekNumberingArg {
    /// Monday-aligned weeks counted from January 1st, folded into 1-52.
    #[default]
    Legacy,
    /// ISO-8601 weeks.
    Iso,
}

impl From<WeekNumberingArg> for WeekNumbering {
    fn from(arg: WeekNumberingArg) -> Self {
        match arg {
            WeekNumberingArg::Legacy => WeekNumbering::Legacy,
            WeekNumberingArg::Iso => WeekNumbering::Iso,
        }
    }
}

/// Describes a week-aligned date range.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// Date whose week anchors the range (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub anchor: Option<ScheduleDate>,
    /// Weeks shown before the anchor week.
    #[arg(long)]
    pub previous: Option<u32>,
    /// Weeks shown after the anchor week.
    #[arg(long)]
    pub upcoming: Option<u32>,
    /// Week numbering used for display.
    #[arg(long, value_enum, default_value = "legacy")]
    pub numbering: WeekNumberingArg,
}

impl RangeArgs {
    /// Builds the range configuration, falling back to `defaults` for the
    /// week counts.
    pub fn range_config(&self, defaults: &ClientConfig) -> ScheduleDateRangeConfig {
        ScheduleDateRangeConfig::new(
            self.anchor.map_or(AnchorDate::Now, AnchorDate::Date),
            self.previous.unwrap_or(defaults.previous_weeks),
            self.upcoming.unwrap_or(defaults.upcoming_weeks),
        )
    }
}
