//! Pretty output formatting.

use situps_core::entry::{total_amount, DayAmount, EntryGetResponse, EntryKey, EntryStateChange};
use situps_core::schedule::{group_by_week, ScheduleDate, ScheduleWeek, WeekNumbering};

/// Format an entry key as `YYYY-MM-DD (user)`.
pub fn format_key(key: &EntryKey) -> String {
    let date = &key.schedule_date;
    format!(
        "{:04}-{:02}-{:02} ({})",
        date.year, date.month, date.day, key.user_id
    )
}

fn format_amount(amount: Option<u32>) -> String {
    match amount {
        Some(amount) => amount.to_string(),
        None => "-".to_string(),
    }
}

fn format_day(date: &ScheduleDate) -> String {
    format!("{} {}", date.weekday().short_name(), date)
}

/// Format weeks for display.
pub fn format_weeks(weeks: &[ScheduleWeek]) -> String {
    if weeks.is_empty() {
        return "No dates in range.".to_string();
    }
    let mut output = format!("WEEKS ({})\n", weeks.len());
    output.push_str(&"-".repeat(40));
    for week in weeks {
        output.push_str(&format!("\nWeek {} (from {})", week.number, week.monday));
        for date in &week.dates {
            output.push_str(&format!("\n  {}", format_day(date)));
        }
        output.push('\n');
    }
    output
}

/// Format the answer to a `get` request.
pub fn format_entry_response(response: &EntryGetResponse) -> String {
    match response.entry_data.and_then(|data| data.amount) {
        Some(amount) => format!("{}: {}", format_key(&response.entry_key), amount),
        None => format!("{}: no amount recorded", format_key(&response.entry_key)),
    }
}

/// Format a state change notification.
pub fn format_state_change(change: &EntryStateChange) -> String {
    let key = format_key(&change.entry_key);
    match change.new_value.amount {
        Some(amount) => format!("{} -> {}", key, amount),
        None => format!("{} cleared", key),
    }
}

/// Format the amounts of a range, one week per block with weekly totals.
pub fn format_day_amounts(days: &[DayAmount], numbering: WeekNumbering) -> String {
    if days.is_empty() {
        return "No dates in range.".to_string();
    }

    let weeks = group_by_week(days.iter().map(|day| day.date), numbering);
    let mut remaining = days;
    let mut output = String::new();

    for week in &weeks {
        let (current, rest) = remaining.split_at(week.len());
        remaining = rest;

        output.push_str(&format!("Week {} (from {})\n", week.number, week.monday));
        for day in current {
            output.push_str(&format!(
                "  {}  {:>6}\n",
                format_day(&day.date),
                format_amount(day.amount)
            ));
        }
        output.push_str(&format!("  {:<14}  {:>6}\n", "total", total_amount(current)));
    }

    output.push_str(&"-".repeat(40));
    output.push_str(&format!("\nTOTAL {}", total_amount(days)));
    output
}
