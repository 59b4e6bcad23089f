//! JSON output formatting.

/// Format a value as compact JSON, one document per line.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Format a value as indented JSON.
pub fn format_json_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use situps_core::entry::{DayAmount, EntryKey};
    use situps_core::ScheduleDate;

    #[test]
    fn test_dates_serialize_as_strings() {
        let day = DayAmount {
            date: ScheduleDate::from_gregorian(2024, 2, 29).unwrap(),
            amount: Some(3),
        };

        assert_eq!(format_json(&day), r#"{"date":"2024-02-29","amount":3}"#);
    }

    #[test]
    fn test_entry_key_uses_wire_names() {
        let key = EntryKey::new("ada", ScheduleDate::from_gregorian(2024, 3, 6).unwrap());
        let output = format_json_pretty(&key);

        assert!(output.contains("\"userID\": \"ada\""));
        assert!(output.contains("\"scheduleDate\""));
        assert!(output.contains('\n'));
    }
}
