use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::{Result, ScheduleDateError};
use super::weekday::{WeekNumbering, Weekday};

/// Day offset of the first day of each month in a common year.
const OFFSET_TO_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Day offset of the first day of each month in a leap year.
const OFFSET_TO_MONTH_LEAP_YEAR: [u16; 12] =
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Every 400-year Gregorian cycle has exactly this many days.
const DAYS_PER_400_YEARS: i64 = 146_097;

/// Month adjustment table for Sakamoto's weekday algorithm.
const SAKAMOTO_MONTH_TABLE: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

/// Returns true if `year` is a leap year in the proleptic Gregorian calendar.
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 400 == 0 || year % 100 != 0)
}

/// Returns the number of days in `year` (365 or 366).
pub fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn month_offsets(year: i64) -> &'static [u16; 12] {
    if is_leap_year(year) {
        &OFFSET_TO_MONTH_LEAP_YEAR
    } else {
        &OFFSET_TO_MONTH
    }
}

/// Days from 0001-01-01 to January 1st of `year` (negative before year 1).
fn days_before_year(year: i64) -> i128 {
    let y = i128::from(year) - 1;
    365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

/// A calendar date stored as a year plus a zero-based day offset within it.
///
/// The `(year, day_offset)` pair is the canonical form; month and day are
/// derived on access. Construction always normalizes, so `day_offset` is in
/// `0..days_in_year(year)` for every value of this type. Ordering compares
/// the year first, then the offset, which matches chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ScheduleDate {
    year: i64,
    day_offset: u16,
}

impl ScheduleDate {
    /// Creates a date from a year and a day offset, rolling the offset across
    /// year boundaries in either direction until it fits the year.
    ///
    /// ```
    /// use situps_core::ScheduleDate;
    ///
    /// let date = ScheduleDate::new(2023, 365);
    /// assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
    ///
    /// let date = ScheduleDate::new(2024, -1);
    /// assert_eq!((date.year(), date.month(), date.day()), (2023, 12, 31));
    /// ```
    pub fn new(year: i64, day_offset: i64) -> Self {
        let mut year = year + day_offset.div_euclid(DAYS_PER_400_YEARS) * 400;
        let mut day_offset = day_offset.rem_euclid(DAYS_PER_400_YEARS);

        while day_offset >= days_in_year(year) {
            day_offset -= days_in_year(year);
            year += 1;
        }

        Self {
            year,
            day_offset: day_offset as u16,
        }
    }

    /// Creates a date from a Gregorian `(year, month, day)` triple.
    ///
    /// Fails when the month is outside 1-12 or the day does not exist in
    /// that month.
    pub fn from_gregorian(year: i64, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ScheduleDateError::InvalidMonth(month));
        }
        if day == 0 || day > month_length(year, month) {
            return Err(ScheduleDateError::InvalidDay { year, month, day });
        }

        let offset = month_offsets(year)[month as usize - 1] + day as u16 - 1;
        Ok(Self {
            year,
            day_offset: offset,
        })
    }

    /// Creates a date from a Gregorian triple without validating it.
    ///
    /// Out-of-range values roll over instead of failing: day 31 of a 30-day
    /// month becomes the 1st of the next month, month 13 becomes January of
    /// the following year, day 0 is the last day of the previous month.
    pub fn from_gregorian_lenient(year: i64, month: i64, day: i64) -> Self {
        let month_index = month - 1;
        let year = year + month_index.div_euclid(12);
        let month_index = month_index.rem_euclid(12) as usize;

        Self::new(year, i64::from(month_offsets(year)[month_index]) + day - 1)
    }

    /// Today's date according to the local system clock.
    pub fn today() -> Self {
        Self::from(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    /// Zero-based index of this day within its year (0 = January 1st).
    pub fn day_offset(&self) -> u16 {
        self.day_offset
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Month of the year, 1-12.
    pub fn month(&self) -> u32 {
        month_offsets(self.year).partition_point(|&offset| offset <= self.day_offset) as u32
    }

    /// Day of the month, 1-31.
    pub fn day(&self) -> u32 {
        let offsets = month_offsets(self.year);
        u32::from(self.day_offset - offsets[self.month() as usize - 1]) + 1
    }

    /// Number of days in this date's month.
    pub fn days_in_month(&self) -> u32 {
        month_length(self.year, self.month())
    }

    /// Day of the week, computed with Sakamoto's algorithm.
    pub fn weekday(&self) -> Weekday {
        let month = self.month();
        let year = if month < 3 { self.year - 1 } else { self.year };
        let index = year + year.div_euclid(4) - year.div_euclid(100)
            + year.div_euclid(400)
            + SAKAMOTO_MONTH_TABLE[month as usize - 1]
            + i64::from(self.day());

        Weekday::from_index(index)
    }

    /// Week number of this date under the given numbering policy.
    pub fn week_of_year(&self, numbering: WeekNumbering) -> u32 {
        match numbering {
            WeekNumbering::Legacy => self.legacy_week(),
            WeekNumbering::Iso => self.iso_week().1,
        }
    }

    /// ISO-8601 `(week-year, week)` pair. The week-year differs from
    /// `year()` for days in the first or last week of the year.
    pub fn iso_week(&self) -> (i64, u32) {
        let ordinal = i64::from(self.day_offset) + 1;
        let iso_weekday = i64::from(self.weekday().days_from_monday()) + 1;
        let week = (ordinal - iso_weekday + 10).div_euclid(7);

        if week < 1 {
            (self.year - 1, iso_weeks_in_year(self.year - 1))
        } else if week > i64::from(iso_weeks_in_year(self.year)) {
            (self.year + 1, 1)
        } else {
            (self.year, week as u32)
        }
    }

    // Weeks run Monday to Sunday counted from the Monday on or before
    // January 1st; index 52 wraps to week 1.
    fn legacy_week(&self) -> u32 {
        let jan1 = Self {
            year: self.year,
            day_offset: 0,
        };
        let index = (u32::from(self.day_offset) + jan1.weekday().days_from_monday()) / 7;
        index % 52 + 1
    }

    /// The nearest date on or before this one that falls on `target`.
    pub fn reversed_to_weekday(&self, target: Weekday) -> Self {
        let delta =
            (i64::from(self.weekday().index()) - i64::from(target.index())).rem_euclid(7);
        Self::new(self.year, i64::from(self.day_offset) - delta)
    }

    /// Returns true if this date is strictly before `other`.
    pub fn before(&self, other: &Self) -> bool {
        if self.year == other.year {
            self.day_offset < other.day_offset
        } else {
            self.year < other.year
        }
    }

    /// The following calendar day.
    pub fn succ(&self) -> Self {
        if i64::from(self.day_offset) + 1 < days_in_year(self.year) {
            Self {
                year: self.year,
                day_offset: self.day_offset + 1,
            }
        } else {
            Self {
                year: self.year + 1,
                day_offset: 0,
            }
        }
    }

    /// Shifts the date by `days` (negative values move backward).
    pub fn add_days(&self, days: i64) -> Self {
        Self::new(self.year, i64::from(self.day_offset) + days)
    }

    /// Signed number of days since 1970-01-01.
    ///
    /// Wider than `i64` so that every representable year has a day number.
    pub fn day_number(&self) -> i128 {
        days_before_year(self.year) - days_before_year(1970) + i128::from(self.day_offset)
    }

    /// Converts to a chrono date, if the year fits chrono's supported range.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_yo_opt(year, u32::from(self.day_offset) + 1)
    }
}

fn month_length(year: i64, month: u32) -> u32 {
    let offsets = month_offsets(year);
    let start = offsets[month as usize - 1];
    let end = match offsets.get(month as usize) {
        Some(next) => *next,
        None => days_in_year(year) as u16,
    };
    u32::from(end - start)
}

fn iso_weeks_in_year(year: i64) -> u32 {
    let jan1 = ScheduleDate { year, day_offset: 0 }.weekday();
    if jan1 == Weekday::Thursday || (is_leap_year(year) && jan1 == Weekday::Wednesday) {
        53
    } else {
        52
    }
}

impl From<NaiveDate> for ScheduleDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: i64::from(date.year()),
            day_offset: date.ordinal0() as u16,
        }
    }
}

impl fmt::Display for ScheduleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month(), self.day())
    }
}

impl FromStr for ScheduleDate {
    type Err = ScheduleDateError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScheduleDateError::Parse(s.to_string());
        let mut parts = s.trim().rsplitn(3, '-');

        let day = parts
            .next()
            .and_then(|part| part.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let month = parts
            .next()
            .and_then(|part| part.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let year = parts
            .next()
            .and_then(|part| part.parse::<i64>().ok())
            .ok_or_else(invalid)?;

        Self::from_gregorian(year, month, day)
    }
}

impl From<ScheduleDate> for String {
    fn from(date: ScheduleDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<String> for ScheduleDate {
    type Error = ScheduleDateError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i64, month: u32, day: u32) -> ScheduleDate {
        ScheduleDate::from_gregorian(year, month, day).unwrap()
    }

    fn naive(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn test_gregorian_round_trip() {
        for year in [1900, 2000, 2023, 2024] {
            for month in 1..=12 {
                let length = make_date(year, month, 1).days_in_month();
                for day in 1..=length {
                    let date = make_date(year, month, day);
                    assert_eq!((date.month(), date.day()), (month, day));
                }
            }
        }
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(make_date(2024, 2, 1).days_in_month(), 29);
        assert_eq!(make_date(2023, 2, 1).days_in_month(), 28);
        assert_eq!(make_date(2023, 4, 1).days_in_month(), 30);
        assert_eq!(make_date(2023, 12, 1).days_in_month(), 31);
    }

    #[test]
    fn test_from_gregorian_rejects_invalid_dates() {
        assert_eq!(
            ScheduleDate::from_gregorian(2023, 4, 31),
            Err(ScheduleDateError::InvalidDay {
                year: 2023,
                month: 4,
                day: 31
            })
        );
        assert!(ScheduleDate::from_gregorian(2023, 2, 29).is_err());
        assert!(ScheduleDate::from_gregorian(2024, 2, 29).is_ok());
        assert!(ScheduleDate::from_gregorian(2024, 1, 0).is_err());
        assert_eq!(
            ScheduleDate::from_gregorian(2024, 13, 1),
            Err(ScheduleDateError::InvalidMonth(13))
        );
        assert_eq!(
            ScheduleDate::from_gregorian(2024, 0, 1),
            Err(ScheduleDateError::InvalidMonth(0))
        );
    }

    #[test]
    fn test_from_gregorian_lenient_rolls_over() {
        assert_eq!(
            ScheduleDate::from_gregorian_lenient(2023, 4, 31),
            make_date(2023, 5, 1)
        );
        assert_eq!(
            ScheduleDate::from_gregorian_lenient(2023, 2, 31),
            make_date(2023, 3, 3)
        );
        assert_eq!(
            ScheduleDate::from_gregorian_lenient(2023, 13, 1),
            make_date(2024, 1, 1)
        );
        assert_eq!(
            ScheduleDate::from_gregorian_lenient(2024, 3, 0),
            make_date(2024, 2, 29)
        );
        assert_eq!(
            ScheduleDate::from_gregorian_lenient(2024, 0, 15),
            make_date(2023, 12, 15)
        );
    }

    #[test]
    fn test_new_normalizes_forward() {
        assert_eq!(ScheduleDate::new(2023, 365), make_date(2024, 1, 1));
        assert_eq!(ScheduleDate::new(2024, 365), make_date(2024, 12, 31));
        assert_eq!(ScheduleDate::new(2024, 366), make_date(2025, 1, 1));
        assert_eq!(ScheduleDate::new(2023, 365 + 366), make_date(2025, 1, 1));
    }

    #[test]
    fn test_new_normalizes_backward() {
        assert_eq!(ScheduleDate::new(2024, -1), make_date(2023, 12, 31));
        assert_eq!(ScheduleDate::new(2025, -366), make_date(2024, 1, 1));
        assert_eq!(ScheduleDate::new(2024, -365), make_date(2023, 1, 1));
    }

    #[test]
    fn test_new_matches_chrono_for_large_offsets() {
        let base = naive(2000, 1, 1);
        for offset in [-1_000_000_i64, -146_097, -36_525, 0, 59, 36_524, 146_098, 1_000_000] {
            let expected = base + chrono::Duration::days(offset);
            assert_eq!(
                ScheduleDate::new(2000, offset),
                ScheduleDate::from(expected),
                "offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_weekday_reference_anchor() {
        assert_eq!(make_date(2000, 1, 1).weekday(), Weekday::Saturday);
        assert_eq!(make_date(2024, 3, 6).weekday(), Weekday::Wednesday);
        assert_eq!(make_date(1970, 1, 1).weekday(), Weekday::Thursday);
    }

    #[test]
    fn test_weekday_matches_chrono() {
        let mut date = naive(1899, 12, 1);
        let end = naive(2101, 2, 1);
        while date <= end {
            assert_eq!(
                ScheduleDate::from(date).weekday(),
                Weekday::from(date.weekday()),
                "{}",
                date
            );
            date += chrono::Duration::days(1);
        }
    }

    #[test]
    fn test_weekday_before_common_era() {
        // 0000-03-01 (proleptic) was a Wednesday.
        assert_eq!(make_date(0, 3, 1).weekday(), Weekday::Wednesday);
        let expected = ScheduleDate::from(naive(-44, 3, 15)).weekday();
        assert_eq!(make_date(-44, 3, 15).weekday(), expected);
    }

    #[test]
    fn test_reversed_to_own_weekday_is_noop() {
        let mut date = make_date(2023, 12, 20);
        for _ in 0..30 {
            assert_eq!(date.reversed_to_weekday(date.weekday()), date);
            date = date.succ();
        }
    }

    #[test]
    fn test_reversed_to_weekday() {
        let wednesday = make_date(2024, 3, 6);
        assert_eq!(
            wednesday.reversed_to_weekday(Weekday::Monday),
            make_date(2024, 3, 4)
        );
        assert_eq!(
            wednesday.reversed_to_weekday(Weekday::Sunday),
            make_date(2024, 3, 3)
        );
        assert_eq!(
            wednesday.reversed_to_weekday(Weekday::Thursday),
            make_date(2024, 2, 29)
        );

        // Crosses back into the previous year.
        let new_year = make_date(2025, 1, 1);
        assert_eq!(new_year.weekday(), Weekday::Wednesday);
        assert_eq!(
            new_year.reversed_to_weekday(Weekday::Monday),
            make_date(2024, 12, 30)
        );
    }

    #[test]
    fn test_before_is_chronological() {
        let a = make_date(2023, 12, 31);
        let b = make_date(2024, 1, 1);
        let c = make_date(2024, 1, 2);

        assert!(a.before(&b));
        assert!(b.before(&c));
        assert!(!b.before(&a));
        assert!(!b.before(&b));
        assert!(a < b && b < c);
    }

    #[test]
    fn test_succ_crosses_year_boundary() {
        assert_eq!(make_date(2023, 12, 31).succ(), make_date(2024, 1, 1));
        assert_eq!(make_date(2024, 2, 28).succ(), make_date(2024, 2, 29));
        assert_eq!(make_date(2024, 2, 29).succ(), make_date(2024, 3, 1));
        assert_eq!(make_date(2023, 2, 28).succ(), make_date(2023, 3, 1));
    }

    #[test]
    fn test_add_days() {
        let date = make_date(2024, 1, 10);
        assert_eq!(date.add_days(-10), make_date(2023, 12, 31));
        assert_eq!(date.add_days(22), make_date(2024, 2, 1));
        assert_eq!(date.add_days(0), date);
    }

    #[test]
    fn test_day_number_at_extreme_years() {
        let last = ScheduleDate::new(i64::MAX, 0);
        let next = last.add_days(1);

        assert_eq!(next.day_number() - last.day_number(), 1);
        assert!(ScheduleDate::new(i64::MIN, 0).day_number() < 0);
    }

    #[test]
    fn test_day_number_matches_chrono() {
        let epoch = naive(1970, 1, 1);
        for date in [
            naive(1970, 1, 1),
            naive(1969, 12, 31),
            naive(2000, 2, 29),
            naive(2024, 3, 6),
            naive(1600, 1, 1),
            naive(-1, 12, 31),
        ] {
            assert_eq!(
                ScheduleDate::from(date).day_number(),
                i128::from((date - epoch).num_days()),
                "{}",
                date
            );
        }
    }

    #[test]
    fn test_iso_week_matches_chrono() {
        let mut date = naive(2014, 12, 20);
        let end = naive(2027, 1, 15);
        while date <= end {
            let iso = date.iso_week();
            assert_eq!(
                ScheduleDate::from(date).iso_week(),
                (i64::from(iso.year()), iso.week()),
                "{}",
                date
            );
            date += chrono::Duration::days(1);
        }
    }

    #[test]
    fn test_legacy_week_numbers() {
        // 2024-01-01 is a Monday.
        assert_eq!(make_date(2024, 1, 1).week_of_year(WeekNumbering::Legacy), 1);
        assert_eq!(make_date(2024, 1, 7).week_of_year(WeekNumbering::Legacy), 1);
        assert_eq!(make_date(2024, 1, 8).week_of_year(WeekNumbering::Legacy), 2);
        assert_eq!(make_date(2024, 3, 6).week_of_year(WeekNumbering::Legacy), 10);

        // 2023-01-01 is a Sunday and closes the week that started in 2022.
        assert_eq!(make_date(2023, 1, 1).week_of_year(WeekNumbering::Legacy), 1);
        assert_eq!(make_date(2023, 1, 2).week_of_year(WeekNumbering::Legacy), 2);
    }

    #[test]
    fn test_legacy_week_53_folds_into_week_1() {
        assert_eq!(make_date(2024, 12, 29).week_of_year(WeekNumbering::Legacy), 52);
        assert_eq!(make_date(2024, 12, 30).week_of_year(WeekNumbering::Legacy), 1);
        assert_eq!(make_date(2023, 12, 31).week_of_year(WeekNumbering::Legacy), 1);
        assert_eq!(make_date(2020, 12, 31).week_of_year(WeekNumbering::Iso), 53);
    }

    #[test]
    fn test_naive_date_conversion() {
        let date = make_date(2024, 2, 29);
        assert_eq!(date.to_naive_date(), Some(naive(2024, 2, 29)));
        assert_eq!(ScheduleDate::from(naive(2024, 2, 29)), date);
        assert_eq!(ScheduleDate::new(i64::from(i32::MAX) + 1, 0).to_naive_date(), None);
    }

    #[test]
    fn test_display_and_parse() {
        let date = make_date(2024, 3, 6);
        assert_eq!(date.to_string(), "2024-03-06");
        assert_eq!("2024-03-06".parse::<ScheduleDate>(), Ok(date));
        assert_eq!(" 2024-3-6 ".parse::<ScheduleDate>(), Ok(date));

        let ancient = make_date(-44, 3, 15);
        assert_eq!(ancient.to_string().parse::<ScheduleDate>(), Ok(ancient));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "2024-03".parse::<ScheduleDate>(),
            Err(ScheduleDateError::Parse("2024-03".to_string()))
        );
        assert!("tomorrow".parse::<ScheduleDate>().is_err());
        assert_eq!(
            "2023-02-29".parse::<ScheduleDate>(),
            Err(ScheduleDateError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_serde_as_string() {
        let date = make_date(2024, 3, 6);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-03-06\"");

        let parsed: ScheduleDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
        assert!(serde_json::from_str::<ScheduleDate>("\"2024-02-30\"").is_err());
    }
}
