use chrono::{Datelike, Months, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sunday-first weekday header.
pub const WEEKDAY_ABBREVS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Full month name for a zero-based month index.
pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES.get(month0 as usize).copied().unwrap_or("Unknown")
}

/// Three-letter month name for a zero-based month index.
pub fn month_abbrev(month0: u32) -> &'static str {
    MONTH_ABBREVS.get(month0 as usize).copied().unwrap_or("???")
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in a zero-based month.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// A displayed month, stored as its first day so it is always a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// Cursor for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Cursor for `year` and zero-based `month0`, if that month is representable.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month0 + 1, 1).map(|first| MonthCursor { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    /// 0 = Sunday .. 6 = Saturday.
    pub fn first_weekday(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year(), self.month0())
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// `"<FullMonthName> <Year>"`.
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month0()), self.year())
    }

    /// Moves by `delta` months with year carry. Stays put at the edge of the
    /// representable range.
    pub fn step(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        moved.map(|first| MonthCursor { first }).unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_name_known_values() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(2), "March");
        assert_eq!(month_name(11), "December");
    }

    #[test]
    fn test_month_name_unknown() {
        assert_eq!(month_name(12), "Unknown");
        assert_eq!(month_abbrev(12), "???");
    }

    #[test]
    fn test_month_abbrev_known_values() {
        assert_eq!(month_abbrev(0), "Jan");
        assert_eq!(month_abbrev(2), "Mar");
        assert_eq!(month_abbrev(11), "Dec");
    }

    #[test]
    fn test_days_in_month_february_non_leap() {
        assert_eq!(days_in_month(2025, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn test_days_in_month_february_leap() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2000, 1), 29);
    }

    #[test]
    fn test_days_in_month_matches_chrono() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month0 in 0..12 {
                let cursor = MonthCursor::new(year, month0).unwrap();
                let next = cursor.step(1).date(1).unwrap();
                let last = next.pred_opt().unwrap();
                assert_eq!(days_in_month(year, month0), last.day(), "{year}-{month0}");
            }
        }
    }

    #[test]
    fn test_first_weekday_march_2024_is_friday() {
        let cursor = MonthCursor::new(2024, 2).unwrap();
        assert_eq!(cursor.first_weekday(), 5);
        assert_eq!(cursor.days(), 31);
        assert_eq!(cursor.label(), "March 2024");
    }

    #[test]
    fn test_containing_snaps_to_first() {
        let cursor = MonthCursor::containing(d(2026, 10, 16));
        assert_eq!(cursor.date(1), Some(d(2026, 10, 1)));
        assert_eq!(cursor.month0(), 9);
        assert_eq!(cursor.year(), 2026);
    }

    #[test]
    fn test_step_across_year() {
        let dec = MonthCursor::new(2025, 11).unwrap();
        assert_eq!(dec.step(1), MonthCursor::new(2026, 0).unwrap());
        let jan = MonthCursor::new(2026, 0).unwrap();
        assert_eq!(jan.step(-1), MonthCursor::new(2025, 11).unwrap());
    }

    #[test]
    fn test_twelve_steps_round_trip_a_year() {
        for month0 in 0..12 {
            let start = MonthCursor::new(2024, month0).unwrap();
            let forward = (0..12).fold(start, |c, _| c.step(1));
            assert_eq!(forward, MonthCursor::new(2025, month0).unwrap());
            let backward = (0..12).fold(start, |c, _| c.step(-1));
            assert_eq!(backward, MonthCursor::new(2023, month0).unwrap());
        }
    }

    #[test]
    fn test_step_stays_put_at_range_edge() {
        let last = MonthCursor::containing(NaiveDate::MAX);
        assert_eq!(last.step(1), last);
    }
}
