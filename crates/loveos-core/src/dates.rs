use chrono::{Local, NaiveDate};

/// Whole calendar days from `start` to `end`. Negative if `end` is earlier.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Days elapsed since `start`, counted against today's local calendar date.
pub fn days_online(start: NaiveDate) -> i64 {
    days_between(start, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_zero() {
        assert_eq!(days_between(date(2025, 12, 21), date(2025, 12, 21)), 0);
    }

    #[test]
    fn crosses_year_boundary() {
        assert_eq!(days_between(date(2025, 12, 21), date(2026, 2, 14)), 55);
    }

    #[test]
    fn before_start_is_negative() {
        assert_eq!(days_between(date(2025, 12, 21), date(2025, 12, 20)), -1);
    }
}
