//! ISO week arithmetic for booking and access checks.
//!
//! Bookings are always taken for the week ahead: every persisted or queried
//! week value is the current ISO week plus [`BOOKING_WEEK_OFFSET`]. Call
//! sites go through the helpers here rather than adding offsets ad hoc.

use chrono::{Datelike, NaiveDate};

/// Fixed offset between the current ISO week and the week being booked.
pub const BOOKING_WEEK_OFFSET: i32 = 1;

/// Errors from week calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WeekError {
    /// The year/month/day triple does not name a calendar date.
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Submitted year.
        year: i32,
        /// Submitted month (1-12).
        month: u32,
        /// Submitted day of month.
        day: u32,
    },
}

/// ISO-8601 week number (1-53) for the given calendar date.
///
/// Week 1 is the week containing the year's first Thursday, so dates near a
/// year boundary may belong to the other year's week numbering.
///
/// # Errors
///
/// Returns [`WeekError::InvalidDate`] when the triple is not a real date.
pub fn iso_week(year: i32, month: u32, day: u32) -> Result<i32, WeekError> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(WeekError::InvalidDate { year, month, day })?;
    Ok(iso_week_of(date))
}

/// ISO-8601 week number of an already-validated date.
pub fn iso_week_of(date: NaiveDate) -> i32 {
    date.iso_week().week() as i32
}

/// Week number all bookings and menus are written to and read from.
///
/// The sum is not wrapped at year end; week 52 or 53 plus the offset is
/// stored as-is.
pub fn bookable_week(date: NaiveDate) -> i32 {
    iso_week_of(date) + BOOKING_WEEK_OFFSET
}

/// Week number the access check queries.
///
/// Access is validated one week beyond the bookable week.
pub fn access_check_week(date: NaiveDate) -> i32 {
    bookable_week(date) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2024, 1, 1, 1)]
    #[case(2024, 12, 31, 1)] // week 1 of the 2025 ISO year
    #[case(2021, 1, 1, 53)] // week 53 of the 2020 ISO year
    #[case(2020, 12, 31, 53)]
    #[case(2024, 7, 15, 29)]
    fn iso_weeks_follow_the_first_thursday_rule(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] expected: i32,
    ) {
        assert_eq!(iso_week(year, month, day).expect("valid date"), expected);
    }

    #[rstest]
    #[case(2024, 2, 30)]
    #[case(2024, 13, 1)]
    #[case(2023, 0, 10)]
    fn invalid_dates_are_rejected(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        let err = iso_week(year, month, day).expect_err("invalid date");
        assert_eq!(err, WeekError::InvalidDate { year, month, day });
    }

    #[rstest]
    fn bookable_week_is_one_ahead() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).expect("valid date");
        assert_eq!(bookable_week(date), 30);
    }

    #[rstest]
    fn access_check_looks_one_week_beyond_the_bookable_week() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).expect("valid date");
        assert_eq!(access_check_week(date), 31);
    }

    #[rstest]
    fn year_end_weeks_are_not_wrapped() {
        let date = NaiveDate::from_ymd_opt(2020, 12, 31).expect("valid date");
        assert_eq!(bookable_week(date), 54);
    }
}
