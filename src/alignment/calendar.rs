//! Calendar enumeration for year-long searches.

use chrono::{Datelike, NaiveDate};

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Every date of `year`, January 1st through December 31st, in order.
///
/// Returns `None` when the year lies outside the range chrono can represent.
pub fn dates_of_year(year: i32) -> Option<impl Iterator<Item = NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    // Dec 31st must exist too, otherwise the iterator would stop short.
    NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some(
        first
            .iter_days()
            .take_while(move |date| date.year() == year),
    )
}
