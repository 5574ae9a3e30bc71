//! Month lengths and abbreviations.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

const ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub(crate) fn check_month(month: u32) -> Result<(), CalendarError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::InvalidMonth { month })
    }
}

/// First day of `year`/`month`.
pub(crate) fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    check_month(month)?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidDate {
        year,
        month,
        day: 1,
    })
}

/// First day of the month `offset` months after `date`'s month.
pub(crate) fn add_months(date: NaiveDate, offset: u32) -> Result<NaiveDate, CalendarError> {
    let zero_based = date.month0() + offset;
    let year = date.year() + (zero_based / 12) as i32;
    first_of_month(year, zero_based % 12 + 1)
}

/// Number of days in a Gregorian month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month)?;
    let next = add_months(first, 1)?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Lower-case three-letter English abbreviation (`1` → `"jan"`).
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn month_abbrev(month: u32) -> Result<&'static str, CalendarError> {
    check_month(month)?;
    Ok(ABBREVS[(month - 1) as usize])
}
