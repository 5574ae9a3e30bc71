//! Run date and its three lead segments.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::month::{add_months, days_in_month, first_of_month, month_abbrev};

/// Number of monthly lead segments following a run date.
pub const N_LEADS: usize = 3;

/// One calendar month of forecast lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSegment {
    lead: u8,
    start: NaiveDate,
    end: NaiveDate,
    n_days: usize,
}

impl LeadSegment {
    fn for_month(lead: u8, start: NaiveDate) -> Result<Self, CalendarError> {
        let n_days = days_in_month(start.year(), start.month())?;
        let end = start
            .checked_add_days(chrono::Days::new(u64::from(n_days - 1)))
            .ok_or_else(|| CalendarError::DateOverflow {
                reason: format!("end of month starting {start}"),
            })?;
        Ok(Self {
            lead,
            start,
            end,
            n_days: n_days as usize,
        })
    }

    /// Lead index, 1..=3.
    pub fn lead(&self) -> u8 {
        self.lead
    }

    /// First day of the segment.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the segment (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the segment.
    pub fn n_days(&self) -> usize {
        self.n_days
    }
}

/// A forecast run date and the three monthly segments it covers.
///
/// The run is issued on the 1st of the run month; lead 1 is the following
/// calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    run_date: NaiveDate,
    segments: [LeadSegment; N_LEADS],
}

impl ForecastWindow {
    /// Builds the window for a run issued on `run_year`-`run_month`-01.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if `run_month` is outside 1..=12 or the
    /// dates fall outside chrono's range.
    pub fn new(run_year: i32, run_month: u32) -> Result<Self, CalendarError> {
        let run_date = first_of_month(run_year, run_month)?;
        let lead = |i: u32| -> Result<LeadSegment, CalendarError> {
            LeadSegment::for_month(i as u8, add_months(run_date, i)?)
        };
        Ok(Self {
            run_date,
            segments: [lead(1)?, lead(2)?, lead(3)?],
        })
    }

    /// Run (initialisation) date.
    pub fn run_date(&self) -> NaiveDate {
        self.run_date
    }

    /// The three lead segments in chronological order.
    pub fn segments(&self) -> &[LeadSegment; N_LEADS] {
        &self.segments
    }

    /// Day counts of the three segments.
    pub fn day_counts(&self) -> [usize; N_LEADS] {
        self.segments.map(|s| s.n_days())
    }

    /// Total days across all segments.
    pub fn total_days(&self) -> usize {
        self.segments.iter().map(|s| s.n_days()).sum()
    }

    /// First forecast day (start of lead 1).
    pub fn forecast_start(&self) -> NaiveDate {
        self.segments[0].start()
    }

    /// Last forecast day (end of lead 3).
    pub fn forecast_end(&self) -> NaiveDate {
        self.segments[N_LEADS - 1].end()
    }

    /// Abbreviation of the run month, e.g. `"jan"`.
    pub fn month_abbrev(&self) -> &'static str {
        // run_date was built from a validated month
        month_abbrev(self.run_date.month()).unwrap_or("unk")
    }
}

/// Formats a date as `YYYYMMDD`.
pub fn stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// One window per historical year, all sharing `run_month`.
///
/// # Errors
///
/// Returns [`CalendarError`] if `run_month` is invalid or any window
/// cannot be built.
pub fn hindcast_windows(
    run_month: u32,
    years: RangeInclusive<i32>,
) -> Result<Vec<ForecastWindow>, CalendarError> {
    years.map(|y| ForecastWindow::new(y, run_month)).collect()
}
