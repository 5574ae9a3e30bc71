//! Date sequence generation.

use chrono::NaiveDate;

/// Generates a contiguous sequence of Gregorian dates.
///
/// Starting from `start`, produces up to `n_days` consecutive dates. The
/// sequence stops early only if chrono's date range is exhausted.
pub fn date_sequence(start: NaiveDate, n_days: usize) -> Vec<NaiveDate> {
    start.iter_days().take(n_days).collect()
}
