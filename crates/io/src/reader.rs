//! Forecast, hindcast and observation readers.

use std::collections::HashMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use gqmdes_calendar::{ForecastWindow, N_LEADS};
use gqmdes_stats::nansum;
use tracing::{debug, warn};

use crate::error::IoError;
use crate::layout::{ArchiveLayout, Basin};
use crate::netcdf_read;

/// Per-lead climatologies: `totals[lead][year]`.
pub type SegmentTotals = [Vec<f64>; N_LEADS];

/// Name of the time coordinate in observation files.
const TIME_VAR: &str = "time";

/// Read a 1-D series from a NetCDF file.
///
/// Fill values become NaN.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::MissingVariable`] if `variable` is absent, and
/// [`IoError::DimensionMismatch`] if it is not one-dimensional.
pub fn read_series(path: &Path, variable: &str) -> Result<Vec<f64>, IoError> {
    let file = netcdf_read::open_file(path)?;
    let values = netcdf_read::read_1d_f64(&file, &[variable], path)?;
    debug!(path = %path.display(), n = values.len(), "read series");
    Ok(values)
}

/// Read the raw daily forecast for `basin` issued at `window`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the forecast has not been
/// produced, and [`IoError::DimensionMismatch`] if the file holds fewer
/// days than the window spans.
pub fn read_forecast(
    layout: &ArchiveLayout,
    window: &ForecastWindow,
    basin: &Basin,
) -> Result<Vec<f64>, IoError> {
    let path = layout.forecast_path(window, basin);
    let daily = read_series(&path, layout.variable())?;
    if daily.len() < window.total_days() {
        return Err(IoError::DimensionMismatch {
            name: format!("time in {}", path.display()),
            expected: window.total_days(),
            got: daily.len(),
        });
    }
    Ok(daily)
}

/// NaN-ignoring totals of the three lead segments of `daily`.
///
/// Days missing from the end of `daily` contribute nothing.
pub fn segment_totals(daily: &[f64], window: &ForecastWindow) -> [f64; N_LEADS] {
    let mut start = 0;
    window.day_counts().map(|n| {
        let lo = start.min(daily.len());
        let hi = (start + n).min(daily.len());
        start += n;
        nansum(&daily[lo..hi])
    })
}

/// Accumulate the hindcast climatology for `basin`.
///
/// Each window is one historical run. A run whose file is missing is
/// logged and skipped, so the result may hold fewer years than `windows`.
///
/// # Errors
///
/// Returns any [`IoError`] other than a missing hindcast file.
#[tracing::instrument(skip_all, fields(basin = %basin.name, years = windows.len()))]
pub fn read_hindcast_climatology(
    layout: &ArchiveLayout,
    windows: &[ForecastWindow],
    basin: &Basin,
) -> Result<SegmentTotals, IoError> {
    let mut totals: SegmentTotals = Default::default();
    for window in windows {
        let path = layout.forecast_path(window, basin);
        let daily = match read_series(&path, layout.variable()) {
            Ok(d) => d,
            Err(IoError::FileNotFound { path }) => {
                warn!(
                    year = window.run_date().year(),
                    path = %path.display(),
                    "hindcast file not available, skipping year"
                );
                continue;
            }
            Err(e) => return Err(e),
        };
        for (lead, total) in segment_totals(&daily, window).into_iter().enumerate() {
            totals[lead].push(total);
        }
    }
    Ok(totals)
}

/// Accumulate the observed climatology for `basin` over the hindcast
/// windows.
///
/// The observation file is read once; each window's forecast period is
/// located on its time axis by exact date.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] if a window's start or end date is not
/// on the file's time axis, plus any read error.
#[tracing::instrument(skip_all, fields(basin = %basin.name, years = windows.len()))]
pub fn read_observed_climatology(
    layout: &ArchiveLayout,
    windows: &[ForecastWindow],
    basin: &Basin,
) -> Result<SegmentTotals, IoError> {
    let path = layout.observation_path(basin);
    let file = netcdf_read::open_file(&path)?;
    let values = netcdf_read::read_1d_f64(&file, &[layout.variable()], &path)?;
    let offsets = netcdf_read::read_1d_f64(&file, &[TIME_VAR], &path)?;
    if offsets.len() != values.len() {
        return Err(IoError::DimensionMismatch {
            name: TIME_VAR.to_string(),
            expected: values.len(),
            got: offsets.len(),
        });
    }
    let base = netcdf_read::read_time_units(&file, TIME_VAR, &path)?;
    let dates = netcdf_read::time_offsets_to_dates(base, &offsets)?;
    let index: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let locate = |date: NaiveDate| -> Result<usize, IoError> {
        index.get(&date).copied().ok_or_else(|| IoError::InvalidTime {
            reason: format!("{date} not found in {}", path.display()),
        })
    };

    let mut totals: SegmentTotals = Default::default();
    for window in windows {
        let first = locate(window.forecast_start())?;
        let last = locate(window.forecast_end())?;
        if last < first {
            return Err(IoError::InvalidTime {
                reason: format!("time axis of {} is not increasing", path.display()),
            });
        }
        for (lead, total) in segment_totals(&values[first..=last], window)
            .into_iter()
            .enumerate()
        {
            totals[lead].push(total);
        }
    }
    debug!(n_dates = dates.len(), "observed climatology accumulated");
    Ok(totals)
}
