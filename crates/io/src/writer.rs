//! NetCDF writer for corrected daily series.

use std::path::Path;

use gqmdes_calendar::{ForecastWindow, date_sequence, stamp};
use tracing::info;

use crate::error::IoError;

/// Method tag stored in every output file.
pub const METHOD: &str = "gqm-des";

/// Provenance recorded as global attributes of an output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMetadata {
    /// Forecast model name.
    pub model: String,
    /// Basin short name.
    pub basin: String,
}

/// Write a corrected daily series spanning `window` to `path`.
///
/// Parent directories are created as needed. The file holds a `time`
/// coordinate (`days since` the first forecast day, standard calendar),
/// the series under `variable`, and global `model`, `basin`, `method` and
/// `run_date` attributes.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if `series` does not cover the
/// window exactly, [`IoError::Io`] if the directory cannot be created, and
/// [`IoError::Netcdf`] on write failures.
pub fn write_corrected(
    path: &Path,
    series: &[f64],
    window: &ForecastWindow,
    variable: &str,
    meta: &OutputMetadata,
) -> Result<(), IoError> {
    if series.len() != window.total_days() {
        return Err(IoError::DimensionMismatch {
            name: "time".to_string(),
            expected: window.total_days(),
            got: series.len(),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = netcdf::create(path)?;
    file.add_dimension("time", series.len())?;

    {
        let start = window.forecast_start();
        let offsets: Vec<f64> = date_sequence(start, series.len())
            .into_iter()
            .map(|d| (d - start).num_days() as f64)
            .collect();
        let mut var = file.add_variable::<f64>("time", &["time"])?;
        var.put_values(&offsets, ..)?;
        var.put_attribute(
            "units",
            format!("days since {}", start.format("%Y-%m-%d")),
        )?;
        var.put_attribute("calendar", "standard")?;
    }

    {
        let mut var = file.add_variable::<f64>(variable, &["time"])?;
        var.put_values(series, ..)?;
        var.put_attribute("units", "mm")?;
    }

    file.add_attribute("model", meta.model.as_str())?;
    file.add_attribute("basin", meta.basin.as_str())?;
    file.add_attribute("method", METHOD)?;
    file.add_attribute("run_date", stamp(window.run_date()))?;

    info!(path = %path.display(), n_days = series.len(), "wrote corrected series");
    Ok(())
}
