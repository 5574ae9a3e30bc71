//! Integration tests for archive reads and writes against real NetCDF
//! files in a temporary directory.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use gqmdes_calendar::{ForecastWindow, NaiveDate, hindcast_windows};
use gqmdes_io::{
    ArchiveLayout, Basin, IoError, OutputMetadata, read_forecast, read_hindcast_climatology,
    read_observed_climatology, read_series, write_corrected,
};
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn basin() -> Basin {
    Basin::new("furnas", "grande", "grande_furnas")
}

fn meta() -> OutputMetadata {
    OutputMetadata {
        model: "rsm2008".to_string(),
        basin: "furnas".to_string(),
    }
}

/// Writes a forecast-shaped file with every day set to `value`.
fn write_forecast(layout: &ArchiveLayout, window: &ForecastWindow, value: f64) -> PathBuf {
    let path = layout.forecast_path(window, &basin());
    let series = vec![value; window.total_days()];
    write_corrected(&path, &series, window, layout.variable(), &meta()).expect("write forecast");
    path
}

/// Writes a daily observation file starting at `start`.
fn write_observations(path: &Path, start: NaiveDate, values: &[f64], fill: Option<f64>) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut file = netcdf::create(path).expect("create obs file");
    file.add_dimension("time", values.len()).expect("add dim time");
    {
        let offsets: Vec<f64> = (0..values.len()).map(|t| t as f64).collect();
        let mut var = file
            .add_variable::<f64>("time", &["time"])
            .expect("add var time");
        var.put_values(&offsets, ..).expect("put time values");
        var.put_attribute("units", format!("days since {start} 00:00:00"))
            .expect("add time units");
    }
    {
        let mut var = file
            .add_variable::<f64>("pr", &["time"])
            .expect("add var pr");
        if let Some(fv) = fill {
            var.put_attribute("_FillValue", fv).expect("add _FillValue");
        }
        var.put_values(values, ..).expect("put pr values");
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn written_series_reads_back() {
    let dir = tempdir().unwrap();
    let layout = ArchiveLayout::default().with_root(dir.path());
    let window = ForecastWindow::new(2019, 1).unwrap();
    let series: Vec<f64> = (0..window.total_days()).map(|d| d as f64 * 0.5).collect();
    let path = layout.output_path(&window, &basin());

    write_corrected(&path, &series, &window, "pr", &meta()).unwrap();

    assert_eq!(read_series(&path, "pr").unwrap(), series);
    let time = read_series(&path, "time").unwrap();
    assert_eq!(time.len(), 89);
    assert_eq!(time[0], 0.0);
    assert_eq!(time[88], 88.0);
    let file = netcdf::open(&path).unwrap();
    let method: String = file
        .attribute("method")
        .expect("method attribute")
        .value()
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(method, "gqm-des");
}

#[test]
fn write_rejects_wrong_length() {
    let dir = tempdir().unwrap();
    let window = ForecastWindow::new(2019, 1).unwrap();
    let result = write_corrected(&dir.path().join("x.nc"), &[1.0; 10], &window, "pr", &meta());
    assert!(matches!(
        result,
        Err(IoError::DimensionMismatch {
            expected: 89,
            got: 10,
            ..
        })
    ));
}

#[test]
fn missing_forecast_is_file_not_found() {
    let dir = tempdir().unwrap();
    let layout = ArchiveLayout::default().with_root(dir.path());
    let window = ForecastWindow::new(2019, 1).unwrap();
    assert!(matches!(
        read_forecast(&layout, &window, &basin()),
        Err(IoError::FileNotFound { .. })
    ));
}

#[test]
fn forecast_read_from_layout_path() {
    let dir = tempdir().unwrap();
    let layout = ArchiveLayout::default().with_root(dir.path());
    let window = ForecastWindow::new(2019, 1).unwrap();
    write_forecast(&layout, &window, 2.5);

    let daily = read_forecast(&layout, &window, &basin()).unwrap();
    assert_eq!(daily.len(), 89);
    assert!(daily.iter().all(|&d| d == 2.5));
}

#[test]
fn fill_values_become_nan() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("obs.nc");
    write_observations(&path, ymd(1981, 1, 1), &[1.0, -999.0, 3.0], Some(-999.0));

    let series = read_series(&path, "pr").unwrap();
    assert_eq!(series[0], 1.0);
    assert!(series[1].is_nan());
    assert_eq!(series[2], 3.0);
}

#[test]
fn missing_variable_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("obs.nc");
    write_observations(&path, ymd(1981, 1, 1), &[1.0], None);
    assert!(matches!(
        read_series(&path, "tas"),
        Err(IoError::MissingVariable { .. })
    ));
}

#[test]
fn hindcast_climatology_skips_missing_years() {
    let dir = tempdir().unwrap();
    let layout = ArchiveLayout::default().with_root(dir.path());
    let windows = hindcast_windows(1, 1981..=1984).unwrap();
    // 1983 is never written.
    for (w, value) in windows.iter().zip([1.0, 2.0, 0.0, 4.0]) {
        if w.run_date() != ymd(1983, 1, 1) {
            write_forecast(&layout, w, value);
        }
    }

    let totals = read_hindcast_climatology(&layout, &windows, &basin()).unwrap();
    for lead in &totals {
        assert_eq!(lead.len(), 3);
    }
    // February of 1981, 1982 and 1984 (leap).
    assert_eq!(totals[0], vec![28.0, 56.0, 116.0]);
    assert_eq!(totals[1], vec![31.0, 62.0, 124.0]);
}

#[test]
fn observed_climatology_sums_each_window() {
    let dir = tempdir().unwrap();
    let layout = ArchiveLayout::default().with_root(dir.path());
    let start = ymd(1980, 12, 1);
    let n_days = (ymd(1984, 1, 1) - start).num_days() as usize;
    let mut values = vec![1.0; n_days];
    // A NaN inside the 1982 lead-1 month (February) is ignored.
    let nan_day = (ymd(1982, 2, 10) - start).num_days() as usize;
    values[nan_day] = f64::NAN;
    write_observations(&layout.observation_path(&basin()), start, &values, None);

    let windows = hindcast_windows(1, 1981..=1983).unwrap();
    let totals = read_observed_climatology(&layout, &windows, &basin()).unwrap();
    assert_eq!(totals[0].len(), 3);
    assert_relative_eq!(totals[0][0], 28.0);
    assert_relative_eq!(totals[0][1], 27.0);
    assert_relative_eq!(totals[2][2], 30.0);
}

#[test]
fn observed_climatology_requires_every_year() {
    let dir = tempdir().unwrap();
    let layout = ArchiveLayout::default().with_root(dir.path());
    let start = ymd(1981, 1, 1);
    write_observations(&layout.observation_path(&basin()), start, &[1.0; 365], None);

    let windows = hindcast_windows(1, 1981..=1982).unwrap();
    assert!(matches!(
        read_observed_climatology(&layout, &windows, &basin()),
        Err(IoError::InvalidTime { .. })
    ));
}
