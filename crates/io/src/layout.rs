//! Directory layout of the forecast archive.

use std::path::PathBuf;

use gqmdes_calendar::{ForecastWindow, stamp};

/// A catchment whose basin-averaged series are corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basin {
    /// Short name, used in output file names.
    pub name: String,
    /// Directory holding the basin's series.
    pub dir_name: String,
    /// Long name, used in input file names.
    pub full_name: String,
}

impl Basin {
    /// Creates a basin descriptor.
    pub fn new(
        name: impl Into<String>,
        dir_name: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dir_name: dir_name.into(),
            full_name: full_name.into(),
        }
    }
}

/// Naming conventions of the archive: where forecasts, observations and
/// corrected outputs live.
///
/// Use the builder methods (`with_*`) to override individual components.
/// The [`Default`] implementation matches the operational archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    root: PathBuf,
    model: String,
    hindcast_tag: String,
    variable: String,
    frequency: String,
    obs_dataset: String,
    obs_period: String,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            model: "rsm2008".into(),
            hindcast_tag: "hind8110".into(),
            variable: "pr".into(),
            frequency: "daily".into(),
            obs_dataset: "inmet_ana_chirps_merge".into(),
            obs_period: "19610101_20141231".into(),
        }
    }
}

impl ArchiveLayout {
    /// Set the archive root directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the forecast model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the hindcast period tag (e.g. `hind8110`).
    pub fn with_hindcast_tag(mut self, tag: impl Into<String>) -> Self {
        self.hindcast_tag = tag.into();
        self
    }

    /// Set the variable name, used both in paths and inside the files.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Set the temporal frequency component.
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = frequency.into();
        self
    }

    /// Set the observation dataset name.
    pub fn with_obs_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.obs_dataset = dataset.into();
        self
    }

    /// Set the observation period component (`YYYYMMDD_YYYYMMDD`).
    pub fn with_obs_period(mut self, period: impl Into<String>) -> Self {
        self.obs_period = period.into();
        self
    }

    /// Archive root directory.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Forecast model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Raw daily forecast file for `basin` issued at `window`.
    pub fn forecast_path(&self, window: &ForecastWindow, basin: &Basin) -> PathBuf {
        self.model_dir(window, "thiessen", basin)
            .join(format!("{}_{}.nc", self.run_stem(window), basin.full_name))
    }

    /// Observed daily series for `basin` over the calibration period.
    pub fn observation_path(&self, basin: &Basin) -> PathBuf {
        let (var, freq, obs) = (&self.variable, &self.frequency, &self.obs_dataset);
        self.root
            .join(obs)
            .join("calibration")
            .join(freq)
            .join(format!("{var}_thiessen"))
            .join(&basin.dir_name)
            .join(format!(
                "{var}_{freq}_{obs}_obs_{}_thiessen_{}.nc",
                self.obs_period, basin.full_name
            ))
    }

    /// Corrected output file for `basin` issued at `window`.
    pub fn output_path(&self, window: &ForecastWindow, basin: &Basin) -> PathBuf {
        self.model_dir(window, "thiessen_cor", basin).join(format!(
            "{}_{}_cor_gqmdes.nc",
            self.run_stem(window),
            basin.name
        ))
    }

    fn model_dir(&self, window: &ForecastWindow, kind: &str, basin: &Basin) -> PathBuf {
        self.root
            .join(&self.model)
            .join(&self.hindcast_tag)
            .join(window.month_abbrev())
            .join(&self.frequency)
            .join(format!("{}_{kind}", self.variable))
            .join(&basin.dir_name)
    }

    /// `{var}_{freq}_{model}_{hind}_fcst_{run}_{start}_{end}_thiessen`
    fn run_stem(&self, window: &ForecastWindow) -> String {
        format!(
            "{}_{}_{}_{}_fcst_{}_{}_{}_thiessen",
            self.variable,
            self.frequency,
            self.model,
            self.hindcast_tag,
            stamp(window.run_date()),
            stamp(window.forecast_start()),
            stamp(window.forecast_end()),
        )
    }
}
