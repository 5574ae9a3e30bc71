use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level gqmdes configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GqmdesConfig {
    /// Archive naming.
    #[serde(default)]
    pub archive: ArchiveToml,

    /// Hindcast period.
    #[serde(default)]
    pub hindcast: HindcastToml,

    /// Quantile-mapping settings.
    #[serde(default)]
    pub correction: CorrectionToml,

    /// Known basins, in processing order.
    #[serde(default)]
    pub basins: Vec<BasinToml>,
}

impl GqmdesConfig {
    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveToml {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_hindcast_tag")]
    pub hindcast_tag: String,
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default = "default_obs_dataset")]
    pub obs_dataset: String,
    #[serde(default = "default_obs_period")]
    pub obs_period: String,
}

impl Default for ArchiveToml {
    fn default() -> Self {
        Self {
            root: default_root(),
            model: default_model(),
            hindcast_tag: default_hindcast_tag(),
            variable: default_variable(),
            frequency: default_frequency(),
            obs_dataset: default_obs_dataset(),
            obs_period: default_obs_period(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("/io")
}
fn default_model() -> String {
    "rsm2008".to_string()
}
fn default_hindcast_tag() -> String {
    "hind8110".to_string()
}
fn default_variable() -> String {
    "pr".to_string()
}
fn default_frequency() -> String {
    "daily".to_string()
}
fn default_obs_dataset() -> String {
    "inmet_ana_chirps_merge".to_string()
}
fn default_obs_period() -> String {
    "19610101_20141231".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HindcastToml {
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    #[serde(default = "default_last_year")]
    pub last_year: i32,
}

impl Default for HindcastToml {
    fn default() -> Self {
        Self {
            first_year: default_first_year(),
            last_year: default_last_year(),
        }
    }
}

fn default_first_year() -> i32 {
    1981
}
fn default_last_year() -> i32 {
    2010
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionToml {
    #[serde(default = "default_min_sample_len")]
    pub min_sample_len: usize,
    #[serde(default = "default_saturated_prob")]
    pub saturated_prob: f64,
    #[serde(default = "default_fit_method")]
    pub fit_method: String,
}

impl Default for CorrectionToml {
    fn default() -> Self {
        Self {
            min_sample_len: default_min_sample_len(),
            saturated_prob: default_saturated_prob(),
            fit_method: default_fit_method(),
        }
    }
}

fn default_min_sample_len() -> usize {
    15
}
fn default_saturated_prob() -> f64 {
    0.99
}
fn default_fit_method() -> String {
    "mle".to_string()
}

/// Whether a basin is a main catchment or a sub-catchment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasinKind {
    Macro,
    Micro,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasinToml {
    pub name: String,
    pub dir_name: String,
    pub full_name: String,
    pub kind: BasinKind,
    /// Macro basin a micro basin belongs to.
    #[serde(default)]
    pub parent: Option<String>,
}
