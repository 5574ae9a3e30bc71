//! Pure conversion functions: TOML config structs -> crate API config types.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{Result, bail};

use gqmdes_io::ArchiveLayout;
use gqmdes_quantile_map::{FitMethod, QmConfig};

use crate::config::{ArchiveToml, CorrectionToml, HindcastToml};

/// Parses a Gamma fit method name into the corresponding enum variant.
pub fn parse_fit_method(s: &str) -> Result<FitMethod> {
    match s.to_lowercase().as_str() {
        "mle" => Ok(FitMethod::Mle),
        "mme" | "moments" => Ok(FitMethod::Mme),
        other => bail!("unknown fit method: {other:?}"),
    }
}

/// Builds a validated [`QmConfig`] from the TOML correction settings.
pub fn build_qm_config(correction: &CorrectionToml) -> Result<QmConfig> {
    let cfg = QmConfig::new()
        .with_min_sample_len(correction.min_sample_len)
        .with_saturated_prob(correction.saturated_prob)
        .with_fit_method(parse_fit_method(&correction.fit_method)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`ArchiveLayout`], applying command-line overrides.
pub fn build_archive_layout(
    archive: &ArchiveToml,
    local_dir: Option<PathBuf>,
    model_name: Option<String>,
) -> ArchiveLayout {
    ArchiveLayout::default()
        .with_root(local_dir.unwrap_or_else(|| archive.root.clone()))
        .with_model(model_name.unwrap_or_else(|| archive.model.clone()))
        .with_hindcast_tag(&archive.hindcast_tag)
        .with_variable(&archive.variable)
        .with_frequency(&archive.frequency)
        .with_obs_dataset(&archive.obs_dataset)
        .with_obs_period(&archive.obs_period)
}

/// The hindcast years as an inclusive range.
pub fn hindcast_years(hindcast: &HindcastToml) -> Result<RangeInclusive<i32>> {
    if hindcast.first_year > hindcast.last_year {
        bail!(
            "hindcast first_year ({}) is after last_year ({})",
            hindcast.first_year,
            hindcast.last_year
        );
    }
    Ok(hindcast.first_year..=hindcast.last_year)
}
