use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use tracing::{error, info, warn};

use gqmdes_calendar::{ForecastWindow, N_LEADS, hindcast_windows};
use gqmdes_io::{
    ArchiveLayout, Basin, IoError, OutputMetadata, SegmentTotals, read_forecast,
    read_hindcast_climatology, read_observed_climatology, write_corrected,
};
use gqmdes_quantile_map::{Climatology, QmConfig, correct_season};

use crate::basins::{self, Selection};
use crate::cli::CorrectArgs;
use crate::config::GqmdesConfig;
use crate::convert;

/// What happened to one basin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasinOutcome {
    /// Output written; `fallbacks` segments kept the raw forecast.
    Corrected { fallbacks: usize },
    /// The forecast file does not exist yet.
    Unavailable,
    /// Correction stopped with an error; later basins still run.
    Failed,
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub corrected: usize,
    pub unavailable: usize,
    pub fallback_segments: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: BasinOutcome) {
        match outcome {
            BasinOutcome::Corrected { fallbacks } => {
                self.corrected += 1;
                self.fallback_segments += fallbacks;
            }
            BasinOutcome::Unavailable => self.unavailable += 1,
            BasinOutcome::Failed => self.failed += 1,
        }
    }
}

/// Run the `correct` subcommand.
pub fn run(args: CorrectArgs) -> Result<()> {
    let config = GqmdesConfig::load(&args.config)?;
    let selection = Selection::from_args(&args)?;
    let basins = basins::expand(&config.basins, &selection)?;
    let qm_config = convert::build_qm_config(&config.correction)?;
    let years = convert::hindcast_years(&config.hindcast)?;
    let layout = convert::build_archive_layout(&config.archive, args.local_dir, args.model_name);

    let today = chrono::Local::now().date_naive();
    let year = args.year_target.unwrap_or_else(|| today.year());
    let month = args.month_target.unwrap_or_else(|| today.month());
    let window = ForecastWindow::new(year, month).context("invalid run date")?;
    let hindcast = hindcast_windows(month, years).context("invalid hindcast period")?;

    info!(
        model = layout.model(),
        year,
        month,
        n_basins = basins.len(),
        "starting bias correction"
    );

    let summary = correct_all(&layout, &window, &hindcast, &basins, &qm_config);
    info!(
        corrected = summary.corrected,
        unavailable = summary.unavailable,
        failed = summary.failed,
        fallback_segments = summary.fallback_segments,
        "bias correction finished"
    );
    Ok(())
}

/// Corrects every basin in order. A failing basin is logged and counted;
/// it never stops the basins after it.
pub fn correct_all(
    layout: &ArchiveLayout,
    window: &ForecastWindow,
    hindcast: &[ForecastWindow],
    basins: &[Basin],
    qm_config: &QmConfig,
) -> Summary {
    let mut summary = Summary::default();
    for basin in basins {
        info!(basin = %basin.name, "processing basin");
        let outcome = match correct_basin(layout, window, hindcast, basin, qm_config) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(basin = %basin.name, "basin correction failed: {e:#}");
                BasinOutcome::Failed
            }
        };
        summary.record(outcome);
    }
    summary
}

/// Corrects one basin's forecast and writes the result.
pub fn correct_basin(
    layout: &ArchiveLayout,
    window: &ForecastWindow,
    hindcast: &[ForecastWindow],
    basin: &Basin,
    qm_config: &QmConfig,
) -> Result<BasinOutcome> {
    let daily = match read_forecast(layout, window, basin) {
        Ok(daily) => daily,
        Err(IoError::FileNotFound { path }) => {
            warn!(
                basin = %basin.name,
                path = %path.display(),
                "forecast not available, skipping basin"
            );
            return Ok(BasinOutcome::Unavailable);
        }
        Err(e) => return Err(e).context("failed to read forecast"),
    };

    let hind = read_hindcast_climatology(layout, hindcast, basin)
        .context("failed to read hindcast climatology")?;
    let obs = read_observed_climatology(layout, hindcast, basin)
        .context("failed to read observed climatology")?;
    let climatologies = pair_climatologies(hind, obs)?;

    let result = correct_season(&daily, window.day_counts(), &climatologies, qm_config)?;
    let fallbacks = result.fallbacks();
    for (lead, reason) in &fallbacks {
        warn!(
            basin = %basin.name,
            lead = lead + 1,
            %reason,
            "segment not corrected, keeping raw forecast"
        );
    }

    let path = layout.output_path(window, basin);
    let meta = OutputMetadata {
        model: layout.model().to_string(),
        basin: basin.name.clone(),
    };
    write_corrected(&path, result.daily(), window, layout.variable(), &meta)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(BasinOutcome::Corrected {
        fallbacks: fallbacks.len(),
    })
}

fn pair_climatologies(hind: SegmentTotals, obs: SegmentTotals) -> Result<[Climatology; N_LEADS]> {
    let mut out = Vec::with_capacity(N_LEADS);
    for (lead, (h, o)) in hind.into_iter().zip(obs).enumerate() {
        let climatology = Climatology::new(h, o)
            .with_context(|| format!("invalid climatology for lead {}", lead + 1))?;
        out.push(climatology);
    }
    out.try_into()
        .map_err(|_| anyhow!("expected {N_LEADS} lead climatologies"))
}
