//! Zero-inflated Gamma quantile mapping for seasonal precipitation
//! forecasts (gQM-DES).
//!
//! A seasonal forecast covers three monthly lead segments. Each segment is
//! corrected independently: the daily forecast is accumulated to a total,
//! the total is mapped from the model's hindcast climatology onto the
//! observed climatology, and the corrected total is spread back over the
//! original daily shape.
//!
//! # Pipeline
//!
//! 1. **Accumulate** the daily forecast into per-segment totals
//! 2. **Split** hindcast and observed climatologies at the observed zero mass
//! 3. **Fit** zero-location Gamma distributions to both positive tails
//! 4. **Map** each total: pgamma → \[clamp\] → qgamma, with the zero-mass rules
//! 5. **Downscale** the corrected total over the raw daily shape
//!
//! Every function is pure; segments and basins can be corrected
//! concurrently without coordination.
//!
//! # Glossary
//!
//! - **Hindcast**: model runs for past years, one total per year
//! - **pgamma**: Gamma CDF (cumulative distribution function)
//! - **qgamma**: Gamma quantile function (inverse CDF)
//! - **Cutoff**: largest hindcast value inside the matched zero mass
//!
//! # Quick Start
//!
//! ```no_run
//! use gqmdes_quantile_map::{Climatology, QmConfig, correct_season};
//!
//! # fn load() -> (Vec<f64>, [Climatology; 3]) { unimplemented!() }
//! // 89 days of forecast (Feb + Mar + Apr) and one climatology per lead.
//! let (daily, climatologies) = load();
//! let config = QmConfig::new();
//!
//! let result = correct_season(&daily, [28, 31, 30], &climatologies, &config)?;
//! for (lead, reason) in result.fallbacks() {
//!     eprintln!("lead {} not corrected: {reason}", lead + 1);
//! }
//! # Ok::<(), gqmdes_quantile_map::QuantileMapError>(())
//! ```

mod accumulate;
mod climatology;
mod config;
mod error;
mod fit;
pub(crate) mod gamma;
mod mapper;
mod pipeline;
mod result;
mod split;

pub use accumulate::{SegmentSlice, accumulate, downscale};
pub use climatology::Climatology;
pub use config::{FitMethod, QmConfig};
pub use error::QuantileMapError;
pub use fit::fit_gamma;
pub use gamma::GammaParams;
pub use mapper::QuantileMapper;
pub use pipeline::{N_SEGMENTS, correct_season, correct_segment};
pub use result::{Correction, FallbackReason, SeasonalCorrection, SegmentCorrection};
pub use split::{ZeroMode, ZeroSplit};
