//! # gqmdes-io
//!
//! Archive access for the seasonal bias correction: where forecast,
//! hindcast and observed basin series live, how to read them from
//! NetCDF, and how corrected series are written back.
//!
//! All readers return plain `Vec<f64>` series so the correction crates
//! stay free of file formats.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `layout` | Archive naming conventions and basin descriptors |
//! | `reader` | Forecast reads and climatology accumulation |
//! | `writer` | Corrected-series output |
//! | `error` | Error types |

mod error;
mod layout;
mod netcdf_read;
mod reader;
mod writer;

pub use error::IoError;
pub use layout::{ArchiveLayout, Basin};
pub use reader::{
    SegmentTotals, read_forecast, read_hindcast_climatology, read_observed_climatology,
    read_series, segment_totals,
};
pub use writer::{METHOD, OutputMetadata, write_corrected};
