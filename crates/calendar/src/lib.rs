//! # gqmdes-calendar
//!
//! Gregorian date arithmetic for seasonal forecast runs.
//!
//! A run issued on the 1st of month `m` forecasts the three following
//! calendar months. Each of those months is a lead segment, corrected
//! independently downstream.
//!
//! ## Quick Start
//!
//! ```
//! use gqmdes_calendar::ForecastWindow;
//!
//! // January 2024 run: leads Feb (leap, 29 days), Mar, Apr.
//! let window = ForecastWindow::new(2024, 1).unwrap();
//! assert_eq!(window.day_counts(), [29, 31, 30]);
//! assert_eq!(window.month_abbrev(), "jan");
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `month` | Month lengths and abbreviations |
//! | `window` | Run date and its three lead segments |
//! | `sequence` | Date sequence generation |
//! | `error` | Error types |

mod error;
mod month;
mod sequence;
mod window;

pub use error::CalendarError;
pub use month::{days_in_month, month_abbrev};
pub use sequence::date_sequence;
pub use window::{ForecastWindow, LeadSegment, N_LEADS, hindcast_windows, stamp};

pub use chrono::NaiveDate;
