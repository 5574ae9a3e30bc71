//! Seasonal correction: accumulate, map, downscale, reassemble.

use tracing::{debug, warn};

use crate::accumulate::{SegmentSlice, accumulate, downscale};
use crate::climatology::Climatology;
use crate::config::QmConfig;
use crate::error::QuantileMapError;
use crate::mapper::QuantileMapper;
use crate::result::{SeasonalCorrection, SegmentCorrection};

/// Number of monthly lead segments in a seasonal forecast.
pub const N_SEGMENTS: usize = 3;

/// Corrects one segment's daily forecast against its climatology.
///
/// The raw days are summed, the total is quantile-mapped, and the
/// corrected total is spread back over the raw daily shape.
///
/// # Errors
///
/// Returns [`QuantileMapError`] for an invalid config, a negative forecast
/// value, or a distribution that statrs refuses to build.
pub fn correct_segment(
    raw_daily: &[f64],
    climatology: &Climatology,
    config: &QmConfig,
) -> Result<SegmentCorrection, QuantileMapError> {
    check_forecast(raw_daily)?;
    correct_slice(SegmentSlice::new(raw_daily), climatology, config)
}

fn correct_slice(
    slice: SegmentSlice<'_>,
    climatology: &Climatology,
    config: &QmConfig,
) -> Result<SegmentCorrection, QuantileMapError> {
    let mapper = QuantileMapper::new(climatology, config)?;
    let correction = mapper.map(slice.total());
    if slice.total() == 0.0 {
        debug!(
            corrected = correction.value(),
            "raw segment total is zero, corrected days set to zero"
        );
    }
    let daily = downscale(slice.days(), slice.total(), correction.value());
    Ok(SegmentCorrection::new(slice.total(), correction, daily))
}

/// Corrects a seasonal daily forecast segment by segment.
///
/// `daily` is split by `day_counts`; segment `i` is mapped against
/// `climatologies[i]`. The corrected slices are concatenated in order.
/// Differing hindcast/observed lengths are logged and tolerated.
///
/// # Errors
///
/// Returns [`QuantileMapError::SeriesTooShort`] if `daily` does not cover
/// the segments, plus any error from [`correct_segment`].
#[tracing::instrument(skip_all, fields(n_days = daily.len()))]
pub fn correct_season(
    daily: &[f64],
    day_counts: [usize; N_SEGMENTS],
    climatologies: &[Climatology; N_SEGMENTS],
    config: &QmConfig,
) -> Result<SeasonalCorrection, QuantileMapError> {
    config.validate()?;
    check_forecast(daily)?;

    let slices = accumulate(daily, day_counts)?;
    let used: usize = day_counts.iter().sum();
    if daily.len() > used {
        debug!(surplus = daily.len() - used, "ignoring days past the last segment");
    }

    let mut segments = Vec::with_capacity(N_SEGMENTS);
    for (i, (slice, climatology)) in slices.into_iter().zip(climatologies).enumerate() {
        let lead = i + 1;
        if let Some((hindcast_len, observed_len)) = climatology.length_mismatch() {
            warn!(
                lead,
                hindcast_len, observed_len, "hindcast and observed climatology lengths differ"
            );
        }
        let segment = correct_slice(slice, climatology, config)?;
        debug!(
            lead,
            raw_total = segment.raw_total(),
            corrected_total = segment.correction().value(),
            "segment corrected"
        );
        segments.push(segment);
    }

    Ok(SeasonalCorrection::new(segments))
}

fn check_forecast(daily: &[f64]) -> Result<(), QuantileMapError> {
    match daily.iter().position(|&x| x < 0.0 || x.is_infinite()) {
        Some(index) => Err(QuantileMapError::InvalidValue {
            which: "forecast",
            index,
            value: daily[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::FallbackReason;
    use approx::assert_relative_eq;

    fn ramp(n: usize, start: f64, step: f64) -> Vec<f64> {
        (0..n).map(|i| start + step * i as f64).collect()
    }

    fn fitted_climatology() -> Climatology {
        Climatology::new(ramp(30, 40.0, 10.0), ramp(30, 20.0, 5.0)).unwrap()
    }

    #[test]
    fn segment_total_matches_corrected_value() {
        let raw = [0.0, 3.0, 0.0, 7.5, 1.5, 0.0, 8.0];
        let seg = correct_segment(&raw, &fitted_climatology(), &QmConfig::new()).unwrap();
        assert_relative_eq!(seg.raw_total(), 20.0);
        let sum: f64 = seg.daily().iter().sum();
        assert_relative_eq!(sum, seg.correction().value(), epsilon = 1e-9);
        for (r, c) in raw.iter().zip(seg.daily()) {
            assert_eq!(*r == 0.0, *c == 0.0);
        }
    }

    #[test]
    fn zero_raw_total_yields_zero_days() {
        let clim = Climatology::new(ramp(30, 40.0, 10.0), ramp(30, 20.0, 5.0)).unwrap();
        let seg = correct_segment(&[0.0; 5], &clim, &QmConfig::new()).unwrap();
        // No-zero mode maps a zero total to the observed floor...
        assert_eq!(seg.correction().value(), 20.0);
        // ...but there is no daily shape to carry it.
        assert_eq!(seg.daily(), &[0.0; 5]);
    }

    #[test]
    fn negative_forecast_rejected() {
        let err = correct_segment(&[1.0, -1.0], &fitted_climatology(), &QmConfig::new());
        assert!(matches!(
            err,
            Err(QuantileMapError::InvalidValue {
                which: "forecast",
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn season_concatenates_segments() {
        let daily: Vec<f64> = ramp(10, 1.0, 1.0);
        let short = Climatology::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        let clims = [fitted_climatology(), short.clone(), short];
        let season = correct_season(&daily, [4, 3, 3], &clims, &QmConfig::new()).unwrap();

        assert_eq!(season.daily().len(), 10);
        assert_eq!(season.segments().len(), 3);
        // Segments 2 and 3 fall back and keep the raw values.
        for (c, r) in season.daily()[4..].iter().zip(&daily[4..]) {
            assert_relative_eq!(*c, *r, epsilon = 1e-12);
        }
        let reasons: Vec<usize> = season.fallbacks().iter().map(|(i, _)| *i).collect();
        assert_eq!(reasons, vec![1, 2]);
        assert!(matches!(
            season.fallbacks()[0].1,
            FallbackReason::InsufficientSample { .. }
        ));
    }

    #[test]
    fn season_rejects_short_series() {
        let clims = [
            fitted_climatology(),
            fitted_climatology(),
            fitted_climatology(),
        ];
        let result = correct_season(&[1.0; 5], [2, 2, 2], &clims, &QmConfig::new());
        assert!(matches!(
            result,
            Err(QuantileMapError::SeriesTooShort { needed: 6, got: 5 })
        ));
    }
}
