//! Trailing moving average and correlation over reading series.

use crate::error::AirQualityError;
use polars::prelude::*;

const SERIES: &str = "series";
const LEFT: &str = "left";
const RIGHT: &str = "right";

/// Trailing rolling mean of `column` that needs a full window of values.
///
/// A window of one is the column itself.
pub(crate) fn moving_average(column: &str, window: usize) -> Result<Expr, AirQualityError> {
    match window {
        0 => Err(AirQualityError::InvalidWindow),
        1 => Ok(col(column)),
        _ => Ok(col(column).rolling_mean(RollingOptionsFixedWindow {
            window_size: window,
            min_periods: window,
            ..Default::default()
        })),
    }
}

/// Trailing moving average with a window of `window` samples.
///
/// `output[i]` is the mean of `series[i + 1 - window..=i]`. Positions without a full
/// window of history, and windows containing a missing value, are `None`. The output
/// always has the same length as the input.
///
/// # Errors
///
/// Returns [`AirQualityError::InvalidWindow`] if `window` is zero.
///
/// # Examples
///
/// ```
/// use airquality::smooth;
///
/// let series = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
/// assert_eq!(smooth(&series, 2).unwrap(), vec![None, Some(1.5), Some(2.5), Some(3.5)]);
/// assert_eq!(smooth(&series, 1).unwrap(), series.to_vec());
/// ```
pub fn smooth(series: &[Option<f64>], window: usize) -> Result<Vec<Option<f64>>, AirQualityError> {
    let average = moving_average(SERIES, window)?;
    let df = polars::df!(SERIES => series.to_vec())?;
    let smoothed = df.lazy().select([average.alias(SERIES)]).collect()?;
    Ok(smoothed.column(SERIES)?.f64()?.into_iter().collect())
}

/// Pearson correlation over the positions where both series have a value.
///
/// Series of different length are compared over the shorter one. Returns `None` with
/// fewer than two such positions or when either side is constant.
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Result<Option<f64>, AirQualityError> {
    let len = a.len().min(b.len());
    let df = polars::df!(LEFT => a[..len].to_vec(), RIGHT => b[..len].to_vec())?;
    correlation(df.lazy(), LEFT, RIGHT)
}

/// Evaluates the Pearson correlation of two columns of `frame`, `None` when undefined.
pub(crate) fn correlation(
    frame: LazyFrame,
    left: &str,
    right: &str,
) -> Result<Option<f64>, AirQualityError> {
    let df = frame
        .select([pearson_corr(col(left), col(right)).alias("r")])
        .collect()?;
    Ok(df.column("r")?.f64()?.get(0).filter(|r| r.is_finite()))
}
