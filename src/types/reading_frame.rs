//! Contains the `ReadingFrame` structure for querying aggregated particulate matter readings.

use crate::error::AirQualityError;
use crate::smoothing::{correlation, moving_average};
use crate::types::columns::{DATE, HOUR, PM10, PM10_MA, PM2_5, PM2_5_MA, TIMESTAMP};
use crate::types::date_range::DateRange;
use crate::types::hour_range::HourRange;
use crate::types::reading::Reading;
use chrono::{DateTime, NaiveDate};
use polars::prelude::{col, lit, DataFrame, Expr, LazyFrame};
use std::fmt;

/// Days between 0001-01-01 and the Unix epoch, polars stores `Date` as days since the epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A wrapper around a Polars `LazyFrame` holding readings of one sensor.
///
/// The frame always carries the columns listed in [`crate::columns`]: `timestamp`,
/// `pm10`, `pm2_5` and the derived `hour` and `date`. Rows keep the order in which
/// the archive days were concatenated (ascending day, then the order inside each
/// file); the frame is not re-sorted by timestamp.
///
/// Every query method returns a *new* `ReadingFrame`, the source frame is never modified.
///
/// Instances are typically obtained via [`crate::AirQuality::readings`] or
/// [`crate::RangeAggregator::aggregate`].
///
/// # Errors
///
/// Operations that trigger computation on the underlying `LazyFrame` (e.g. [`ReadingFrame::collect`])
/// can return [`AirQualityError::Polars`].
#[derive(Clone)]
pub struct ReadingFrame {
    /// The underlying Polars LazyFrame containing the readings.
    pub frame: LazyFrame,
}

impl fmt::Debug for ReadingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingFrame").finish_non_exhaustive()
    }
}

impl ReadingFrame {
    /// Creates a new `ReadingFrame` wrapping the given Polars `LazyFrame`.
    ///
    /// The frame is assumed to have the schema described on [`ReadingFrame`].
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Filters the readings based on a Polars predicate expression.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use airquality::{AirQuality, SensorId, SensorRequest};
    /// use polars::prelude::{col, lit};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AirQuality::with_defaults()?;
    /// let request = SensorRequest::parse("2022-06-10", "2022-06-24", SensorId(57925))?;
    /// let readings = client.readings(&request).await?;
    ///
    /// // Readings above the EU daily PM10 limit
    /// let polluted = readings.filter_expr(col("pm10").gt(lit(50.0f64)));
    /// println!("{}", polluted.collect()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter_expr(&self, predicate: Expr) -> ReadingFrame {
        ReadingFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps rows whose derived `date` lies within `range` (inclusive).
    ///
    /// An open start means "from the earliest row", an open end "to the latest row".
    /// A fully open range returns the frame unchanged; a range whose start is after
    /// its end selects no rows.
    pub fn filter_by_date(&self, range: &DateRange) -> ReadingFrame {
        match (range.start, range.end) {
            (None, None) => self.clone(),
            (Some(start), None) => self.filter_expr(col(DATE).gt_eq(lit(start))),
            (None, Some(end)) => self.filter_expr(col(DATE).lt_eq(lit(end))),
            (Some(start), Some(end)) => self.filter_expr(
                col(DATE)
                    .gt_eq(lit(start))
                    .and(col(DATE).lt_eq(lit(end))),
            ),
        }
    }

    /// Keeps rows whose derived `hour` satisfies `start <= hour <= end`.
    pub fn filter_by_hour(&self, range: &HourRange) -> ReadingFrame {
        if range.is_all() {
            return self.clone();
        }
        self.filter_expr(
            col(HOUR)
                .gt_eq(lit(range.start() as i32))
                .and(col(HOUR).lt_eq(lit(range.end() as i32))),
        )
    }

    /// Applies [`ReadingFrame::filter_by_date`] and then [`ReadingFrame::filter_by_hour`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use airquality::{AirQuality, DateRange, HourRange, SensorId, SensorRequest};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AirQuality::with_defaults()?;
    /// let request = SensorRequest::parse("2022-06-10", "2022-06-24", SensorId(57925))?;
    /// let readings = client.readings(&request).await?;
    ///
    /// // Morning readings between the 18th and the 20th
    /// let mornings = readings.filter(
    ///     &DateRange::new("2022-06-18", "2022-06-20")?,
    ///     &HourRange::new(6, 10)?,
    /// );
    /// println!("{:?}", mornings.pm10()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, dates: &DateRange, hours: &HourRange) -> ReadingFrame {
        self.filter_by_date(dates).filter_by_hour(hours)
    }

    /// Adds `pm10_ma` and `pm2_5_ma` columns holding a trailing moving average over
    /// `window` rows, in frame order. The first `window - 1` values are null, and so is
    /// every window that contains a missing reading.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::InvalidWindow`] if `window` is zero.
    pub fn with_moving_average(&self, window: usize) -> Result<ReadingFrame, AirQualityError> {
        Ok(ReadingFrame::new(self.frame.clone().with_columns([
            moving_average(PM10, window)?.alias(PM10_MA),
            moving_average(PM2_5, window)?.alias(PM2_5_MA),
        ])))
    }

    /// Pearson correlation between `pm10` and `pm2_5` over rows where both are present.
    ///
    /// `None` with fewer than two such rows or when either column is constant.
    pub fn pm_correlation(&self) -> Result<Option<f64>, AirQualityError> {
        correlation(self.frame.clone(), PM10, PM2_5)
    }

    pub fn collect(&self) -> Result<DataFrame, AirQualityError> {
        Ok(self.frame.clone().collect()?)
    }

    pub fn height(&self) -> Result<usize, AirQualityError> {
        Ok(self.collect()?.height())
    }

    pub fn pm10(&self) -> Result<Vec<Option<f64>>, AirQualityError> {
        float_values(&self.collect()?, PM10)
    }

    pub fn pm2_5(&self) -> Result<Vec<Option<f64>>, AirQualityError> {
        float_values(&self.collect()?, PM2_5)
    }

    /// Earliest and latest derived date, `None` when the frame is empty.
    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, AirQualityError> {
        let df = self
            .frame
            .clone()
            .select([
                col(DATE).min().alias("first"),
                col(DATE).max().alias("last"),
            ])
            .collect()?;
        let first = df.column("first")?.date()?.get(0).and_then(date_from_epoch_days);
        let last = df.column("last")?.date()?.get(0).and_then(date_from_epoch_days);
        Ok(first.zip(last))
    }

    /// Collects the frame into [`Reading`] structs, in frame order.
    pub fn readings(&self) -> Result<Vec<Reading>, AirQualityError> {
        let df = self.collect()?;
        let timestamps = df.column(TIMESTAMP)?.datetime()?;
        let pm10 = df.column(PM10)?.f64()?;
        let pm2_5 = df.column(PM2_5)?.f64()?;
        let hours = df.column(HOUR)?.i32()?;
        let dates = df.column(DATE)?.date()?;

        let mut readings = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let timestamp = timestamps
                .get(idx)
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.naive_utc());
            let date = dates.get(idx).and_then(date_from_epoch_days);
            let hour = hours.get(idx).and_then(|h| u32::try_from(h).ok());
            if let (Some(timestamp), Some(date), Some(hour)) = (timestamp, date, hour) {
                readings.push(Reading {
                    timestamp,
                    pm10: pm10.get(idx),
                    pm2_5: pm2_5.get(idx),
                    hour,
                    date,
                });
            }
        }
        Ok(readings)
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AirQualityError> {
    Ok(df.column(name)?.f64()?.into_iter().collect())
}
