use crate::error::AirQualityError;
use crate::types::date_range::parse_date;
use crate::types::sensor::{SensorId, SensorType};
use chrono::NaiveDate;

/// Describes which archive files to aggregate: one per day in `start..=end`.
///
/// Building a request performs no I/O, pass it to
/// [`crate::RangeAggregator::aggregate`] or [`crate::AirQuality::readings`].
///
/// # Examples
///
/// ```
/// use airquality::{SensorId, SensorRequest, SensorType};
/// use chrono::NaiveDate;
///
/// let request = SensorRequest::builder()
///     .start(NaiveDate::from_ymd_opt(2022, 6, 10).unwrap())
///     .end(NaiveDate::from_ymd_opt(2022, 6, 24).unwrap())
///     .sensor(SensorId(57925))
///     .build();
///
/// assert_eq!(request.sensor_type, SensorType::Sds011);
/// assert_eq!(request.days().count(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bon::Builder)]
pub struct SensorRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[builder(default)]
    pub sensor: SensorId,
    #[builder(default)]
    pub sensor_type: SensorType,
}

impl SensorRequest {
    pub fn new(start: NaiveDate, end: NaiveDate, sensor: SensorId) -> Self {
        Self {
            start,
            end,
            sensor,
            sensor_type: SensorType::default(),
        }
    }

    /// Builds a request from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::InvalidDate`] if either date cannot be parsed.
    pub fn parse(start: &str, end: &str, sensor: SensorId) -> Result<Self, AirQualityError> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?, sensor))
    }

    /// Every calendar day in `start..=end`, ascending. Empty if `start > end`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
