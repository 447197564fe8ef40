use crate::archive::clock::{Clock, SystemClock};
use crate::types::sensor::{SensorId, SensorType};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

pub const DEFAULT_ARCHIVE_URL: &str = "https://archive.sensor.community";

/// Builds the address of one day's CSV file in the sensor.community archive.
///
/// Days of the current year live directly under the base URL, older days are moved
/// into a `YYYY/` folder by the archive.
#[derive(Debug, Clone)]
pub struct ArchiveLocator {
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl ArchiveLocator {
    pub fn new(base_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, clock }
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(DEFAULT_ARCHIVE_URL, clock)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Examples
    ///
    /// ```
    /// use airquality::{ArchiveLocator, FixedClock, SensorId, SensorType};
    /// use chrono::NaiveDate;
    /// use std::sync::Arc;
    ///
    /// let today = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    /// let locator = ArchiveLocator::with_clock(Arc::new(FixedClock(today)));
    /// let day = NaiveDate::from_ymd_opt(2022, 6, 10).unwrap();
    ///
    /// assert_eq!(
    ///     locator.locate(SensorId(57925), SensorType::Sds011, day),
    ///     "https://archive.sensor.community/2022/2022-06-10/2022-06-10_sds011_sensor_57925.csv"
    /// );
    /// ```
    pub fn locate(&self, sensor: SensorId, sensor_type: SensorType, date: NaiveDate) -> String {
        let day = date.format("%Y-%m-%d");
        let filename = format!("{}_{}_sensor_{}.csv", day, sensor_type, sensor);
        if date.year() == self.clock.today().year() {
            format!("{}/{}/{}", self.base_url, day, filename)
        } else {
            format!("{}/{}/{}/{}", self.base_url, date.year(), day, filename)
        }
    }
}

impl Default for ArchiveLocator {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}
