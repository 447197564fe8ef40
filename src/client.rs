//! This module provides the main entry point: a client bundling the
//! sensor.community archive pipeline and the APPA Trento bulletin source.

use crate::appa::client::{AppaClient, DEFAULT_APPA_URL};
use crate::appa::station::{AppaDate, AppaStation};
use crate::archive::aggregator::RangeAggregator;
use crate::archive::clock::{Clock, SystemClock};
use crate::archive::fetcher::{HttpDailyFetcher, DEFAULT_TIMEOUT, USER_AGENT};
use crate::archive::locator::{ArchiveLocator, DEFAULT_ARCHIVE_URL};
use crate::error::AirQualityError;
use crate::types::appa_frame::AppaFrame;
use crate::types::reading_frame::ReadingFrame;
use crate::types::request::SensorRequest;
use crate::types::sensor::{SensorId, SensorType};
use bon::bon;
use chrono::NaiveDate;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// The main client for fetching air quality data.
///
/// Holds one HTTP client shared by both sources. Nothing is cached: every call goes
/// to the network, one request at a time.
///
/// # Examples
///
/// ```no_run
/// # use airquality::{AirQuality, AirQualityError, DateRange, HourRange, SensorId, SensorRequest};
/// # #[tokio::main]
/// # async fn main() -> Result<(), AirQualityError> {
/// let client = AirQuality::with_defaults()?;
/// let request = SensorRequest::parse("2022-06-10", "2022-06-24", SensorId(57925))?;
///
/// let readings = client.readings(&request).await?;
/// let mornings = readings.filter(&DateRange::new("2022-06-18", "2022-06-20")?, &HourRange::new(6, 10)?);
/// println!("{}", mornings.collect()?);
/// # Ok(())
/// # }
/// ```
pub struct AirQuality {
    aggregator: RangeAggregator<HttpDailyFetcher>,
    appa: AppaClient,
}

#[bon]
impl AirQuality {
    /// Creates a client, all options are optional.
    ///
    /// # Arguments
    ///
    /// * `.archive_url(String)`: base of the sensor.community archive. Defaults to [`DEFAULT_ARCHIVE_URL`].
    /// * `.appa_url(String)`: base of the APPA bulletin service. Defaults to [`DEFAULT_APPA_URL`].
    /// * `.timeout(Duration)`: per-request timeout. Defaults to 30 seconds.
    /// * `.clock(Arc<dyn Clock>)`: source of the current year for archive paths. Defaults to [`SystemClock`].
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::HttpClient`] if the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// # use airquality::{AirQuality, AirQualityError};
    /// # use std::time::Duration;
    /// # fn run() -> Result<(), AirQualityError> {
    /// let client = AirQuality::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        archive_url: Option<String>,
        appa_url: Option<String>,
        timeout: Option<Duration>,
        clock: Option<Arc<dyn Clock>>,
    ) -> Result<Self, AirQualityError> {
        let http = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(USER_AGENT)
            .build()
            .map_err(AirQualityError::HttpClient)?;

        let clock = clock.unwrap_or_else(|| Arc::new(SystemClock));
        let locator = ArchiveLocator::new(
            archive_url.unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string()),
            clock,
        );

        Ok(Self {
            aggregator: RangeAggregator::new(HttpDailyFetcher::new(http.clone()), locator),
            appa: AppaClient::new(
                appa_url.unwrap_or_else(|| DEFAULT_APPA_URL.to_string()),
                http,
            ),
        })
    }

    pub fn with_defaults() -> Result<Self, AirQualityError> {
        Self::builder().build()
    }

    /// Aggregates all archive days of `request` into one [`ReadingFrame`].
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Archive`] wrapping
    /// [`crate::ArchiveError::EmptyRange`] when no day had data, or the first fatal
    /// transport, parse or schema error.
    pub async fn readings(&self, request: &SensorRequest) -> Result<ReadingFrame, AirQualityError> {
        Ok(self.aggregator.aggregate(request).await?)
    }

    /// Builder form of [`AirQuality::readings`].
    ///
    /// ```no_run
    /// # use airquality::{AirQuality, AirQualityError, SensorId};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), AirQualityError> {
    /// let client = AirQuality::with_defaults()?;
    /// let readings = client
    ///     .sensor_readings()
    ///     .start(NaiveDate::from_ymd_opt(2022, 5, 20).unwrap())
    ///     .end(NaiveDate::from_ymd_opt(2022, 5, 27).unwrap())
    ///     .sensor(SensorId(57925))
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn sensor_readings(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        sensor: Option<SensorId>,
        sensor_type: Option<SensorType>,
    ) -> Result<ReadingFrame, AirQualityError> {
        let request = SensorRequest {
            start,
            end,
            sensor: sensor.unwrap_or_default(),
            sensor_type: sensor_type.unwrap_or_default(),
        };
        self.readings(&request).await
    }

    /// Fetches an APPA bulletin. Defaults to the last published day at Trento Santa Chiara.
    ///
    /// ```no_run
    /// # use airquality::{AirQuality, AirQualityError, AppaStation};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), AirQualityError> {
    /// let client = AirQuality::with_defaults()?;
    /// let bulletin = client
    ///     .appa()
    ///     .date("2022-05-20".parse()?)
    ///     .stations(vec![AppaStation::TrentoSantaChiara, AppaStation::Rovereto])
    ///     .call()
    ///     .await?;
    /// for pollutant in bulletin.pollutants()? {
    ///     println!("{}:\n{}", pollutant, bulletin.for_pollutant(&pollutant).collect()?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn appa(
        &self,
        date: Option<AppaDate>,
        stations: Option<Vec<AppaStation>>,
    ) -> Result<AppaFrame, AirQualityError> {
        let date = date.unwrap_or_default();
        let stations = stations.unwrap_or_else(|| vec![AppaStation::default()]);
        self.appa.fetch(&date, &stations).await
    }
}
