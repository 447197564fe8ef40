use crate::archive::error::ArchiveError;
use crate::archive::normalize::read_day_csv;
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::frame::DataFrame;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Outcome of fetching one archive day.
#[derive(Debug, Clone)]
pub enum DailyFetch {
    /// The raw day table, with the upstream column names.
    Found(DataFrame),
    /// The archive has no file for this day.
    Absent,
}

/// Retrieves the raw table published for one day.
///
/// Implementations return [`DailyFetch::Absent`] when the upstream confirms the day
/// has no data, and an [`ArchiveError`] for every other failure.
#[allow(async_fn_in_trait)]
pub trait DailyFetcher {
    async fn fetch(&self, date: NaiveDate, address: &str) -> Result<DailyFetch, ArchiveError>;
}

/// [`DailyFetcher`] downloading day files over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDailyFetcher {
    client: Client,
}

impl HttpDailyFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::new(client))
    }
}

impl DailyFetcher for HttpDailyFetcher {
    async fn fetch(&self, date: NaiveDate, address: &str) -> Result<DailyFetch, ArchiveError> {
        debug!("Downloading archive day {} from {}", date, address);

        let response = self
            .client
            .get(address)
            .send()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(address.to_string(), e))?;

        if response.status() == StatusCode::NOT_FOUND {
            info!("CSV not found for date: {}", date);
            return Ok(DailyFetch::Absent);
        }

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", address, e);
                return Err(if let Some(status) = e.status() {
                    ArchiveError::HttpStatus {
                        url: address.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ArchiveError::NetworkRequest(address.to_string(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(address.to_string(), e))?;
        debug!("Received {} bytes for {}", body.len(), date);

        read_day_csv(body.to_vec(), date).map(DailyFetch::Found)
    }
}
