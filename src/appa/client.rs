use crate::appa::error::AppaError;
use crate::appa::station::{AppaDate, AppaStation};
use crate::error::AirQualityError;
use crate::types::appa_frame::AppaFrame;
use log::{debug, info, warn};
use polars::prelude::*;
use reqwest::Client;
use std::io::Cursor;

pub const DEFAULT_APPA_URL: &str = "https://bollettino.appa.tn.it/aria/opendata/csv";

/// Downloads hourly station bulletins from APPA Trento.
#[derive(Debug, Clone)]
pub struct AppaClient {
    base_url: String,
    client: Client,
}

impl AppaClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// `{base}/{date}/{code},{code},...`
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::NoStations`] if `stations` is empty.
    pub fn locate(&self, date: &AppaDate, stations: &[AppaStation]) -> Result<String, AirQualityError> {
        if stations.is_empty() {
            return Err(AirQualityError::NoStations);
        }
        let codes: Vec<String> = stations.iter().map(|s| s.code().to_string()).collect();
        Ok(format!("{}/{}/{}", self.base_url, date, codes.join(",")))
    }

    pub async fn fetch(
        &self,
        date: &AppaDate,
        stations: &[AppaStation],
    ) -> Result<AppaFrame, AirQualityError> {
        let url = self.locate(date, stations)?;
        info!("Downloading APPA bulletin from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppaError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => AppaError::HttpStatus {
                        url,
                        status,
                        source: e,
                    },
                    None => AppaError::NetworkRequest(url, e),
                }
                .into());
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| AppaError::NetworkRequest(url.clone(), e))?;
        debug!("Received {} bytes from {}", body.len(), url);

        let df = read_appa_csv(decode_latin1(&body), &url)?;
        Ok(AppaFrame::new(df.lazy()))
    }
}

/// Bulletins are served as ISO-8859-1, whose code points map one to one onto `char`.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

fn read_appa_csv(text: String, url: &str) -> Result<DataFrame, AppaError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|source| AppaError::CsvRead {
            url: url.to_string(),
            source,
        })
}
