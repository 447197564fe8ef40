use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

/// Fatal failures of the sensor.community archive pipeline.
///
/// A day without a published file is not an error, see [`crate::DailyFetch::Absent`].
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Parsing error processing CSV data for {date}")]
    CsvRead {
        date: NaiveDate,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in data for {date}")]
    MissingColumn { date: NaiveDate, column: String },

    #[error("Failed normalizing readings for {date}")]
    Normalize {
        date: NaiveDate,
        #[source]
        source: PolarsError,
    },

    #[error("No data found for any day between {start} and {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
