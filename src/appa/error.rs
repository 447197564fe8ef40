use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppaError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Parsing error processing APPA CSV data from {url}")]
    CsvRead {
        url: String,
        #[source]
        source: PolarsError,
    },
}
