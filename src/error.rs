use crate::appa::error::AppaError;
use crate::archive::error::ArchiveError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Appa(#[from] AppaError),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String, #[source] chrono::ParseError),

    #[error("Invalid hour {0}, expected a value in 0..=23")]
    InvalidHour(u32),

    #[error("Invalid sensor id '{0}'")]
    InvalidSensorId(String),

    #[error("Unknown sensor type '{0}'")]
    UnknownSensorType(String),

    #[error("Unknown APPA station '{0}'")]
    UnknownStation(String),

    #[error("At least one APPA station must be selected")]
    NoStations,

    #[error("Moving average window must be a positive integer")]
    InvalidWindow,

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
