//! Turns a raw archive day file into the normalized reading schema.

use crate::archive::error::ArchiveError;
use crate::types::columns::{DATE, HOUR, PM10, PM2_5, TIMESTAMP};
use chrono::NaiveDate;
use polars::prelude::*;
use std::io::Cursor;

/// sensor.community day files are semicolon separated.
pub(crate) const ARCHIVE_SEPARATOR: u8 = b';';

const RAW_TIMESTAMP: &str = "timestamp";
const RAW_PM10: &str = "P1";
const RAW_PM2_5: &str = "P2";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses the CSV body of one archive day, header included.
pub(crate) fn read_day_csv(bytes: Vec<u8>, date: NaiveDate) -> Result<DataFrame, ArchiveError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|opts| opts.with_separator(ARCHIVE_SEPARATOR))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| ArchiveError::CsvRead { date, source })
}

/// Selects `timestamp`, `P1` and `P2` from a raw day table and renames them to
/// `timestamp`, `pm10` and `pm2_5`. Other upstream columns are dropped.
///
/// Rows without a timestamp are discarded.
pub(crate) fn normalize_day(raw: DataFrame, date: NaiveDate) -> Result<DataFrame, ArchiveError> {
    let missing = |column: &str| ArchiveError::MissingColumn {
        date,
        column: column.to_string(),
    };

    let timestamp = match raw.column(RAW_TIMESTAMP).map(|c| c.dtype().clone()) {
        Ok(DataType::String) => col(RAW_TIMESTAMP).str().to_datetime(
            Some(TimeUnit::Milliseconds),
            None,
            StrptimeOptions {
                format: Some(TIMESTAMP_FORMAT.into()),
                strict: true,
                exact: true,
                cache: true,
            },
            lit("raise"),
        ),
        Ok(_) => col(RAW_TIMESTAMP).cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
        Err(_) => return Err(missing(RAW_TIMESTAMP)),
    };
    for column in [RAW_PM10, RAW_PM2_5] {
        raw.column(column).map_err(|_| missing(column))?;
    }

    raw.lazy()
        .select([
            timestamp.alias(TIMESTAMP),
            col(RAW_PM10).cast(DataType::Float64).alias(PM10),
            col(RAW_PM2_5).cast(DataType::Float64).alias(PM2_5),
        ])
        .filter(col(TIMESTAMP).is_not_null())
        .collect()
        .map_err(|source| ArchiveError::Normalize { date, source })
}

/// Adds the `hour` and `date` columns derived from `timestamp`.
pub(crate) fn derive_calendar_columns(frame: LazyFrame) -> LazyFrame {
    frame.with_columns([
        col(TIMESTAMP).dt().hour().cast(DataType::Int32).alias(HOUR),
        col(TIMESTAMP).dt().date().alias(DATE),
    ])
}
