use chrono::{NaiveDate, NaiveDateTime};

/// One row of a [`crate::ReadingFrame`], collected into a plain struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    /// PM10 in µg/m³ (`P1` upstream).
    pub pm10: Option<f64>,
    /// PM2.5 in µg/m³ (`P2` upstream).
    pub pm2_5: Option<f64>,
    pub hour: u32,
    pub date: NaiveDate,
}
