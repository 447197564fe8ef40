//! Column names of the frames produced by this crate.

/// Reading time, `Datetime(ms)`, as published by the sensor.
pub const TIMESTAMP: &str = "timestamp";
/// PM10 in µg/m³, `Float64`.
pub const PM10: &str = "pm10";
/// PM2.5 in µg/m³, `Float64`.
pub const PM2_5: &str = "pm2_5";
/// Hour of day derived from [`TIMESTAMP`], `Int32` in `0..=23`.
pub const HOUR: &str = "hour";
/// Calendar date derived from [`TIMESTAMP`], `Date`.
pub const DATE: &str = "date";
/// Trailing moving average of [`PM10`].
pub const PM10_MA: &str = "pm10_ma";
/// Trailing moving average of [`PM2_5`].
pub const PM2_5_MA: &str = "pm2_5_ma";
