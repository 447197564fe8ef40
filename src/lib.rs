//! Fetch and explore particulate matter (PM10 / PM2.5) readings.
//!
//! Readings of a [sensor.community](https://sensor.community) device are aggregated day by
//! day from the public archive into a [`ReadingFrame`], which can then be filtered by date
//! and hour of day and smoothed with a trailing moving average. Hourly bulletins of the
//! APPA Trento monitoring stations are available as an [`AppaFrame`].

mod appa;
mod archive;
mod client;
mod error;
mod smoothing;
mod types;

#[cfg(test)]
mod test_support;

pub use client::AirQuality;
pub use error::AirQualityError;
pub use smoothing::{pearson, smooth};

pub use archive::aggregator::RangeAggregator;
pub use archive::clock::{Clock, FixedClock, SystemClock};
pub use archive::error::ArchiveError;
pub use archive::fetcher::{DailyFetch, DailyFetcher, HttpDailyFetcher};
pub use archive::locator::{ArchiveLocator, DEFAULT_ARCHIVE_URL};

pub use appa::client::{AppaClient, DEFAULT_APPA_URL};
pub use appa::error::AppaError;
pub use appa::station::{AppaDate, AppaStation};

pub use types::appa_frame::{appa_columns, AppaFrame};
pub use types::columns;
pub use types::date_range::{AnyDateBound, DateRange};
pub use types::hour_range::HourRange;
pub use types::reading::Reading;
pub use types::reading_frame::ReadingFrame;
pub use types::request::SensorRequest;
pub use types::sensor::{SensorId, SensorType};
