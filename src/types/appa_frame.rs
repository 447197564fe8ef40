//! Contains the `AppaFrame` structure wrapping measurements from APPA Trento stations.

use crate::error::AirQualityError;
use polars::prelude::{col, lit, DataFrame, LazyFrame};
use std::fmt;

/// Upstream column names, kept as published.
pub mod appa_columns {
    pub const STATION: &str = "Stazione";
    pub const POLLUTANT: &str = "Inquinante";
    pub const DATE: &str = "Data";
    pub const HOUR: &str = "Ora";
    pub const VALUE: &str = "Valore";
    pub const UNIT: &str = "Unità di misura";
}

/// A wrapper around a Polars `LazyFrame` with APPA station measurements.
///
/// One row per station, pollutant and hour. Instances are obtained via
/// [`crate::AirQuality::appa`] or [`crate::AppaClient::fetch`].
#[derive(Clone)]
pub struct AppaFrame {
    pub frame: LazyFrame,
}

impl fmt::Debug for AppaFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppaFrame").finish_non_exhaustive()
    }
}

impl AppaFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    pub fn collect(&self) -> Result<DataFrame, AirQualityError> {
        Ok(self.frame.clone().collect()?)
    }

    /// Distinct pollutant names, in order of first appearance.
    pub fn pollutants(&self) -> Result<Vec<String>, AirQualityError> {
        self.distinct(appa_columns::POLLUTANT)
    }

    /// Distinct units of measure, in order of first appearance.
    pub fn units(&self) -> Result<Vec<String>, AirQualityError> {
        self.distinct(appa_columns::UNIT)
    }

    /// Rows of a single pollutant, e.g. `"PM10"`.
    pub fn for_pollutant(&self, pollutant: &str) -> AppaFrame {
        AppaFrame::new(
            self.frame
                .clone()
                .filter(col(appa_columns::POLLUTANT).eq(lit(pollutant))),
        )
    }

    fn distinct(&self, column: &str) -> Result<Vec<String>, AirQualityError> {
        let df = self.frame.clone().select([col(column)]).collect()?;
        let mut seen: Vec<String> = Vec::new();
        for value in df.column(column)?.str()?.into_iter().flatten() {
            if !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
        Ok(seen)
    }
}
