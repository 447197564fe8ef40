use crate::error::AirQualityError;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value usable as one bound of a [`DateRange`].
///
/// `None` and the empty string mean the bound is open.
pub trait AnyDateBound {
    fn into_bound(self) -> Result<Option<NaiveDate>, AirQualityError>;
}

impl AnyDateBound for NaiveDate {
    fn into_bound(self) -> Result<Option<NaiveDate>, AirQualityError> {
        Ok(Some(self))
    }
}

impl AnyDateBound for Option<NaiveDate> {
    fn into_bound(self) -> Result<Option<NaiveDate>, AirQualityError> {
        Ok(self)
    }
}

impl AnyDateBound for &str {
    fn into_bound(self) -> Result<Option<NaiveDate>, AirQualityError> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Some)
            .map_err(|e| AirQualityError::InvalidDate(self.to_string(), e))
    }
}

impl AnyDateBound for String {
    fn into_bound(self) -> Result<Option<NaiveDate>, AirQualityError> {
        self.as_str().into_bound()
    }
}

impl AnyDateBound for &String {
    fn into_bound(self) -> Result<Option<NaiveDate>, AirQualityError> {
        self.as_str().into_bound()
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, AirQualityError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| AirQualityError::InvalidDate(value.to_string(), e))
}

/// Inclusive calendar date range, either end may be open.
///
/// # Examples
///
/// ```
/// use airquality::DateRange;
/// use chrono::NaiveDate;
///
/// let until = DateRange::new("", "2022-06-18").unwrap();
/// assert_eq!(until.start, None);
/// assert_eq!(until.end, NaiveDate::from_ymd_opt(2022, 6, 18));
/// assert!(DateRange::new("", "").unwrap().is_unbounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: impl AnyDateBound, end: impl AnyDateBound) -> Result<Self, AirQualityError> {
        Ok(Self {
            start: start.into_bound()?,
            end: end.into_bound()?,
        })
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::between(date, date)
    }

    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}
