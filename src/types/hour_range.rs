use crate::error::AirQualityError;

const LAST_HOUR: u32 = 23;

/// Inclusive hour-of-day window, both ends in `0..=23`.
///
/// A window whose start is after its end is valid and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourRange {
    start: u32,
    end: u32,
}

impl HourRange {
    /// # Errors
    ///
    /// Returns [`AirQualityError::InvalidHour`] if either bound is above 23.
    pub fn new(start: u32, end: u32) -> Result<Self, AirQualityError> {
        for hour in [start, end] {
            if hour > LAST_HOUR {
                return Err(AirQualityError::InvalidHour(hour));
            }
        }
        Ok(Self { start, end })
    }

    pub fn all() -> Self {
        Self {
            start: 0,
            end: LAST_HOUR,
        }
    }

    pub fn hour(hour: u32) -> Result<Self, AirQualityError> {
        Self::new(hour, hour)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn is_all(&self) -> bool {
        self.start == 0 && self.end == LAST_HOUR
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour <= self.end
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self::all()
    }
}
