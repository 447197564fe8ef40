//! Identifiers for sensor.community devices.

use crate::error::AirQualityError;
use std::fmt;
use std::str::FromStr;

/// Numeric id of a sensor.community device.
///
/// # Examples
///
/// ```
/// use airquality::SensorId;
///
/// let id: SensorId = "57925".parse().unwrap();
/// assert_eq!(id, SensorId(57925));
/// assert_eq!(SensorId::default(), id);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct SensorId(pub u32);

impl SensorId {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// The device this crate was first used with, an SDS011 in Trento.
impl Default for SensorId {
    fn default() -> Self {
        SensorId(57925)
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SensorId {
    type Err = AirQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(id) if id > 0 => Ok(SensorId(id)),
            _ => Err(AirQualityError::InvalidSensorId(s.to_string())),
        }
    }
}

/// Particulate matter sensor models published in the archive.
///
/// All of these report PM10 as `P1` and PM2.5 as `P2`. The variant determines the
/// `_<type>_sensor_` segment of the archive file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SensorType {
    #[default]
    Sds011,
    Pms1003,
    Pms3003,
    Pms5003,
    Pms6003,
    Pms7003,
    Hpm,
    Sps30,
    NextPm,
}

impl SensorType {
    pub(crate) fn archive_name(&self) -> &'static str {
        match self {
            SensorType::Sds011 => "sds011",
            SensorType::Pms1003 => "pms1003",
            SensorType::Pms3003 => "pms3003",
            SensorType::Pms5003 => "pms5003",
            SensorType::Pms6003 => "pms6003",
            SensorType::Pms7003 => "pms7003",
            SensorType::Hpm => "hpm",
            SensorType::Sps30 => "sps30",
            SensorType::NextPm => "nextpm",
        }
    }

    const ALL: [SensorType; 9] = [
        SensorType::Sds011,
        SensorType::Pms1003,
        SensorType::Pms3003,
        SensorType::Pms5003,
        SensorType::Pms6003,
        SensorType::Pms7003,
        SensorType::Hpm,
        SensorType::Sps30,
        SensorType::NextPm,
    ];
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.archive_name())
    }
}

impl FromStr for SensorType {
    type Err = AirQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SensorType::ALL
            .into_iter()
            .find(|t| t.archive_name() == wanted)
            .ok_or_else(|| AirQualityError::UnknownSensorType(s.to_string()))
    }
}
