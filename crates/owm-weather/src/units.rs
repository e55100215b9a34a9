//! Display labels for each measurement system.

use owm_core::Units;

/// Unit labels appended to rendered values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitProfile {
    pub temperature: &'static str,
    pub wind_speed: &'static str,
    pub pressure: &'static str,
    pub visibility: &'static str,
}

impl UnitProfile {
    pub fn for_units(units: Units) -> Self {
        match units {
            Units::Metric => Self {
                temperature: "°C",
                wind_speed: "meter/sec",
                pressure: "hPa",
                visibility: "meters",
            },
            Units::Imperial => Self {
                temperature: "°F",
                wind_speed: "miles/hour",
                pressure: "inHg",
                visibility: "miles",
            },
            Units::Standard => Self {
                temperature: "K",
                wind_speed: "miles/hour",
                pressure: "hPa",
                visibility: "meters",
            },
        }
    }
}

impl From<Units> for UnitProfile {
    fn from(units: Units) -> Self {
        Self::for_units(units)
    }
}
