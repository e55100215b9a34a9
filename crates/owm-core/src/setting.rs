//! The fixed catalogue of widget settings.
//!
//! Every setting is stored in the option store under
//! `weather_widget_option_<name>` with a string value. Checkbox-style
//! settings are enabled only when the stored value is exactly `"on"`.

use serde::{Deserialize, Serialize};

/// Prefix shared by every option this widget owns.
pub const OPTION_PREFIX: &str = "weather_widget_option_";

/// The literal value that marks a checkbox setting as enabled.
pub const CHECKED: &str = "on";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    ApiKey,
    CountryCode,
    Zipcode,
    Units,
    RoundData,
    ShowCity,
    Temp,
    FeelsLike,
    Summary,
    Desc,
    Humidity,
    WindSpeed,
    Pressure,
    Visibility,
    Style,
    RoundedCorners,
}

impl Setting {
    /// All settings in registration order.
    pub const ALL: [Setting; 16] = [
        Setting::ApiKey,
        Setting::CountryCode,
        Setting::Zipcode,
        Setting::Units,
        Setting::RoundData,
        Setting::ShowCity,
        Setting::Temp,
        Setting::FeelsLike,
        Setting::Summary,
        Setting::Desc,
        Setting::Humidity,
        Setting::WindSpeed,
        Setting::Pressure,
        Setting::Visibility,
        Setting::Style,
        Setting::RoundedCorners,
    ];

    /// Bare field name, also used as the key inside legacy widget blobs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::CountryCode => "country_code",
            Self::Zipcode => "zipcode",
            Self::Units => "units",
            Self::RoundData => "round_data",
            Self::ShowCity => "show_city",
            Self::Temp => "temp",
            Self::FeelsLike => "feels_like",
            Self::Summary => "summary",
            Self::Desc => "desc",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind_speed",
            Self::Pressure => "pressure",
            Self::Visibility => "visibility",
            Self::Style => "style",
            Self::RoundedCorners => "rounded_corners",
        }
    }

    /// Full option-store key.
    pub fn option_name(&self) -> String {
        format!("{}{}", OPTION_PREFIX, self.name())
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            Self::CountryCode => "us",
            Self::Units => "imperial",
            Self::RoundData | Self::ShowCity | Self::Temp | Self::FeelsLike | Self::Summary => {
                CHECKED
            }
            Self::Style => "default",
            Self::RoundedCorners => "off",
            Self::ApiKey
            | Self::Zipcode
            | Self::Desc
            | Self::Humidity
            | Self::WindSpeed
            | Self::Pressure
            | Self::Visibility => "",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Resolve a full option name (`weather_widget_option_zipcode`) to its setting.
    pub fn from_option_name(option_name: &str) -> Option<Self> {
        option_name
            .strip_prefix(OPTION_PREFIX)
            .and_then(Self::from_name)
    }
}

impl std::fmt::Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Temperature/measurement system requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    Metric,
    #[default]
    Imperial,
}

impl Units {
    pub const ALL: [Units; 3] = [Units::Standard, Units::Metric, Units::Imperial];

    /// Parse a stored `units` value. Anything unrecognised is treated as standard.
    pub fn parse(value: &str) -> Self {
        match value {
            "metric" => Self::Metric,
            "imperial" => Self::Imperial,
            _ => Self::Standard,
        }
    }

    /// Query-string value understood by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Metric => "Metric",
            Self::Imperial => "Imperial",
        }
    }
}
