use owm_core::WidgetError;
use serde::Deserialize;
use serde_json::Value;

/// Errors a weather fetch can end in; shared with the render boundary.
pub type FetchError = WidgetError;

/// Location and units for one current-weather request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub api_key: String,
    pub zipcode: String,
    pub country_code: String,
    pub units: owm_core::Units,
}

impl WeatherQuery {
    pub fn from_settings(settings: &owm_core::WidgetSettings) -> Self {
        Self {
            api_key: settings.api_key().to_string(),
            zipcode: settings.zipcode().to_string(),
            country_code: settings.country_code().to_string(),
            units: settings.units(),
        }
    }
}

/// Current conditions parsed from one successful API response.
///
/// Never cached: each render fetches a fresh snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub summary: String,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub visibility: f64,
    pub icon: String,
}

/// `GET /weather` success body (only the fields the widget reads)
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    #[serde(default)]
    name: String,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    wind: WindBlock,
    // Omitted by the API for some stations
    #[serde(default)]
    visibility: f64,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f64,
}

impl CurrentWeatherResponse {
    pub(crate) fn into_snapshot(self) -> Result<WeatherSnapshot, FetchError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            FetchError::MalformedResponse("response has no weather conditions".to_string())
        })?;

        Ok(WeatherSnapshot {
            city: self.name,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            summary: condition.main,
            description: condition.description,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            pressure: self.main.pressure,
            visibility: self.visibility,
            icon: condition.icon,
        })
    }
}

/// Error body, e.g. `{"cod":401,"message":"Invalid API key"}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    cod: Value,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl ApiErrorBody {
    /// The API sends `cod` as a number for some errors and a string for others.
    pub(crate) fn code(&self) -> Option<i64> {
        match &self.cod {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub(crate) fn into_error(self, status: u16) -> FetchError {
        match self.code() {
            Some(401) => FetchError::InvalidApiKey,
            Some(404) => FetchError::InvalidZipcode,
            _ => FetchError::UnknownApiError { status },
        }
    }
}

/// Classify a non-200 response from its body.
pub(crate) fn classify_error_body(status: u16, body: &str) -> FetchError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => {
            if let Some(message) = &parsed.message {
                tracing::debug!("Weather API error message: {}", message);
            }
            parsed.into_error(status)
        }
        Err(_) => FetchError::UnknownApiError { status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_body() -> &'static str {
        r#"{
            "coord": {"lon": -73.99, "lat": 40.73},
            "weather": [{"id": 500, "main": "Rain", "description": "LIGHT RAIN", "icon": "10d"}],
            "main": {"temp": 72.6, "feels_like": 71.2, "pressure": 1013, "humidity": 81},
            "visibility": 10000,
            "wind": {"speed": 4.61, "deg": 240},
            "name": "New York",
            "cod": 200
        }"#
    }

    #[test]
    fn test_parse_success_body() {
        let response: CurrentWeatherResponse = serde_json::from_str(sample_body()).unwrap();
        let snapshot = response.into_snapshot().unwrap();

        assert_eq!(snapshot.city, "New York");
        assert_eq!(snapshot.temperature, 72.6);
        assert_eq!(snapshot.feels_like, 71.2);
        assert_eq!(snapshot.summary, "Rain");
        assert_eq!(snapshot.description, "LIGHT RAIN");
        assert_eq!(snapshot.humidity, 81.0);
        assert_eq!(snapshot.wind_speed, 4.61);
        assert_eq!(snapshot.pressure, 1013.0);
        assert_eq!(snapshot.visibility, 10000.0);
        assert_eq!(snapshot.icon, "10d");
    }

    #[test]
    fn test_missing_visibility_defaults_to_zero() {
        let body = r#"{"name":"X","main":{"temp":1,"feels_like":1},"weather":[{"main":"Clear","description":"clear sky","icon":"01n"}]}"#;
        let response: CurrentWeatherResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_snapshot().unwrap().visibility, 0.0);
    }

    #[test]
    fn test_empty_conditions_are_malformed() {
        let body = r#"{"name":"X","main":{"temp":1,"feels_like":1},"weather":[]}"#;
        let response: CurrentWeatherResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_snapshot(),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_error_code_number_or_string() {
        assert_eq!(classify_error_body(401, r#"{"cod":401}"#), FetchError::InvalidApiKey);
        assert_eq!(
            classify_error_body(404, r#"{"cod":"404","message":"city not found"}"#),
            FetchError::InvalidZipcode
        );
        assert_eq!(
            classify_error_body(429, r#"{"cod":429}"#),
            FetchError::UnknownApiError { status: 429 }
        );
    }

    #[test]
    fn test_code_in_body_wins_over_status() {
        assert_eq!(classify_error_body(500, r#"{"cod":401}"#), FetchError::InvalidApiKey);
    }

    #[test]
    fn test_unparseable_error_body() {
        assert_eq!(
            classify_error_body(502, "<html>Bad Gateway</html>"),
            FetchError::UnknownApiError { status: 502 }
        );
        assert_eq!(
            classify_error_body(500, ""),
            FetchError::UnknownApiError { status: 500 }
        );
    }
}
