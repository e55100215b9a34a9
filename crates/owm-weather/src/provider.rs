//! Current-weather client for the OpenWeatherMap REST API.

use std::sync::Arc;

use owm_core::ReqwestErrorExt;
use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use crate::types::{classify_error_body, CurrentWeatherResponse, FetchError, WeatherQuery, WeatherSnapshot};

pub const DEFAULT_API_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
const USER_AGENT: &str = concat!("owm-widget/", env!("CARGO_PKG_VERSION"));

/// Issues one GET per fetch. No retries, and the client's default timeout.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    /// Point the provider at another API root (a proxy, or a mock server in tests).
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ReqwestErrorExt::into_widget_error)?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the request URL: `{base}/weather?zip={zip},{country}&units={units}&appid={key}`.
    pub fn request_url(&self, query: &WeatherQuery) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("{}/weather", self.base_url))
            .map_err(|e| FetchError::Transport(format!("invalid API URL: {}", e)))?;

        // The API splits `zip` on a literal comma, so only the parts are encoded.
        url.set_query(Some(&format!(
            "zip={},{}&units={}&appid={}",
            encode(&query.zipcode),
            encode(&query.country_code),
            query.units.as_str(),
            encode(&query.api_key)
        )));

        Ok(url)
    }

    /// Fetch current conditions.
    ///
    /// Empty API key or ZIP code fail before any request is made.
    #[instrument(skip(self, query), fields(zip = %query.zipcode, country = %query.country_code), level = "info")]
    pub async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError> {
        if query.api_key.is_empty() {
            return Err(FetchError::MissingApiKey);
        }
        if query.zipcode.is_empty() {
            return Err(FetchError::MissingZipcode);
        }

        let url = self.request_url(query)?;
        tracing::debug!(
            "GET {}/weather units={}",
            self.base_url,
            query.units.as_str()
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_widget_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            let err = classify_error_body(status.as_u16(), &body);
            tracing::warn!("Weather API returned {}: {}", status, err);
            return Err(err);
        }

        if body.trim().is_empty() {
            return Err(FetchError::MalformedResponse("empty response body".to_string()));
        }

        let parsed: CurrentWeatherResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        let snapshot = parsed.into_snapshot()?;
        tracing::info!("Fetched weather for {}", snapshot.city);
        Ok(snapshot)
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use owm_core::Units;

    fn query(api_key: &str, zipcode: &str) -> WeatherQuery {
        WeatherQuery {
            api_key: api_key.to_string(),
            zipcode: zipcode.to_string(),
            country_code: "us".to_string(),
            units: Units::Imperial,
        }
    }

    #[test]
    fn test_request_url() {
        let provider = WeatherProvider::new().unwrap();
        let url = provider.request_url(&query("KEY", "10001")).unwrap();

        assert_eq!(url.host_str(), Some("api.openweathermap.org"));
        assert_eq!(url.path(), "/data/2.5/weather");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("zip".to_string(), "10001,us".to_string()),
                ("units".to_string(), "imperial".to_string()),
                ("appid".to_string(), "KEY".to_string()),
            ]
        );
    }

    #[test]
    fn test_zip_separator_is_a_literal_comma() {
        let provider = WeatherProvider::new().unwrap();
        let url = provider.request_url(&query("KEY", "10001")).unwrap();
        assert_eq!(url.query(), Some("zip=10001,us&units=imperial&appid=KEY"));
        assert!(!url.as_str().contains("%2C"));
    }

    #[test]
    fn test_zip_parts_are_still_encoded() {
        let provider = WeatherProvider::new().unwrap();
        let url = provider.request_url(&query("a&b", "SW1A 1AA")).unwrap();
        assert_eq!(url.query(), Some("zip=SW1A+1AA,us&units=imperial&appid=a%26b"));
    }

    #[test]
    fn test_trailing_slash_on_base_url() {
        let provider = WeatherProvider::with_base_url("http://localhost:9999/api/").unwrap();
        let url = provider.request_url(&query("k", "1")).unwrap();
        assert_eq!(url.path(), "/api/weather");
    }

    #[tokio::test]
    async fn test_missing_api_key_checked_first() {
        let provider = WeatherProvider::with_base_url("http://127.0.0.1:9").unwrap();
        assert_eq!(provider.fetch(&query("", "")).await, Err(FetchError::MissingApiKey));
        assert_eq!(provider.fetch(&query("", "10001")).await, Err(FetchError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_missing_zipcode() {
        let provider = WeatherProvider::with_base_url("http://127.0.0.1:9").unwrap();
        assert_eq!(provider.fetch(&query("KEY", "")).await, Err(FetchError::MissingZipcode));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) is closed on test machines; the connect fails fast.
        let provider = WeatherProvider::with_base_url("http://127.0.0.1:9").unwrap();
        let result = provider.fetch(&query("KEY", "10001")).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
