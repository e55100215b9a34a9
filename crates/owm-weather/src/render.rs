//! HTML rendering for the weather widget.
//!
//! The widget shell (wrapper plus `Weather` title) is always emitted; only
//! the inner content varies between weather data and a one-line message.

use owm_core::text::escape_html;
use owm_core::{Setting, WidgetSettings};

use crate::format::{format_grouped, format_number, maybe_round, title_case};
use crate::types::{FetchError, WeatherSnapshot};
use crate::units::UnitProfile;

pub const DEFAULT_ICON_BASE_URL: &str = "http://openweathermap.org/img/w";
pub const WIDGET_TITLE: &str = "Weather";

/// Markup the surrounding page wraps every widget in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetChrome {
    pub before_widget: String,
    pub after_widget: String,
    pub before_title: String,
    pub after_title: String,
}

impl Default for WidgetChrome {
    fn default() -> Self {
        Self {
            before_widget: r#"<section class="widget widget_openweathermap">"#.to_string(),
            after_widget: "</section>".to_string(),
            before_title: r#"<h2 class="widget-title">"#.to_string(),
            after_title: "</h2>".to_string(),
        }
    }
}

impl WidgetChrome {
    /// Wrap `inner` in the widget container and title.
    pub fn wrap(&self, inner: &str) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.before_widget,
            self.before_title,
            WIDGET_TITLE,
            self.after_title,
            inner,
            self.after_widget
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRenderer {
    icon_base_url: String,
}

impl Default for WeatherRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE_URL)
    }
}

impl WeatherRenderer {
    pub fn new(icon_base_url: &str) -> Self {
        Self {
            icon_base_url: icon_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn icon_url(&self, icon: &str) -> String {
        format!("{}/{}.png", self.icon_base_url, icon)
    }

    /// Render the weather content block for a successful fetch.
    pub fn render_weather(&self, snapshot: &WeatherSnapshot, settings: &WidgetSettings) -> String {
        let units = UnitProfile::for_units(settings.units());
        let round = settings.is_on(Setting::RoundData);

        let style = if settings.is_on(Setting::RoundedCorners) {
            r#" style="border-radius: 10px;""#
        } else {
            ""
        };

        let mut html = format!("<div class='weather-widget-content'{}>", style);
        html.push_str(&format!(
            "<img class='weather-icon' src='{}' alt='Weather icon' />",
            escape_html(&self.icon_url(&snapshot.icon))
        ));

        if settings.is_on(Setting::ShowCity) {
            html.push_str(&format!(
                "<p class='weather-city'><strong>City:</strong> {}</p>",
                escape_html(&snapshot.city)
            ));
        }

        for (setting, label, value) in data_lines(snapshot, &units, round) {
            if settings.is_on(setting) {
                html.push_str(&format!(
                    "<p class='weather-data'><strong>{}:</strong> {}</p>",
                    label,
                    escape_html(&value)
                ));
            }
        }

        html.push_str("</div>");
        html
    }

    /// Render the whole widget for the outcome of one fetch.
    pub fn render_widget(
        &self,
        outcome: &Result<WeatherSnapshot, FetchError>,
        settings: &WidgetSettings,
        chrome: &WidgetChrome,
    ) -> String {
        let inner = match outcome {
            Ok(snapshot) => self.render_weather(snapshot, settings),
            Err(err) => render_error(err),
        };
        chrome.wrap(&inner)
    }
}

/// The one-line message for an error, or nothing for a malformed response.
pub fn render_error(err: &FetchError) -> String {
    err.widget_message()
        .map(|message| format!("<p>{}</p>", message))
        .unwrap_or_default()
}

fn data_lines(
    snapshot: &WeatherSnapshot,
    units: &UnitProfile,
    round: bool,
) -> [(Setting, &'static str, String); 8] {
    [
        (
            Setting::Temp,
            "Temperature",
            format!(
                "{}{}",
                format_number(maybe_round(snapshot.temperature, round)),
                units.temperature
            ),
        ),
        (
            Setting::FeelsLike,
            "Feels Like",
            format!(
                "{}{}",
                format_number(maybe_round(snapshot.feels_like, round)),
                units.temperature
            ),
        ),
        (Setting::Summary, "Summary", snapshot.summary.clone()),
        (Setting::Desc, "Description", title_case(&snapshot.description)),
        (
            Setting::Humidity,
            "Humidity",
            format!("{}%", format_number(snapshot.humidity)),
        ),
        (
            Setting::WindSpeed,
            "Wind Speed",
            format!(
                "{} {}",
                format_number(maybe_round(snapshot.wind_speed, round)),
                units.wind_speed
            ),
        ),
        (
            Setting::Pressure,
            "Pressure",
            format!("{} {}", format_grouped(snapshot.pressure), units.pressure),
        ),
        (
            Setting::Visibility,
            "Visibility",
            format!("{} {}", format_grouped(snapshot.visibility), units.visibility),
        ),
    ]
}
