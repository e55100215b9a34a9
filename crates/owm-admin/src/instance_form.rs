//! Per-instance widget form (country code and ZIP code).
//!
//! Saving an instance writes both values into the plugin-wide settings, so
//! the most recently saved instance sets the location for every widget.

use owm_core::text::{escape_html, sanitize_text_field, strip_tags};
use owm_core::{set_setting, OptionStore, Setting};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const WIDGET_ID_BASE: &str = "OpenWeatherMap_Widget";

/// The fields an instance form edits. Other keys in a legacy blob are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInstance {
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub zipcode: String,
}

impl WidgetInstance {
    /// Read an instance from a stored blob; anything unreadable is an empty instance.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "country_code": self.country_code,
            "zipcode": self.zipcode,
        })
    }
}

fn field_id(number: u32, field: &str) -> String {
    format!("widget-{}-{}-{}", WIDGET_ID_BASE, number, field)
}

fn field_name(number: u32, field: &str) -> String {
    format!("widget-{}[{}][{}]", WIDGET_ID_BASE, number, field)
}

/// Render the form for instance `number`, pre-filled from its stored values.
pub fn render_instance_form(instance: &WidgetInstance, number: u32) -> String {
    let mut html = String::new();
    html.push_str(&text_input(
        number,
        Setting::CountryCode,
        "Country Code:",
        &instance.country_code,
        "countrycode-error",
        "Invalid country code. Please enter a 2-letter country code.",
    ));
    html.push_str(&text_input(
        number,
        Setting::Zipcode,
        "ZIP Code:",
        &instance.zipcode,
        "zipcode-error",
        "Invalid ZIP code. Please check your input.",
    ));
    html
}

fn text_input(
    number: u32,
    setting: Setting,
    label: &str,
    value: &str,
    error_id: &str,
    error_text: &str,
) -> String {
    let id = escape_html(&field_id(number, setting.name()));
    let name = escape_html(&field_name(number, setting.name()));
    format!(
        concat!(
            "<p>",
            r#"<label for="{id}">{label}</label>"#,
            r#"<input class="widefat" id="{id}" name="{name}" type="text" value="{value}">"#,
            r#"<small id="{error_id}" style="color:red; display: none;">{error_text}</small>"#,
            "</p>"
        ),
        id = id,
        label = label,
        name = name,
        value = escape_html(&sanitize_text_field(value)),
        error_id = error_id,
        error_text = error_text,
    )
}

/// Save a submitted instance form.
///
/// Tags are stripped from both values, which are then written to the
/// global country-code and ZIP settings. Returns the instance to store.
pub fn update_instance(store: &dyn OptionStore, submitted: &WidgetInstance) -> WidgetInstance {
    let instance = WidgetInstance {
        country_code: strip_tags(&submitted.country_code),
        zipcode: strip_tags(&submitted.zipcode),
    };

    set_setting(store, Setting::CountryCode, &instance.country_code);
    set_setting(store, Setting::Zipcode, &instance.zipcode);

    tracing::info!(
        "Widget instance saved: zip={} country={}",
        instance.zipcode,
        instance.country_code
    );
    instance
}
