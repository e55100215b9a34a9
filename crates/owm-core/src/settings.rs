//! Typed access to the widget settings held in the option store.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::StoreError;
use crate::setting::{Setting, Units, CHECKED};
use crate::store::OptionStore;
use crate::sync::{sync_setting_to_widgets, SettingsSynchronizer};
use crate::text::sanitize_text_field;

/// Create every setting with its default (if absent), attach the
/// synchronizer and mirror the current values into the legacy record.
pub fn register_settings(store: &dyn OptionStore) {
    let mut created = 0;
    for setting in Setting::ALL {
        let default = sanitize_text_field(setting.default_value());
        if store.add_option(&setting.option_name(), Value::String(default)) {
            created += 1;
        }
    }

    store.subscribe(Arc::new(SettingsSynchronizer));

    for setting in Setting::ALL {
        let option_name = setting.option_name();
        let value = store
            .get_option(&option_name)
            .unwrap_or_else(|| Value::String(setting.default_value().to_string()));
        sync_setting_to_widgets(store, &option_name, &value);
    }

    tracing::info!(
        "Registered {} widget settings ({} created)",
        Setting::ALL.len(),
        created
    );
}

/// Read one setting as a string. Absent options yield `None`.
pub fn get_setting(store: &dyn OptionStore, setting: Setting) -> Option<String> {
    store.get_string(&setting.option_name())
}

/// Read one setting, falling back to its declared default.
pub fn get_setting_or_default(store: &dyn OptionStore, setting: Setting) -> String {
    get_setting(store, setting).unwrap_or_else(|| setting.default_value().to_string())
}

pub fn set_setting(store: &dyn OptionStore, setting: Setting, value: &str) -> bool {
    store.update_option(&setting.option_name(), Value::String(value.to_string()))
}

/// Set a setting by its bare name, as typed on a command line.
pub fn set_setting_by_name(
    store: &dyn OptionStore,
    name: &str,
    value: &str,
) -> Result<bool, StoreError> {
    let setting =
        Setting::from_name(name).ok_or_else(|| StoreError::UnknownSetting(name.to_string()))?;
    Ok(set_setting(store, setting, value))
}

/// Point-in-time copy of every setting.
///
/// Missing options are read as empty strings, so a checkbox that was never
/// stored counts as unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetSettings {
    values: BTreeMap<Setting, String>,
}

impl WidgetSettings {
    pub fn load(store: &dyn OptionStore) -> Self {
        let values = Setting::ALL
            .into_iter()
            .filter_map(|s| get_setting(store, s).map(|v| (s, v)))
            .collect();
        Self { values }
    }

    /// Settings as freshly registered.
    pub fn defaults() -> Self {
        Self::from_pairs(Setting::ALL.map(|s| (s, s.default_value())))
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (Setting, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(s, v)| (s, v.to_string()))
                .collect(),
        }
    }

    pub fn with(mut self, setting: Setting, value: &str) -> Self {
        self.values.insert(setting, value.to_string());
        self
    }

    pub fn get(&self, setting: Setting) -> &str {
        self.values.get(&setting).map(String::as_str).unwrap_or("")
    }

    /// Only the literal `"on"` counts as enabled.
    pub fn is_on(&self, setting: Setting) -> bool {
        self.get(setting) == CHECKED
    }

    pub fn api_key(&self) -> &str {
        self.get(Setting::ApiKey)
    }

    pub fn zipcode(&self) -> &str {
        self.get(Setting::Zipcode)
    }

    pub fn country_code(&self) -> &str {
        self.get(Setting::CountryCode)
    }

    pub fn units(&self) -> Units {
        Units::parse(self.get(Setting::Units))
    }

    pub fn style(&self) -> &str {
        match self.get(Setting::Style) {
            "" => Setting::Style.default_value(),
            style => style,
        }
    }

    /// Both the API key and a ZIP code are needed before a fetch is attempted.
    pub fn is_configured(&self) -> bool {
        !self.api_key().is_empty() && !self.zipcode().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOptionStore;
    use crate::sync::LEGACY_WIDGET_OPTION;
    use serde_json::json;

    #[test]
    fn test_register_creates_defaults() {
        let store = MemoryOptionStore::new();
        register_settings(&store);

        for setting in Setting::ALL {
            assert_eq!(
                get_setting(&store, setting).as_deref(),
                Some(setting.default_value()),
                "{} should start at its default",
                setting
            );
        }
    }

    #[test]
    fn test_register_keeps_existing_values() {
        let store = MemoryOptionStore::new();
        store.add_option("weather_widget_option_zipcode", json!("10001"));
        register_settings(&store);
        assert_eq!(get_setting(&store, Setting::Zipcode).as_deref(), Some("10001"));
    }

    #[test]
    fn test_register_mirrors_into_legacy_record() {
        let store = MemoryOptionStore::new();
        store.add_option(LEGACY_WIDGET_OPTION, json!({"3": {"title": "Weather"}}));
        store.add_option("weather_widget_option_units", json!("metric"));

        register_settings(&store);

        let widgets = store.get_option(LEGACY_WIDGET_OPTION).unwrap();
        assert_eq!(widgets["3"]["units"], "metric");
        assert_eq!(widgets["3"]["country_code"], "us");
        assert_eq!(widgets["3"]["title"], "Weather");

        set_setting(&store, Setting::ApiKey, "abc");
        let widgets = store.get_option(LEGACY_WIDGET_OPTION).unwrap();
        assert_eq!(widgets["3"]["api_key"], "abc");
    }

    #[test]
    fn test_set_by_unknown_name() {
        let store = MemoryOptionStore::new();
        assert!(matches!(
            set_setting_by_name(&store, "colour", "red"),
            Err(StoreError::UnknownSetting(_))
        ));
        assert!(set_setting_by_name(&store, "zipcode", "10001").unwrap());
    }

    #[test]
    fn test_only_literal_on_is_checked() {
        for value in ["off", "", "ON", "On", "1", "true", "yes", " on"] {
            let settings = WidgetSettings::default().with(Setting::Humidity, value);
            assert!(!settings.is_on(Setting::Humidity), "{:?} must not count as on", value);
        }
        let settings = WidgetSettings::default().with(Setting::Humidity, "on");
        assert!(settings.is_on(Setting::Humidity));
        assert!(!WidgetSettings::default().is_on(Setting::Humidity));
    }

    #[test]
    fn test_load_reads_store() {
        let store = MemoryOptionStore::new();
        register_settings(&store);
        set_setting(&store, Setting::Units, "metric");

        let settings = WidgetSettings::load(&store);
        assert_eq!(settings.units(), Units::Metric);
        assert!(settings.is_on(Setting::Temp));
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_style_falls_back_to_default() {
        assert_eq!(WidgetSettings::default().style(), "default");
        assert_eq!(WidgetSettings::default().with(Setting::Style, "dark").style(), "dark");
    }
}
