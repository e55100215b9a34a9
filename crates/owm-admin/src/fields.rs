//! Ordered field table for the settings page.

use owm_core::{Setting, Units};

/// Option group the settings form posts under.
pub const OPTION_GROUP: &str = "weather_widget_options_group";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
    Select(SelectSource),
}

/// Where a select field gets its choices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectSource {
    Units,
    /// Stylesheet names found in the assets directory at render time
    Styles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub setting: Setting,
    pub label: &'static str,
    pub kind: FieldKind,
    pub note: Option<&'static str>,
}

impl FieldDescriptor {
    const fn new(setting: Setting, label: &'static str, kind: FieldKind) -> Self {
        Self {
            setting,
            label,
            kind,
            note: None,
        }
    }

    const fn with_note(self, note: &'static str) -> Self {
        Self {
            note: Some(note),
            ..self
        }
    }

    /// `(value, label)` pairs for a select field.
    pub fn choices(&self, styles: &[String]) -> Vec<(String, String)> {
        match self.kind {
            FieldKind::Select(SelectSource::Units) => Units::ALL
                .iter()
                .map(|u| (u.as_str().to_string(), u.label().to_string()))
                .collect(),
            FieldKind::Select(SelectSource::Styles) => {
                styles.iter().map(|s| (s.clone(), s.clone())).collect()
            }
            FieldKind::Text | FieldKind::Checkbox => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub title: &'static str,
    pub fields: &'static [FieldDescriptor],
}

const GENERAL: &[FieldDescriptor] = &[
    FieldDescriptor::new(Setting::ApiKey, "API Key", FieldKind::Text).with_note(
        "You can register for a free API key on <a href=\"http://openweathermap.org/appid\" target=\"_blank\">OpenWeatherMap's website</a>.",
    ),
    FieldDescriptor::new(Setting::CountryCode, "Country Code", FieldKind::Text).with_note(
        "The <a href=\"https://en.wikipedia.org/wiki/List_of_ISO_3166_country_codes\">2-letter country code</a>.",
    ),
    FieldDescriptor::new(Setting::Zipcode, "ZIP Code", FieldKind::Text),
    FieldDescriptor::new(
        Setting::Units,
        "Units of Measurement",
        FieldKind::Select(SelectSource::Units),
    ),
    FieldDescriptor::new(Setting::RoundData, "Round Weather Data", FieldKind::Checkbox),
];

const WEATHER: &[FieldDescriptor] = &[
    FieldDescriptor::new(Setting::ShowCity, "Show City", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::Temp, "Temperature", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::FeelsLike, "Feels Like", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::Summary, "Summary", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::Desc, "Description", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::Humidity, "Humidity", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::WindSpeed, "Wind Speed", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::Pressure, "Pressure", FieldKind::Checkbox),
    FieldDescriptor::new(Setting::Visibility, "Visibility", FieldKind::Checkbox),
];

const STYLE: &[FieldDescriptor] = &[
    FieldDescriptor::new(Setting::Style, "Style", FieldKind::Select(SelectSource::Styles)),
    FieldDescriptor::new(Setting::RoundedCorners, "Rounded Corners", FieldKind::Checkbox),
];

pub const SECTIONS: [Section; 3] = [
    Section {
        title: "General Settings",
        fields: GENERAL,
    },
    Section {
        title: "Weather Options",
        fields: WEATHER,
    },
    Section {
        title: "Style Settings",
        fields: STYLE,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_setting_has_one_field() {
        let mut seen: Vec<Setting> = SECTIONS
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.setting))
            .collect();
        seen.sort();
        let mut all = Setting::ALL.to_vec();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_unit_choices() {
        let units = GENERAL[3];
        assert_eq!(
            units.choices(&[]),
            vec![
                ("standard".to_string(), "Standard".to_string()),
                ("metric".to_string(), "Metric".to_string()),
                ("imperial".to_string(), "Imperial".to_string()),
            ]
        );
    }

    #[test]
    fn test_style_choices_come_from_assets() {
        let style = STYLE[0];
        let styles = vec!["dark".to_string(), "default".to_string()];
        assert_eq!(
            style.choices(&styles),
            vec![
                ("dark".to_string(), "dark".to_string()),
                ("default".to_string(), "default".to_string()),
            ]
        );
    }
}
