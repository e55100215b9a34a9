//! Admin settings page.
//!
//! Only renders the form; saving the posted values is the host's job.

use owm_core::text::escape_html;
use owm_core::{get_setting, get_setting_or_default, OptionStore, WidgetSettings, CHECKED};

use crate::fields::{FieldDescriptor, FieldKind, OPTION_GROUP, SECTIONS};

pub const PAGE_TITLE: &str = "OpenWeatherMap Widget Settings";
pub const MISSING_CONFIG_WARNING: &str =
    "API Key and a ZIP code are required for the widget to function correctly.";

/// Render the settings form, with a warning when the widget cannot fetch yet.
pub fn render_settings_page(store: &dyn OptionStore, styles: &[String]) -> String {
    let mut html = String::new();
    html.push_str(&format!("<div><h2>{}</h2>", PAGE_TITLE));
    html.push_str(r#"<form method="post" action="options.php">"#);
    html.push_str(&format!(
        r#"<input type="hidden" name="option_page" value="{}" />"#,
        OPTION_GROUP
    ));

    for section in &SECTIONS {
        html.push_str(&format!("<h3>{}</h3>", section.title));
        for field in section.fields {
            // Absent checkboxes are unchecked; other kinds show their default.
            let value = match field.kind {
                FieldKind::Checkbox => get_setting(store, field.setting).unwrap_or_default(),
                FieldKind::Text | FieldKind::Select(_) => {
                    get_setting_or_default(store, field.setting)
                }
            };
            html.push_str(&render_field(field, &value, styles));
        }
    }

    if needs_configuration(store) {
        html.push_str(&format!(
            r#"<p style="color:red;">{}</p>"#,
            MISSING_CONFIG_WARNING
        ));
    }

    html.push_str(
        r#"<p class="submit"><input type="submit" name="submit" id="submit" class="button button-primary" value="Save Changes" /></p>"#,
    );
    html.push_str("</form></div>");
    html
}

/// True when the API key or ZIP code is empty.
pub fn needs_configuration(store: &dyn OptionStore) -> bool {
    !WidgetSettings::load(store).is_configured()
}

fn render_field(field: &FieldDescriptor, value: &str, styles: &[String]) -> String {
    let id = field.setting.option_name();
    let mut html = format!(r#"<p><label for="{}">{}</label>"#, id, field.label);

    match field.kind {
        FieldKind::Text => {
            html.push_str(&format!(
                r#"<input type="text" id="{id}" name="{id}" value="{}" />"#,
                escape_html(value)
            ));
        }
        FieldKind::Checkbox => {
            let checked = if value == CHECKED {
                r#" checked="checked""#
            } else {
                ""
            };
            html.push_str(&format!(
                r#"<input type="checkbox" id="{id}" name="{id}"{checked} />"#
            ));
        }
        FieldKind::Select(_) => {
            html.push_str(&format!(r#"<select id="{id}" name="{id}">"#));
            for (option_value, label) in field.choices(styles) {
                let selected = if option_value == value {
                    r#" selected="selected""#
                } else {
                    ""
                };
                html.push_str(&format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    escape_html(&option_value),
                    selected,
                    escape_html(&label)
                ));
            }
            html.push_str("</select>");
        }
    }

    if let Some(note) = field.note {
        html.push_str(&format!("<small>{}</small>", note));
    }

    html.push_str("</p>");
    html
}
