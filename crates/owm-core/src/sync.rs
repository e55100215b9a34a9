//! Mirrors plugin-wide settings into the legacy per-widget-instance record.
//!
//! Older widget placements kept their own copy of each field. Whenever a
//! `weather_widget_option_*` option is added or updated, the bare field is
//! written into every structured instance blob and the whole record is
//! written back.

use serde_json::Value;

use crate::setting::OPTION_PREFIX;
use crate::store::{OptionEvent, OptionObserver, OptionStore};

/// Option holding the per-instance widget blobs.
pub const LEGACY_WIDGET_OPTION: &str = "widget_OpenWeatherMap_Widget";

/// Observer that keeps the legacy widget record in step with the settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsSynchronizer;

impl OptionObserver for SettingsSynchronizer {
    fn on_option_changed(&self, store: &dyn OptionStore, event: &OptionEvent) {
        sync_setting_to_widgets(store, event.name(), event.value());
    }
}

/// Copy `value` into field `option_name` (prefix stripped) of every instance blob.
///
/// Returns the number of instances touched. Options without the widget
/// prefix, or a missing record, are skipped silently.
pub fn sync_setting_to_widgets(store: &dyn OptionStore, option_name: &str, value: &Value) -> usize {
    let Some(field) = option_name.strip_prefix(OPTION_PREFIX) else {
        return 0;
    };

    let Some(mut widgets) = store.get_option(LEGACY_WIDGET_OPTION) else {
        return 0;
    };

    let touched = match &mut widgets {
        Value::Object(entries) => set_field(entries.values_mut(), field, value),
        Value::Array(entries) => set_field(entries.iter_mut(), field, value),
        _ => {
            tracing::debug!("{} is not a collection, skipping sync", LEGACY_WIDGET_OPTION);
            return 0;
        }
    };

    tracing::debug!(
        "Synced {} into {} widget instance(s)",
        field,
        touched
    );
    store.update_option(LEGACY_WIDGET_OPTION, widgets);
    touched
}

fn set_field<'a>(
    entries: impl Iterator<Item = &'a mut Value>,
    field: &str,
    value: &Value,
) -> usize {
    let mut touched = 0;
    for entry in entries {
        // Scalars such as the `_multiwidget` marker are not instances.
        if let Value::Object(blob) = entry {
            blob.insert(field.to_string(), value.clone());
            touched += 1;
        }
    }
    touched
}
