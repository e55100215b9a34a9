//! Key-value option store with change notifications.
//!
//! Stands in for the host platform's option table: values are JSON so that
//! both plain string settings and structured records (the legacy widget
//! blobs) live side by side. Observers are told about every add and every
//! effective update, after the store's lock has been released, so they are
//! free to write back into the store.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::StoreError;

/// A change that was applied to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionEvent {
    Added {
        name: String,
        value: Value,
    },
    Updated {
        name: String,
        old_value: Value,
        value: Value,
    },
}

impl OptionEvent {
    pub fn name(&self) -> &str {
        match self {
            Self::Added { name, .. } | Self::Updated { name, .. } => name,
        }
    }

    /// The value the option holds after the change.
    pub fn value(&self) -> &Value {
        match self {
            Self::Added { value, .. } | Self::Updated { value, .. } => value,
        }
    }
}

/// Subscriber to option changes.
pub trait OptionObserver: Send + Sync {
    fn on_option_changed(&self, store: &dyn OptionStore, event: &OptionEvent);
}

/// Injected option storage.
pub trait OptionStore: Send + Sync {
    fn get_option(&self, name: &str) -> Option<Value>;

    /// Create an option. Returns `false` (and changes nothing) if it already exists.
    fn add_option(&self, name: &str, value: Value) -> bool;

    /// Set an option, creating it if needed. Returns `false` when the stored
    /// value is already equal to `value`.
    fn update_option(&self, name: &str, value: Value) -> bool;

    fn subscribe(&self, observer: Arc<dyn OptionObserver>);

    /// String view of an option; non-string scalars are stringified.
    fn get_string(&self, name: &str) -> Option<String> {
        self.get_option(name).and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Bool(b) => Some(if b { "1".to_string() } else { String::new() }),
            Value::Number(n) => Some(n.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) | Value::Object(_) => None,
        })
    }
}

/// In-process option store, optionally persisted as a JSON document.
#[derive(Default)]
pub struct MemoryOptionStore {
    options: RwLock<BTreeMap<String, Value>>,
    observers: Mutex<Vec<Arc<dyn OptionObserver>>>,
}

impl std::fmt::Debug for MemoryOptionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryOptionStore")
            .field("options", &self.options.read().len())
            .field("observers", &self.observers.lock().len())
            .finish()
    }
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON object on disk. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!("Option store {} not found, starting empty", path.display());
            return Ok(Self::new());
        }

        let contents = std::fs::read_to_string(path)?;
        let options: BTreeMap<String, Value> = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded {} options from {}", options.len(), path.display());
        Ok(Self {
            options: RwLock::new(options),
            observers: Mutex::new(Vec::new()),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&*self.options.read())
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.options.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.read().is_empty()
    }

    fn notify(&self, event: OptionEvent) {
        // Snapshot so observers can subscribe or write without deadlocking.
        let observers: Vec<_> = self.observers.lock().clone();
        for observer in observers {
            observer.on_option_changed(self, &event);
        }
    }
}

impl OptionStore for MemoryOptionStore {
    fn get_option(&self, name: &str) -> Option<Value> {
        self.options.read().get(name).cloned()
    }

    fn add_option(&self, name: &str, value: Value) -> bool {
        {
            let mut options = self.options.write();
            if options.contains_key(name) {
                return false;
            }
            options.insert(name.to_string(), value.clone());
        }

        self.notify(OptionEvent::Added {
            name: name.to_string(),
            value,
        });
        true
    }

    fn update_option(&self, name: &str, value: Value) -> bool {
        let old_value = {
            let mut options = self.options.write();
            if options.get(name) == Some(&value) {
                return false;
            }
            options.insert(name.to_string(), value.clone())
        };

        let event = match old_value {
            Some(old_value) => OptionEvent::Updated {
                name: name.to_string(),
                old_value,
                value,
            },
            None => OptionEvent::Added {
                name: name.to_string(),
                value,
            },
        };
        self.notify(event);
        true
    }

    fn subscribe(&self, observer: Arc<dyn OptionObserver>) {
        self.observers.lock().push(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<OptionEvent>>,
    }

    impl OptionObserver for Recorder {
        fn on_option_changed(&self, _store: &dyn OptionStore, event: &OptionEvent) {
            self.events.lock().push(event.clone());
        }
    }

    #[test]
    fn test_add_does_not_overwrite() {
        let store = MemoryOptionStore::new();
        assert!(store.add_option("a", json!("1")));
        assert!(!store.add_option("a", json!("2")));
        assert_eq!(store.get_string("a").as_deref(), Some("1"));
    }

    #[test]
    fn test_update_emits_old_and_new_value() {
        let store = MemoryOptionStore::new();
        let recorder = Arc::new(Recorder::default());
        store.add_option("a", json!("1"));
        store.subscribe(recorder.clone());

        assert!(store.update_option("a", json!("2")));
        assert!(!store.update_option("a", json!("2")));

        let events = recorder.events.lock();
        assert_eq!(
            *events,
            vec![OptionEvent::Updated {
                name: "a".into(),
                old_value: json!("1"),
                value: json!("2"),
            }]
        );
    }

    #[test]
    fn test_update_of_missing_option_is_an_add() {
        let store = MemoryOptionStore::new();
        let recorder = Arc::new(Recorder::default());
        store.subscribe(recorder.clone());

        store.update_option("fresh", json!("x"));

        let events = recorder.events.lock();
        assert!(matches!(&events[0], OptionEvent::Added { name, .. } if name == "fresh"));
    }

    #[test]
    fn test_observer_may_write_back() {
        struct Echo;
        impl OptionObserver for Echo {
            fn on_option_changed(&self, store: &dyn OptionStore, event: &OptionEvent) {
                if event.name() == "source" {
                    store.update_option("mirror", event.value().clone());
                }
            }
        }

        let store = MemoryOptionStore::new();
        store.subscribe(Arc::new(Echo));
        store.update_option("source", json!("copied"));

        assert_eq!(store.get_string("mirror").as_deref(), Some("copied"));
    }

    #[test]
    fn test_get_string_of_structured_value_is_none() {
        let store = MemoryOptionStore::new();
        store.add_option("blob", json!({"k": "v"}));
        assert_eq!(store.get_string("blob"), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("options.json");

        let store = MemoryOptionStore::new();
        store.add_option("weather_widget_option_zipcode", json!("10001"));
        store.add_option("widget_OpenWeatherMap_Widget", json!({"2": {"zipcode": "10001"}}));
        store.save(&path).unwrap();

        let loaded = MemoryOptionStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get_string("weather_widget_option_zipcode").as_deref(),
            Some("10001")
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryOptionStore::load(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            MemoryOptionStore::load(&path),
            Err(StoreError::Corrupt(_))
        ));
    }
}
