//! Settings, storage and error handling shared by the weather widget crates.

pub mod config;
pub mod error;
pub mod setting;
pub mod settings;
pub mod store;
pub mod sync;
pub mod text;

pub use config::{Config, ConfigIssue};
pub use error::{AppError, ConfigError, ReqwestErrorExt, StoreError, WidgetError};
pub use setting::{Setting, Units, CHECKED, OPTION_PREFIX};
pub use settings::{
    get_setting, get_setting_or_default, register_settings, set_setting, set_setting_by_name,
    WidgetSettings,
};
pub use store::{MemoryOptionStore, OptionEvent, OptionObserver, OptionStore};
pub use sync::{sync_setting_to_widgets, SettingsSynchronizer, LEGACY_WIDGET_OPTION};

use anyhow::Result;

/// Initialize logging for the widget binaries
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Weather widget core initialized");
    Ok(())
}
