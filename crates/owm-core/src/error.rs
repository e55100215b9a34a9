//! Error types for the weather widget.
//!
//! `WidgetError` is what the widget can show inline; `AppError` wraps
//! everything the command-line host can fail with.

use thiserror::Error;

/// Anything that aborts a command. `user_message()` is the line printed
/// for the operator; the `Display` form goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Option store error: {0}")]
    Store(#[from] StoreError),

    #[error("Widget error: {0}")]
    Widget(#[from] WidgetError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Store(e) => e.user_message(),
            AppError::Widget(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file is not valid TOML: {0}")]
    Format(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "Unable to read or write the configuration file.",
            ConfigError::Format(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

/// Option store persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Option store IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Option store is corrupt: {0}")]
    Corrupt(String),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Io(_) => "Unable to access saved settings. Please try again.",
            StoreError::Corrupt(_) => "Saved settings are corrupted. Consider resetting them.",
            StoreError::UnknownSetting(_) => "That setting does not exist.",
        }
    }
}

/// Everything that stops the widget from showing weather data.
///
/// Each kind maps to exactly one line shown inside the widget shell;
/// a malformed success response renders no message at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("ZIP code is not configured")]
    MissingZipcode,

    #[error("Weather request failed: {0}")]
    Transport(String),

    #[error("API rejected the API key")]
    InvalidApiKey,

    #[error("API did not recognise the ZIP code")]
    InvalidZipcode,

    #[error("API error (HTTP {status})")]
    UnknownApiError { status: u16 },

    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),
}

impl WidgetError {
    /// The in-widget line for this error, or `None` when nothing should be shown.
    pub fn widget_message(&self) -> Option<&'static str> {
        match self {
            WidgetError::MissingApiKey => {
                Some("Please provide your OpenWeatherMap API key in the plugin settings.")
            }
            WidgetError::MissingZipcode => {
                Some("Please provide a ZIP code in the widget settings or the plugin settings.")
            }
            WidgetError::Transport(_) => Some(
                "An error occurred while retrieving the weather information. Please check your settings.",
            ),
            WidgetError::InvalidApiKey => {
                Some("Your API Key is not valid. Please check it in the settings.")
            }
            WidgetError::InvalidZipcode => {
                Some("The ZIP Code is not valid. Please check it in the settings.")
            }
            WidgetError::UnknownApiError { .. } => {
                Some("An unknown error occurred. Please check your settings.")
            }
            WidgetError::MalformedResponse(_) => None,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.widget_message()
            .unwrap_or("Received an unexpected response. Please try again.")
    }

    /// Errors that a settings change can fix.
    pub fn is_configuration_problem(&self) -> bool {
        matches!(
            self,
            WidgetError::MissingApiKey
                | WidgetError::MissingZipcode
                | WidgetError::InvalidApiKey
                | WidgetError::InvalidZipcode
        )
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_widget_error(self) -> WidgetError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_widget_error(self) -> WidgetError {
        if self.is_decode() {
            WidgetError::MalformedResponse(self.to_string())
        } else if self.is_timeout() {
            WidgetError::Transport(format!("timed out: {}", self))
        } else {
            WidgetError::Transport(self.to_string())
        }
    }
}
