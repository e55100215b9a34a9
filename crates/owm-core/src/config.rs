//! Deployment configuration: where the API, icons, option store and
//! stylesheets live. What the widget shows is driven by the option store.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Current-weather API base, without the trailing `/weather`
    pub api_base_url: String,
    /// Base URL for condition icons (`{icon_base_url}/{icon}.png`)
    pub icon_base_url: String,
    /// JSON file backing the option store
    pub options_path: PathBuf,
    /// Directory holding one stylesheet per `style` option
    pub assets_dir: PathBuf,
    /// Public URL prefix under which `assets_dir` is served
    pub assets_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://api.openweathermap.org/data/2.5".to_string(),
            icon_base_url: "http://openweathermap.org/img/w".to_string(),
            options_path: config_dir().join("options.json"),
            assets_dir: PathBuf::from("assets/css"),
            assets_url: "/assets/css".to_string(),
        }
    }
}

/// Something wrong with one config field. Only fatal issues stop startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
    pub fatal: bool,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("owm-widget")
}

impl Config {
    /// `<config dir>/owm-widget/config.toml`
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Read `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("Writing default configuration to {}", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Format(e.to_string()))
    }

    /// Load and check `path`. Non-fatal issues are logged and dropped.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_from(path)?;
        let (fatal, warnings): (Vec<_>, Vec<_>) =
            config.check().into_iter().partition(|issue| issue.fatal);

        for warning in &warnings {
            tracing::warn!("Config warning: {}", warning);
        }
        if !fatal.is_empty() {
            let summary = fatal
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::Invalid(summary));
        }
        Ok(config)
    }

    pub fn check(&self) -> Vec<ConfigIssue> {
        let mut issues: Vec<ConfigIssue> = [
            ("api_base_url", self.api_base_url.as_str()),
            ("icon_base_url", self.icon_base_url.as_str()),
        ]
        .into_iter()
        .filter_map(|(field, value)| check_http_url(field, value))
        .collect();

        if self.options_path.is_dir() {
            issues.push(ConfigIssue {
                field: "options_path",
                message: format!("{} is a directory", self.options_path.display()),
                fatal: true,
            });
        }
        // A missing stylesheet dir only empties the style choices.
        if !self.assets_dir.is_dir() {
            issues.push(ConfigIssue {
                field: "assets_dir",
                message: format!("no stylesheet directory at {}", self.assets_dir.display()),
                fatal: false,
            });
        }
        issues
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Format(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn check_http_url(field: &'static str, value: &str) -> Option<ConfigIssue> {
    let message = match Url::parse(value) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            format!("expected an http(s) URL, got scheme {}", url.scheme())
        }
        Ok(url) if url.host().is_none() => "URL has no host".to_string(),
        Ok(_) => return None,
        Err(e) => format!("not a URL: {}", e),
    };
    Some(ConfigIssue {
        field,
        message,
        fatal: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_assets(dir: &Path) -> Config {
        Config {
            assets_dir: dir.to_path_buf(),
            options_path: dir.join("options.json"),
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults_have_no_fatal_issues() {
        assert!(Config::default().check().iter().all(|issue| !issue.fatal));
    }

    #[test]
    fn test_bad_urls_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_base_url: "not-a-url".to_string(),
            icon_base_url: "ftp://openweathermap.org/img/w".to_string(),
            ..with_assets(dir.path())
        };
        let issues = config.check();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "api_base_url");
        assert!(issues[1].message.contains("scheme ftp"));
        assert!(issues.iter().all(|issue| issue.fatal));
    }

    #[test]
    fn test_missing_assets_dir_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let config = with_assets(&dir.path().join("nope"));
        let issues = config.check();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "assets_dir");
        assert!(!issues[0].fatal);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "assets_dir = \"/srv/css\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("/srv/css"));
        assert_eq!(config.api_base_url, "http://api.openweathermap.org/data/2.5");
    }

    #[test]
    fn test_unparseable_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Format(_))));
    }

    #[test]
    fn test_load_validated_rejects_fatal_issues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            api_base_url: "mailto:weather@example.com".to_string(),
            ..with_assets(dir.path())
        };
        config.save_to(&path).unwrap();

        let err = Config::load_validated(&path).unwrap_err();
        assert!(
            matches!(&err, ConfigError::Invalid(summary) if summary.starts_with("api_base_url:")),
            "{:?}",
            err
        );
    }

    #[test]
    fn test_load_validated_keeps_warnings_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        with_assets(&dir.path().join("missing")).save_to(&path).unwrap();
        assert!(Config::load_validated(&path).is_ok());
    }
}
