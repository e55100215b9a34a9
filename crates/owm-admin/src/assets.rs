//! Stylesheet discovery and the plugin list link.

use std::path::Path;

use owm_core::text::escape_html;

pub const STYLE_HANDLE: &str = "openweathermap-widget";
pub const SETTINGS_PAGE_URL: &str = "options-general.php?page=weatherwidget";

/// Basenames of the `*.css` files in `dir`, sorted. A missing directory yields none.
pub fn list_styles(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("No stylesheets in {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut styles: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "css"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    styles.sort();
    styles
}

pub fn stylesheet_url(assets_url: &str, style: &str) -> String {
    format!("{}/{}.css", assets_url.trim_end_matches('/'), style)
}

/// `<link>` tag enqueuing the stylesheet for the selected style.
pub fn stylesheet_tag(assets_url: &str, style: &str) -> String {
    format!(
        "<link rel='stylesheet' id='{}-css' href='{}' media='all' />",
        STYLE_HANDLE,
        escape_html(&stylesheet_url(assets_url, style))
    )
}

pub fn settings_link() -> String {
    format!(r#"<a href="{}">Settings</a>"#, SETTINGS_PAGE_URL)
}

/// Put the settings link first in the plugin's action links.
pub fn plugin_action_links(mut links: Vec<String>) -> Vec<String> {
    links.insert(0, settings_link());
    links
}
