//! Weather service for the sidebar widget
//!
//! Fetches current conditions from the OpenWeatherMap API for the
//! configured ZIP code and renders them as HTML.

pub mod format;
pub mod provider;
pub mod render;
pub mod types;
pub mod units;
pub mod widget;

pub use provider::WeatherProvider;
pub use render::{render_error, WeatherRenderer, WidgetChrome};
pub use types::*;
pub use units::UnitProfile;
pub use widget::WeatherWidget;
