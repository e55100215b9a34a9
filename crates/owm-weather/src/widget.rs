//! Front-end widget: read settings, fetch once, render.
//!
//! This is the error boundary. Every fetch failure is turned into widget
//! markup here; nothing propagates to the caller.

use std::sync::Arc;

use owm_core::{OptionStore, WidgetSettings};

use crate::provider::WeatherProvider;
use crate::render::{WeatherRenderer, WidgetChrome};
use crate::types::WeatherQuery;

pub struct WeatherWidget {
    store: Arc<dyn OptionStore>,
    provider: WeatherProvider,
    renderer: WeatherRenderer,
}

impl WeatherWidget {
    pub fn new(
        store: Arc<dyn OptionStore>,
        provider: WeatherProvider,
        renderer: WeatherRenderer,
    ) -> Self {
        Self {
            store,
            provider,
            renderer,
        }
    }

    /// Render the widget with the settings currently in the store.
    pub async fn render(&self, chrome: &WidgetChrome) -> String {
        let settings = WidgetSettings::load(self.store.as_ref());
        let query = WeatherQuery::from_settings(&settings);

        let outcome = self.provider.fetch(&query).await;
        match &outcome {
            Ok(snapshot) => tracing::info!("Rendering weather widget for {}", snapshot.city),
            Err(err) if err.is_configuration_problem() => {
                tracing::warn!("Weather widget not configured: {}", err)
            }
            Err(err) => tracing::warn!("Weather fetch failed: {}", err),
        }

        self.renderer.render_widget(&outcome, &settings, chrome)
    }
}
