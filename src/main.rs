use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use owm_admin::{
    list_styles, plugin_action_links, render_instance_form, render_settings_page,
    update_instance, WidgetInstance,
};
use owm_core::{
    get_setting, register_settings, set_setting_by_name, AppError, Config, MemoryOptionStore,
    OptionStore, Setting, StoreError, WidgetSettings, LEGACY_WIDGET_OPTION,
};
use owm_weather::{WeatherProvider, WeatherRenderer, WeatherWidget, WidgetChrome};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "owm-widget", about = "OpenWeatherMap sidebar widget", version)]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create missing settings with their defaults
    Init,
    /// Print one setting
    Get { name: String },
    /// Change one setting
    Set { name: String, value: String },
    /// Fetch current weather and print the widget HTML
    Render {
        /// Prefix the output with the stylesheet <link> tag
        #[arg(long)]
        with_style: bool,
    },
    /// Print the admin settings page
    SettingsPage,
    /// Print the form for one widget instance
    WidgetForm {
        #[arg(long, default_value_t = 1)]
        number: u32,
    },
    /// Save a widget instance form
    SaveWidget {
        #[arg(long, default_value_t = 1)]
        number: u32,
        #[arg(long, default_value = "")]
        country_code: String,
        #[arg(long, default_value = "")]
        zipcode: String,
    },
    /// List the available styles
    Styles,
    /// Print the plugin-list action links, settings link first
    ActionLinks {
        /// Links the host already shows
        links: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    owm_core::init()?;

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load_validated(&config_path)?;

    let store = Arc::new(MemoryOptionStore::load(&config.options_path)?);
    register_settings(store.as_ref());

    match cli.command {
        Command::Init => {
            println!("Settings stored in {}", config.options_path.display());
        }
        Command::Get { name } => {
            let setting =
                Setting::from_name(&name).ok_or_else(|| StoreError::UnknownSetting(name.clone()))?;
            println!("{}", get_setting(store.as_ref(), setting).unwrap_or_default());
        }
        Command::Set { name, value } => {
            let changed = set_setting_by_name(store.as_ref(), &name, &value)?;
            if !changed {
                tracing::info!("{} already set to {:?}", name, value);
            }
        }
        Command::Render { with_style } => {
            let settings = WidgetSettings::load(store.as_ref());
            if with_style {
                println!(
                    "{}",
                    owm_admin::stylesheet_tag(&config.assets_url, settings.style())
                );
            }

            let widget = WeatherWidget::new(
                store.clone(),
                WeatherProvider::with_base_url(&config.api_base_url)?,
                WeatherRenderer::new(&config.icon_base_url),
            );
            println!("{}", widget.render(&WidgetChrome::default()).await);
        }
        Command::SettingsPage => {
            let styles = list_styles(&config.assets_dir);
            println!("{}", render_settings_page(store.as_ref(), &styles));
        }
        Command::WidgetForm { number } => {
            let instance = store
                .get_option(LEGACY_WIDGET_OPTION)
                .and_then(|widgets| widgets.get(number.to_string()).cloned())
                .map(|blob| WidgetInstance::from_value(&blob))
                .unwrap_or_default();
            println!("{}", render_instance_form(&instance, number));
        }
        Command::SaveWidget {
            number,
            country_code,
            zipcode,
        } => {
            let saved = update_instance(
                store.as_ref(),
                &WidgetInstance {
                    country_code,
                    zipcode,
                },
            );
            store_instance(store.as_ref(), number, &saved);
        }
        Command::Styles => {
            for style in list_styles(&config.assets_dir) {
                println!("{}", style);
            }
        }
        Command::ActionLinks { links } => {
            for link in plugin_action_links(links) {
                println!("{}", link);
            }
        }
    }

    store.save(&config.options_path)?;
    Ok(())
}

/// Replace instance `number` in the legacy widget record with the saved form.
fn store_instance(store: &dyn OptionStore, number: u32, instance: &WidgetInstance) {
    let mut widgets = match store.get_option(LEGACY_WIDGET_OPTION) {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    widgets.insert(number.to_string(), instance.to_value());
    widgets
        .entry("_multiwidget")
        .or_insert_with(|| Value::from(1));
    store.update_option(LEGACY_WIDGET_OPTION, Value::Object(widgets));
}
