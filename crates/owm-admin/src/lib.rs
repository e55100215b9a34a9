//! Admin-side surfaces: settings page, widget instance form and stylesheet assets.

pub mod assets;
pub mod fields;
pub mod instance_form;
pub mod settings_page;

pub use assets::{list_styles, plugin_action_links, stylesheet_tag, stylesheet_url};
pub use fields::{FieldDescriptor, FieldKind, Section, SelectSource, SECTIONS};
pub use instance_form::{render_instance_form, update_instance, WidgetInstance};
pub use settings_page::{needs_configuration, render_settings_page};
