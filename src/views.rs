//! HTML views for the display, control and status pages.
//!
//! Handlers never build markup themselves; they hand a template name and a
//! JSON payload to a [`ViewRenderer`]. The default renderer is Handlebars
//! with the templates under `templates/` compiled into the binary.

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::ViewError;

/// Full-screen page shown on the display.
pub const VIEW_DISPLAY: &str = "index";
/// Remote-control page listing every mode.
pub const VIEW_CONTROL: &str = "control";
/// Status page with the current mode and the mode table.
pub const VIEW_STATUS: &str = "status";

const TEMPLATES: &[(&str, &str)] = &[
    (VIEW_DISPLAY, include_str!("../templates/index.hbs")),
    (VIEW_CONTROL, include_str!("../templates/control.hbs")),
    (VIEW_STATUS, include_str!("../templates/status.hbs")),
];

/// Renders a named template with a data payload into HTML.
pub trait ViewRenderer: Send + Sync + std::fmt::Debug {
    /// Render `name` with `data`.
    fn render(&self, name: &str, data: &Value) -> Result<String, ViewError>;
}

/// Handlebars-backed renderer with the built-in templates.
#[derive(Debug)]
pub struct HandlebarsViews {
    registry: Handlebars<'static>,
}

impl HandlebarsViews {
    /// Compile the built-in templates.
    pub fn new() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| ViewError::Template {
                    name: (*name).to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { registry })
    }
}

impl ViewRenderer for HandlebarsViews {
    fn render(&self, name: &str, data: &Value) -> Result<String, ViewError> {
        self.registry.render(name, data).map_err(|e| ViewError::Render {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}
