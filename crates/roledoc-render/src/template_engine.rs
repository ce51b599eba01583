//! Template engine for role documents using Handlebars.
//!
//! Provides a wrapper around Handlebars with the built-in document templates
//! pre-registered under the name of their [`DocFormat`].
//!
//! # Examples
//!
//! ```
//! use roledoc_render::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "Role {{name}}").unwrap();
//! let rendered = engine.render("greeting", &json!({"name": "A&B"})).unwrap();
//! assert_eq!(rendered, "Role A&B");
//! ```

use handlebars::Handlebars;
use roledoc_core::cli::DocFormat;
use roledoc_core::{Error, Result};
use serde::Serialize;

const MARKDOWN_TEMPLATE: &str = include_str!("../templates/document.md.hbs");
const TEXT_TEMPLATE: &str = include_str!("../templates/document.txt.hbs");

/// Template engine for role documents.
///
/// Output is plain text, so HTML escaping is disabled: values such as
/// `A&ECoding` are rendered verbatim. Strict mode is on, so a template that
/// references a field missing from the context fails instead of printing
/// nothing.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the document templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut engine = Self { handlebars };
        engine.register_template_string(DocFormat::Markdown.as_str(), MARKDOWN_TEMPLATE)?;
        engine.register_template_string(DocFormat::Text.as_str(), TEXT_TEMPLATE)?;

        Ok(engine)
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - Template rendering fails
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::Template {
                message: format!("failed to render '{template_name}': {e}"),
            })
    }

    /// Registers a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::Template {
                message: format!("failed to register template '{name}': {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
