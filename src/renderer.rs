//! Template renderer for site pages, backed by MiniJinja.
//!
//! Templates under the configured templates directory are resolved by
//! name, so page sources can `{% extends "layout.html" %}` and pull in
//! shared blocks.

use crate::config::Context;
use crate::error::Result;
use minijinja::{path_loader, AutoEscape, Environment};
use std::path::Path;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &Context) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a rendering engine resolving template names under
    /// `templates_path`.
    pub fn new<P: AsRef<Path>>(templates_path: P) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_path));
        // Pages emit raw HTML fragments, so autoescaping stays off.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// Named templates referenced via `extends`/`include` are loaded from
    /// the templates directory configured at construction.
    ///
    /// # Errors
    /// * `Error::Template` if parsing or rendering fails
    fn render(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context_from(value: serde_json::Value) -> Context {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_render_interpolates_context() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MiniJinjaRenderer::new(dir.path());
        let context = context_from(json!({"name": "pysuerga"}));

        let rendered = renderer.render("Hello {{ name }}!", &context).unwrap();
        assert_eq!(rendered, "Hello pysuerga!");
    }

    #[test]
    fn test_render_does_not_escape_html() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MiniJinjaRenderer::new(dir.path());
        let context = context_from(json!({"body": "<p>hi</p>"}));

        let rendered = renderer.render("{{ body }}", &context).unwrap();
        assert_eq!(rendered, "<p>hi</p>");
    }

    #[test]
    fn test_render_extends_named_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("layout.html"),
            "<main>{% block body %}{% endblock %}</main>",
        )
        .unwrap();
        let renderer = MiniJinjaRenderer::new(dir.path());
        let context = context_from(json!({}));

        let rendered = renderer
            .render(
                "{% extends \"layout.html\" %}{% block body %}content{% endblock %}",
                &context,
            )
            .unwrap();
        assert_eq!(rendered, "<main>content</main>");
    }

    #[test]
    fn test_render_reports_template_errors() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MiniJinjaRenderer::new(dir.path());
        let context = context_from(json!({}));

        let result = renderer.render("{% if %}", &context);
        assert!(result.is_err());
    }
}
