use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Variables handed to a template, by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings(BTreeMap<String, serde_json::Value>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `name`, replacing any earlier binding
    pub fn insert<T: Serialize>(&mut self, name: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize template variable '{}'", name))?;
        self.0.insert(name.to_string(), value);
        Ok(())
    }
}

/// Turns a named template plus bindings into a document.
pub trait Renderer {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String>;
}

/// Jinja-syntax renderer.
///
/// Templates ending in `.html` are auto-escaped.
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Load templates by file name from `dir` on first use
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));
        Self { env }
    }

    /// Register a single template held in memory
    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(name.to_string(), source.to_string())
            .with_context(|| format!("Failed to parse template '{}'", name))?;
        Ok(Self { env })
    }
}

impl Renderer for JinjaRenderer {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String> {
        let tpl = self
            .env
            .get_template(template)
            .with_context(|| format!("Failed to load template '{}'", template))?;
        tpl.render(bindings)
            .with_context(|| format!("Failed to render template '{}'", template))
    }
}

impl<T: Renderer + ?Sized> Renderer for &T {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String> {
        (**self).render(template, bindings)
    }
}
