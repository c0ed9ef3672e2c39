//! Template evaluation for computed question fields.
//!
//! Declarative question documents cannot carry closures, so textual fields
//! (`message`, string defaults) and `when` gates may instead be minijinja
//! templates and expressions evaluated against the answers collected so far.

use crate::error::Result;
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context. A plain string with
    /// no template syntax renders to itself.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;

    /// Executes a boolean expression against the given context.
    ///
    /// An empty expression is vacuously true. A compile failure is a
    /// programmer error and propagates; a runtime evaluation failure (for
    /// example an operation on a key that was skipped earlier in the
    /// session) is treated as false.
    fn execute_expression(
        &self,
        expr: &str,
        context: &serde_json::Value,
    ) -> Result<bool>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        Self { env: Environment::new() }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }

    fn execute_expression(
        &self,
        expr: &str,
        context: &serde_json::Value,
    ) -> Result<bool> {
        if expr.is_empty() {
            return Ok(true);
        }
        let compiled = self.env.compile_expression(expr)?;
        match compiled.eval(context) {
            Ok(value) => Ok(value.is_true()),
            Err(err) => {
                log::debug!("expression '{expr}' failed to evaluate: {err}");
                Ok(false)
            }
        }
    }
}
