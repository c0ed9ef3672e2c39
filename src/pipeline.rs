//! Validation, filtering and transformation callbacks.
//!
//! User-supplied callbacks are wrapped with uniform error semantics: a
//! validator returning `Ok(false)` is an ordinary validation failure (user
//! error, recovered locally by re-prompting), while any callback returning
//! `Err` is a programmer error that propagates and aborts the session.
//! Filters and transformers run only after validation has passed: the filter
//! maps the raw committed value to the stored answer value, the transformer
//! maps the stored value to a display-only string without altering it.

use crate::constants::messages;
use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type ValidateFn = Arc<dyn Fn(&Value) -> Result<bool> + Send + Sync>;
pub type FilterFn = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;
pub type TransformFn = Arc<dyn Fn(&Value) -> Result<String> + Send + Sync>;

/// Outcome of running the validator against a raw committed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Checked {
    Valid,
    /// Carries the message shown beneath the prompt.
    Invalid(String),
}

#[derive(Clone, Default)]
pub struct Pipeline {
    validate: Option<ValidateFn>,
    filter: Option<FilterFn>,
    transform: Option<TransformFn>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(
        mut self,
        validate: impl Fn(&Value) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn with_transform(
        mut self,
        transform: impl Fn(&Value) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Runs the validator. `invalid_message` is the configured message shown
    /// on failure; without a validator every value passes.
    pub fn check(&self, raw: &Value, invalid_message: Option<&str>) -> Result<Checked> {
        match &self.validate {
            None => Ok(Checked::Valid),
            Some(validate) => {
                if validate(raw)? {
                    Ok(Checked::Valid)
                } else {
                    Ok(Checked::Invalid(
                        invalid_message.unwrap_or(messages::INVALID_INPUT).to_string(),
                    ))
                }
            }
        }
    }

    /// Maps the raw committed value to the stored answer value.
    pub fn filter(&self, raw: Value) -> Result<Value> {
        match &self.filter {
            None => Ok(raw),
            Some(filter) => filter(raw),
        }
    }

    /// Maps the stored value to its display-only form, if a transformer is
    /// configured.
    pub fn transform(&self, stored: &Value) -> Result<Option<String>> {
        match &self.transform {
            None => Ok(None),
            Some(transform) => transform(stored).map(Some),
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("validate", &self.validate.is_some())
            .field("filter", &self.filter.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn no_validator_always_passes() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.check(&json!("anything"), None).unwrap(), Checked::Valid);
    }

    #[test]
    fn failing_validator_reports_configured_message() {
        let pipeline = Pipeline::new()
            .with_validator(|v| Ok(v.as_str().is_some_and(|s| !s.is_empty())));
        let checked =
            pipeline.check(&json!(""), Some("Input should be number.")).unwrap();
        assert_eq!(checked, Checked::Invalid("Input should be number.".to_string()));
    }

    #[test]
    fn failing_validator_falls_back_to_default_message() {
        let pipeline = Pipeline::new().with_validator(|_| Ok(false));
        let checked = pipeline.check(&json!("x"), None).unwrap();
        assert_eq!(checked, Checked::Invalid("Invalid input".to_string()));
    }

    #[test]
    fn validator_error_propagates_as_fatal() {
        let pipeline = Pipeline::new()
            .with_validator(|_| Err(Error::ConfigError("broken validator".into())));
        assert!(pipeline.check(&json!("x"), None).is_err());
    }

    #[test]
    fn filter_maps_raw_to_stored() {
        let pipeline = Pipeline::new().with_filter(|raw| {
            let n: i64 = raw
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::ConfigError("not a number".into()))?;
            Ok(json!(n))
        });
        assert_eq!(pipeline.filter(json!("25")).unwrap(), json!(25));
    }

    #[test]
    fn transform_is_display_only() {
        let pipeline = Pipeline::new().with_transform(|stored| {
            Ok(if stored.as_i64().unwrap_or(0) >= 18 { "Adult" } else { "Youth" }
                .to_string())
        });
        let stored = json!(25);
        assert_eq!(pipeline.transform(&stored).unwrap(), Some("Adult".to_string()));
        // The stored value is untouched.
        assert_eq!(stored, json!(25));
    }

    #[test]
    fn absent_callbacks_are_identity() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.filter(json!("raw")).unwrap(), json!("raw"));
        assert_eq!(pipeline.transform(&json!("raw")).unwrap(), None);
    }
}
