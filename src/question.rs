//! Declarative question specifications.
//!
//! A [`QuestionSpec`] describes one question; it is read-only input,
//! constructed by the caller and consumed once by the session. Fields that
//! may depend on answers already collected (`message`, `default`, `choices`,
//! `when`) are a tagged union: a literal value, or a closure over the answer
//! snapshot. Literal strings are additionally rendered as minijinja
//! templates, which is how deserialized question documents (where closures
//! cannot exist) express the same dependencies.

use crate::answers::Answers;
use crate::choice::ChoiceSpec;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::render::TemplateRenderer;
use crate::style::{EditMode, KeyOverrides, StyleOverrides};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Question kind tag, one per prompt variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Input,
    Secret,
    Confirm,
    List,
    Checkbox,
    Rawlist,
    Expand,
    Filepath,
}

/// A field that is either a literal or computed from prior answers.
pub enum Dynamic<T> {
    Value(T),
    Computed(Arc<dyn Fn(&Answers) -> T + Send + Sync>),
}

impl<T> Dynamic<T> {
    pub fn computed(f: impl Fn(&Answers) -> T + Send + Sync + 'static) -> Self {
        Dynamic::Computed(Arc::new(f))
    }

    /// Resolving a literal is idempotent; a computed field is invoked with
    /// the immutable snapshot of answers committed so far.
    pub fn resolve(&self, answers: &Answers) -> T
    where
        T: Clone,
    {
        match self {
            Dynamic::Value(value) => value.clone(),
            Dynamic::Computed(f) => f(answers),
        }
    }
}

impl<T: Clone> Clone for Dynamic<T> {
    fn clone(&self) -> Self {
        match self {
            Dynamic::Value(value) => Dynamic::Value(value.clone()),
            Dynamic::Computed(f) => Dynamic::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Dynamic::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T: Default> Default for Dynamic<T> {
    fn default() -> Self {
        Dynamic::Value(T::default())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Dynamic<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        T::deserialize(deserializer).map(Dynamic::Value)
    }
}

impl From<&str> for Dynamic<String> {
    fn from(value: &str) -> Self {
        Dynamic::Value(value.to_string())
    }
}

impl From<String> for Dynamic<String> {
    fn from(value: String) -> Self {
        Dynamic::Value(value)
    }
}

/// Visibility gate evaluated before a question is asked.
#[derive(Clone, Default)]
pub enum When {
    #[default]
    Always,
    /// MiniJinja boolean expression over the answers collected so far.
    Expr(String),
    Computed(Arc<dyn Fn(&Answers) -> bool + Send + Sync>),
}

impl When {
    pub fn expr(expr: impl Into<String>) -> Self {
        When::Expr(expr.into())
    }

    pub fn computed(f: impl Fn(&Answers) -> bool + Send + Sync + 'static) -> Self {
        When::Computed(Arc::new(f))
    }
}

impl fmt::Debug for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            When::Always => f.write_str("Always"),
            When::Expr(expr) => f.debug_tuple("Expr").field(expr).finish(),
            When::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for When {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(When::Expr)
    }
}

/// Declarative description of one question.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSpec {
    /// Answer key; the positional index is used when omitted.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(default)]
    pub message: Dynamic<String>,
    #[serde(default)]
    pub default: Dynamic<Value>,
    #[serde(default)]
    pub choices: Dynamic<Vec<ChoiceSpec>>,
    #[serde(default)]
    pub when: When,
    #[serde(skip)]
    pub pipeline: Pipeline,
    /// Message shown when the validator rejects the input.
    #[serde(default)]
    pub invalid_message: Option<String>,
    /// Input only: commit through an explicit finish action instead of Enter.
    #[serde(default)]
    pub multiline: bool,
    /// Secret only: ask for a confirming re-entry.
    #[serde(default)]
    pub confirm_secret: bool,
    #[serde(default)]
    pub mismatch_message: Option<String>,
    /// Filepath only: restrict completions to directories.
    #[serde(default)]
    pub only_directories: bool,
    /// Short hint rendered next to list-family prompts.
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub style: StyleOverrides,
    #[serde(default)]
    pub keys: KeyOverrides,
    #[serde(default)]
    pub edit_mode: Option<EditMode>,
}

impl QuestionSpec {
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            name: None,
            kind,
            message: Dynamic::Value(message.into()),
            default: Dynamic::default(),
            choices: Dynamic::default(),
            when: When::Always,
            pipeline: Pipeline::new(),
            invalid_message: None,
            multiline: false,
            confirm_secret: false,
            mismatch_message: None,
            only_directories: false,
            instruction: None,
            style: StyleOverrides::default(),
            keys: KeyOverrides::default(),
            edit_mode: None,
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(Kind::Input, message)
    }

    pub fn secret(message: impl Into<String>) -> Self {
        Self::new(Kind::Secret, message)
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self::new(Kind::Confirm, message)
    }

    pub fn list(message: impl Into<String>) -> Self {
        Self::new(Kind::List, message)
    }

    pub fn checkbox(message: impl Into<String>) -> Self {
        Self::new(Kind::Checkbox, message)
    }

    pub fn rawlist(message: impl Into<String>) -> Self {
        Self::new(Kind::Rawlist, message)
    }

    pub fn expand(message: impl Into<String>) -> Self {
        Self::new(Kind::Expand, message)
    }

    pub fn filepath(message: impl Into<String>) -> Self {
        Self::new(Kind::Filepath, message)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Dynamic::Value(default.into());
        self
    }

    pub fn with_computed_default(
        mut self,
        f: impl Fn(&Answers) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.default = Dynamic::computed(f);
        self
    }

    pub fn with_computed_message(
        mut self,
        f: impl Fn(&Answers) -> String + Send + Sync + 'static,
    ) -> Self {
        self.message = Dynamic::computed(f);
        self
    }

    pub fn with_choices<C: Into<ChoiceSpec>>(
        mut self,
        choices: impl IntoIterator<Item = C>,
    ) -> Self {
        self.choices = Dynamic::Value(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_computed_choices(
        mut self,
        f: impl Fn(&Answers) -> Vec<ChoiceSpec> + Send + Sync + 'static,
    ) -> Self {
        self.choices = Dynamic::computed(f);
        self
    }

    pub fn ask_if(mut self, expr: impl Into<String>) -> Self {
        self.when = When::expr(expr);
        self
    }

    pub fn ask_when(
        mut self,
        f: impl Fn(&Answers) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.when = When::computed(f);
        self
    }

    pub fn validate(
        mut self,
        f: impl Fn(&Value) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.pipeline = self.pipeline.with_validator(f);
        self
    }

    pub fn with_invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = Some(message.into());
        self
    }

    pub fn filter(
        mut self,
        f: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.pipeline = self.pipeline.with_filter(f);
        self
    }

    pub fn transform(
        mut self,
        f: impl Fn(&Value) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        self.pipeline = self.pipeline.with_transform(f);
        self
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn confirm_secret(mut self, mismatch_message: Option<String>) -> Self {
        self.confirm_secret = true;
        self.mismatch_message = mismatch_message;
        self
    }

    pub fn only_directories(mut self, only_directories: bool) -> Self {
        self.only_directories = only_directories;
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn with_edit_mode(mut self, edit_mode: EditMode) -> Self {
        self.edit_mode = Some(edit_mode);
        self
    }

    /// Evaluates the visibility gate against the answers committed by
    /// strictly earlier questions.
    pub(crate) fn evaluate_when(
        &self,
        answers: &Answers,
        engine: &dyn TemplateRenderer,
    ) -> Result<bool> {
        match &self.when {
            When::Always => Ok(true),
            When::Expr(expr) => engine.execute_expression(expr, &answers.to_value()),
            When::Computed(f) => Ok(f(answers)),
        }
    }

    /// Literal messages go through the template engine so deserialized
    /// documents can interpolate prior answers; closures are invoked with
    /// the snapshot directly.
    pub(crate) fn resolve_message(
        &self,
        answers: &Answers,
        engine: &dyn TemplateRenderer,
    ) -> Result<String> {
        match &self.message {
            Dynamic::Value(template) => engine.render(template, &answers.to_value()),
            Dynamic::Computed(f) => Ok(f(answers)),
        }
    }

    /// String defaults render as templates; other literal values pass
    /// through untouched.
    pub(crate) fn resolve_default(
        &self,
        answers: &Answers,
        engine: &dyn TemplateRenderer,
    ) -> Result<Value> {
        match &self.default {
            Dynamic::Value(Value::String(template)) => Ok(Value::String(
                engine.render(template, &answers.to_value())?,
            )),
            Dynamic::Value(value) => Ok(value.clone()),
            Dynamic::Computed(f) => Ok(f(answers)),
        }
    }

    pub(crate) fn resolve_choices(&self, answers: &Answers) -> Vec<ChoiceSpec> {
        self.choices.resolve(answers)
    }
}
