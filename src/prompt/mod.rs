//! Single-prompt execution.
//!
//! A [`Prompt`] is constructed from a fully-resolved question (message,
//! default and choices already evaluated against prior answers) and runs one
//! collect-validate loop against a backend: the backend blocks for a raw
//! committed value, the validation pipeline either accepts it or sends the
//! prompt back to editing with a failure message, and an accepted value is
//! filtered into its stored form exactly once. Construction is where
//! configuration problems surface; the run loop only ever reports user
//! interrupts and backend failures.

use crate::backend::{
    ConfirmConfig, ExpandConfig, MultiSelectConfig, PathConfig, PromptBackend,
    SecretConfig, SelectConfig, TextConfig,
};
use crate::choice::{ChoiceList, ChoiceSpec};
use crate::completion::PathCompleter;
use crate::constants::messages;
use crate::error::{Error, Result};
use crate::pipeline::Checked;
use crate::question::{Kind, QuestionSpec};
use crate::style::PromptConfig;
use serde_json::Value;

/// Terminal state of one executed prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptStatus {
    /// Flips to `true` exactly once, when a value passes validation.
    pub answered: bool,
    /// The stored (post-filter) answer value.
    pub result: Option<Value>,
}

/// One question bound to a backend, ready to execute.
pub struct Prompt<'a, B: PromptBackend> {
    spec: &'a QuestionSpec,
    key: String,
    message: String,
    default: Value,
    list: Option<ChoiceList>,
    config: PromptConfig,
    backend: &'a B,
    status: PromptStatus,
}

impl<'a, B: PromptBackend> Prompt<'a, B> {
    /// Builds a prompt from resolved inputs. List-family questions are
    /// normalized here and rejected when nothing is selectable; expand
    /// questions additionally need a usable, collision-free key per entry.
    pub fn new(
        spec: &'a QuestionSpec,
        key: impl Into<String>,
        message: String,
        default: Value,
        choices: &[ChoiceSpec],
        config: PromptConfig,
        backend: &'a B,
    ) -> Result<Self> {
        let key = key.into();
        let list = match spec.kind {
            Kind::List | Kind::Checkbox | Kind::Rawlist | Kind::Expand => {
                let mut list = ChoiceList::normalize(choices, config.wrap);
                if list.first_selectable().is_none() {
                    return Err(Error::NoSelectableChoices { name: key });
                }
                if spec.kind == Kind::Checkbox {
                    if let Some(defaults) = default.as_array() {
                        list.apply_checked_defaults(defaults);
                    }
                }
                if spec.kind == Kind::Expand {
                    list.check_expand_keys(config.keys.help)
                        .map_err(Error::ConfigError)?;
                }
                Some(list)
            }
            _ => None,
        };
        Ok(Self {
            spec,
            key,
            message,
            default,
            list,
            config,
            backend,
            status: PromptStatus::default(),
        })
    }

    /// Runs the prompt to completion: collect until the pipeline accepts,
    /// filter into the stored value, echo the transformed display. A user
    /// interrupt or backend failure propagates immediately.
    pub fn run(mut self) -> Result<PromptStatus> {
        let mut error: Option<String> = None;
        let raw = loop {
            let raw = self.ask_once(error.as_deref())?;
            match self.spec.pipeline.check(&raw, self.spec.invalid_message.as_deref())? {
                Checked::Valid => break raw,
                Checked::Invalid(message) => {
                    log::debug!("'{}' rejected input: {message}", self.key);
                    error = Some(message);
                }
            }
        };
        let stored = self.spec.pipeline.filter(raw)?;
        self.status.answered = true;
        self.status.result = Some(stored.clone());
        if let Some(display) = self.spec.pipeline.transform(&stored)? {
            self.backend.render_committed(&self.message, &display);
        }
        Ok(self.status)
    }

    fn ask_once(&self, error: Option<&str>) -> Result<Value> {
        match (self.spec.kind, &self.list) {
            (Kind::Input, _) => self.ask_text(error),
            (Kind::Secret, _) => self.ask_secret(error),
            (Kind::Confirm, _) => self.ask_confirm(),
            (Kind::List | Kind::Rawlist, Some(list)) => self.ask_select(list),
            (Kind::Checkbox, Some(list)) => self.ask_multi_select(list),
            (Kind::Expand, Some(list)) => self.ask_expand(list),
            (Kind::Filepath, _) => self.ask_path(error),
            // Construction builds a list for every list-family kind.
            (_, None) => Err(Error::ConfigError(format!(
                "list-family prompt '{}' has no choice list",
                self.key
            ))),
        }
    }

    fn ask_text(&self, error: Option<&str>) -> Result<Value> {
        let raw = self.backend.prompt_text(&TextConfig {
            message: &self.message,
            default: self.default.as_str(),
            multiline: self.spec.multiline,
            error,
            config: &self.config,
        })?;
        Ok(Value::String(raw))
    }

    fn ask_secret(&self, error: Option<&str>) -> Result<Value> {
        let raw = self.backend.prompt_secret(&SecretConfig {
            message: &self.message,
            confirm: self.spec.confirm_secret,
            mismatch_message: self
                .spec
                .mismatch_message
                .as_deref()
                .unwrap_or(messages::PASSWORDS_MISMATCH),
            error,
            config: &self.config,
        })?;
        Ok(Value::String(raw))
    }

    fn ask_confirm(&self) -> Result<Value> {
        let answered = self.backend.prompt_confirm(&ConfirmConfig {
            message: &self.message,
            default: self.default.as_bool().unwrap_or(false),
            config: &self.config,
        })?;
        Ok(Value::Bool(answered))
    }

    fn ask_select(&self, list: &ChoiceList) -> Result<Value> {
        let index = self.backend.prompt_select(&SelectConfig {
            message: &self.message,
            list,
            default_index: list.default_index(&self.default),
            numbered: self.spec.kind == Kind::Rawlist,
            instruction: self.spec.instruction.as_deref(),
            config: &self.config,
        })?;
        self.committed_choice(list, index)
    }

    fn ask_multi_select(&self, list: &ChoiceList) -> Result<Value> {
        let toggled = self.backend.prompt_multi_select(&MultiSelectConfig {
            message: &self.message,
            list,
            instruction: self.spec.instruction.as_deref(),
            config: &self.config,
        })?;
        Ok(Value::Array(list.toggled_values(&toggled)))
    }

    fn ask_expand(&self, list: &ChoiceList) -> Result<Value> {
        let default_key = self
            .default
            .as_str()
            .and_then(|s| s.chars().next())
            .map(|c| c.to_ascii_lowercase());
        let key = self.backend.prompt_expand(&ExpandConfig {
            message: &self.message,
            list,
            default_key,
            instruction: self.spec.instruction.as_deref(),
            config: &self.config,
        })?;
        let index = list.entry_for_key(key).ok_or_else(|| {
            Error::ConfigError(format!(
                "backend returned unbound expand key '{key}' for '{}'",
                self.key
            ))
        })?;
        self.committed_choice(list, index)
    }

    fn ask_path(&self, error: Option<&str>) -> Result<Value> {
        let completer = PathCompleter::new(self.spec.only_directories);
        let raw = self.backend.prompt_path(
            &PathConfig {
                message: &self.message,
                default: self.default.as_str(),
                error,
                config: &self.config,
            },
            &completer,
        )?;
        Ok(Value::String(raw))
    }

    /// A backend answering with an unselectable entry is a backend bug, not
    /// a user error.
    fn committed_choice(&self, list: &ChoiceList, index: usize) -> Result<Value> {
        if !list.is_selectable(index) {
            return Err(Error::ConfigError(format!(
                "backend returned unselectable entry {index} for '{}'",
                self.key
            )));
        }
        list.choice_at(index)
            .map(|choice| choice.value.clone())
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "backend returned out-of-range entry {index} for '{}'",
                    self.key
                ))
            })
    }
}
