//! Scripted backend with predefined responses.
//!
//! Answers prompts without user interaction, which makes it useful for
//! automation and CI environments as well as the crate's own tests.
//! Responses are keyed by prompt message. Text responses are a queue so a
//! validation-retry loop can be walked through distinct attempts; the other
//! response kinds fall back to the prompt's configured default when nothing
//! was scripted.

use super::{
    ConfirmConfig, ConfirmPrompter, ExpandConfig, ExpandPrompter, MultiSelectConfig,
    MultiSelectPrompter, PathConfig, PathPrompter, PromptBackend, SecretConfig,
    SecretPrompter, SelectConfig, SelectPrompter, TextConfig, TextPrompter,
};
use crate::completion::CompletionProvider;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    text: RefCell<HashMap<String, VecDeque<String>>>,
    /// message -> queued (entry, confirming re-entry) attempts.
    secrets: RefCell<HashMap<String, VecDeque<(String, String)>>>,
    confirms: HashMap<String, bool>,
    /// message -> choice display name to select.
    selections: HashMap<String, String>,
    /// message -> choice display names to toggle on.
    toggles: HashMap<String, Vec<String>>,
    keypresses: HashMap<String, char>,
    paths: HashMap<String, String>,
    /// Prompts that simulate a keyboard interrupt.
    aborts: HashSet<String>,
    committed: RefCell<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a text response; call repeatedly to script successive
    /// attempts of the same prompt.
    pub fn with_text(self, message: &str, response: &str) -> Self {
        self.text
            .borrow_mut()
            .entry(message.to_string())
            .or_default()
            .push_back(response.to_string());
        self
    }

    pub fn with_secret(self, message: &str, response: &str) -> Self {
        self.with_secret_attempt(message, response, response)
    }

    /// Queues one secret attempt with its confirming re-entry; a mismatching
    /// pair walks the prompt through one confirmation failure.
    pub fn with_secret_attempt(
        self,
        message: &str,
        entry: &str,
        confirmation: &str,
    ) -> Self {
        self.secrets
            .borrow_mut()
            .entry(message.to_string())
            .or_default()
            .push_back((entry.to_string(), confirmation.to_string()));
        self
    }

    pub fn with_confirm(mut self, message: &str, response: bool) -> Self {
        self.confirms.insert(message.to_string(), response);
        self
    }

    pub fn with_selection(mut self, message: &str, choice_name: &str) -> Self {
        self.selections.insert(message.to_string(), choice_name.to_string());
        self
    }

    pub fn with_toggled(
        mut self,
        message: &str,
        choice_names: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        self.toggles.insert(
            message.to_string(),
            choice_names.into_iter().map(str::to_string).collect(),
        );
        self
    }

    pub fn with_keypress(mut self, message: &str, key: char) -> Self {
        self.keypresses.insert(message.to_string(), key);
        self
    }

    pub fn with_path(mut self, message: &str, response: &str) -> Self {
        self.paths.insert(message.to_string(), response.to_string());
        self
    }

    /// Simulates a keyboard interrupt at the given prompt.
    pub fn with_abort(mut self, message: &str) -> Self {
        self.aborts.insert(message.to_string());
        self
    }

    /// (message, transformed display) pairs echoed after commits.
    pub fn committed(&self) -> Vec<(String, String)> {
        self.committed.borrow().clone()
    }

    fn check_abort(&self, message: &str) -> Result<()> {
        if self.aborts.contains(message) {
            log::debug!("scripted interrupt at '{message}'");
            return Err(Error::Aborted);
        }
        Ok(())
    }
}

impl TextPrompter for ScriptedBackend {
    fn prompt_text(&self, config: &TextConfig) -> Result<String> {
        self.check_abort(config.message)?;
        let scripted = self
            .text
            .borrow_mut()
            .get_mut(config.message)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(response) => Ok(response),
            None => config.default.map(str::to_string).ok_or_else(|| {
                Error::ConfigError(format!(
                    "no scripted text response for '{}'",
                    config.message
                ))
            }),
        }
    }
}

impl SecretPrompter for ScriptedBackend {
    /// Without confirmation the first attempt's entry commits. With
    /// confirmation, mismatching attempts are consumed one by one the way an
    /// interactive prompt re-asks; running out of attempts after a mismatch
    /// surfaces the configured mismatch message.
    fn prompt_secret(&self, config: &SecretConfig) -> Result<String> {
        self.check_abort(config.message)?;
        let mut secrets = self.secrets.borrow_mut();
        let attempts = match secrets.get_mut(config.message) {
            Some(queue) => queue,
            None => {
                return Err(Error::ConfigError(format!(
                    "no scripted secret response for '{}'",
                    config.message
                )))
            }
        };
        let mut mismatched = false;
        loop {
            match attempts.pop_front() {
                Some((entry, confirmation)) => {
                    if !config.confirm || entry == confirmation {
                        return Ok(entry);
                    }
                    mismatched = true;
                    log::debug!(
                        "secret confirmation mismatch at '{}'",
                        config.message
                    );
                }
                None if mismatched => {
                    return Err(Error::ConfigError(format!(
                        "'{}': {}",
                        config.message, config.mismatch_message
                    )));
                }
                None => {
                    return Err(Error::ConfigError(format!(
                        "no scripted secret response for '{}'",
                        config.message
                    )));
                }
            }
        }
    }
}

impl ConfirmPrompter for ScriptedBackend {
    fn prompt_confirm(&self, config: &ConfirmConfig) -> Result<bool> {
        self.check_abort(config.message)?;
        Ok(self.confirms.get(config.message).copied().unwrap_or(config.default))
    }
}

impl SelectPrompter for ScriptedBackend {
    fn prompt_select(&self, config: &SelectConfig) -> Result<usize> {
        self.check_abort(config.message)?;
        if let Some(name) = self.selections.get(config.message) {
            return config
                .list
                .entries()
                .iter()
                .position(|entry| {
                    entry.is_selectable()
                        && entry.as_choice().is_some_and(|c| &c.name == name)
                })
                .ok_or_else(|| {
                    Error::ConfigError(format!(
                        "scripted selection '{name}' not offered by '{}'",
                        config.message
                    ))
                });
        }
        config.default_index.or_else(|| config.list.first_selectable()).ok_or_else(
            || Error::ConfigError(format!("nothing to select for '{}'", config.message)),
        )
    }
}

impl MultiSelectPrompter for ScriptedBackend {
    fn prompt_multi_select(&self, config: &MultiSelectConfig) -> Result<Vec<usize>> {
        self.check_abort(config.message)?;
        match self.toggles.get(config.message) {
            Some(names) => {
                let mut picked = Vec::new();
                for name in names {
                    let index = config
                        .list
                        .entries()
                        .iter()
                        .position(|entry| {
                            entry.is_selectable()
                                && entry.as_choice().is_some_and(|c| &c.name == name)
                        })
                        .ok_or_else(|| {
                            Error::ConfigError(format!(
                                "scripted toggle '{name}' not offered by '{}'",
                                config.message
                            ))
                        })?;
                    picked.push(index);
                }
                Ok(picked)
            }
            None => Ok(config.list.checked_indices()),
        }
    }
}

impl ExpandPrompter for ScriptedBackend {
    fn prompt_expand(&self, config: &ExpandConfig) -> Result<char> {
        self.check_abort(config.message)?;
        self.keypresses
            .get(config.message)
            .copied()
            .or(config.default_key)
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "no scripted keypress for '{}'",
                    config.message
                ))
            })
    }
}

impl PathPrompter for ScriptedBackend {
    fn prompt_path(
        &self,
        config: &PathConfig,
        _completer: &dyn CompletionProvider,
    ) -> Result<String> {
        self.check_abort(config.message)?;
        match self.paths.get(config.message) {
            Some(response) => Ok(response.clone()),
            None => config.default.map(str::to_string).ok_or_else(|| {
                Error::ConfigError(format!(
                    "no scripted path response for '{}'",
                    config.message
                ))
            }),
        }
    }
}

impl PromptBackend for ScriptedBackend {
    fn render_committed(&self, message: &str, display: &str) {
        self.committed
            .borrow_mut()
            .push((message.to_string(), display.to_string()));
    }
}
