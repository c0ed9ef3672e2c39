//! Prompt styling, key bindings and editing-mode resolution.
//!
//! Resolution is a shallow, key-by-key merge: built-in defaults, then global
//! session overrides, then per-question overrides, later layers winning. The
//! merged [`PromptConfig`] is immutable once a prompt is constructed.

use serde::Deserialize;

use crate::constants::{keys, symbols};
use crate::question::QuestionSpec;

/// Line-editing flavor of the underlying terminal session. Leaving it unset
/// defers to the backend's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Emacs,
    Vim,
}

/// Glyphs used when rendering a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub qmark: String,
    pub pointer: String,
    pub checked: String,
    pub unchecked: String,
    pub error_prefix: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            qmark: symbols::QMARK.to_string(),
            pointer: symbols::POINTER.to_string(),
            checked: symbols::CHECKED.to_string(),
            unchecked: symbols::UNCHECKED.to_string(),
            error_prefix: symbols::ERROR_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub qmark: Option<String>,
    pub pointer: Option<String>,
    pub checked: Option<String>,
    pub unchecked: Option<String>,
    pub error_prefix: Option<String>,
}

impl Style {
    /// Shallow merge: every key the override sets wins, the rest keep their
    /// current value.
    pub fn merged(&self, overrides: &StyleOverrides) -> Style {
        Style {
            qmark: overrides.qmark.clone().unwrap_or_else(|| self.qmark.clone()),
            pointer: overrides.pointer.clone().unwrap_or_else(|| self.pointer.clone()),
            checked: overrides.checked.clone().unwrap_or_else(|| self.checked.clone()),
            unchecked: overrides
                .unchecked
                .clone()
                .unwrap_or_else(|| self.unchecked.clone()),
            error_prefix: overrides
                .error_prefix
                .clone()
                .unwrap_or_else(|| self.error_prefix.clone()),
        }
    }
}

/// Key characters for single-keystroke interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub confirm: char,
    pub deny: char,
    pub help: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self { confirm: keys::CONFIRM, deny: keys::DENY, help: keys::HELP }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyOverrides {
    pub confirm: Option<char>,
    pub deny: Option<char>,
    pub help: Option<char>,
}

impl KeyBindings {
    pub fn merged(&self, overrides: &KeyOverrides) -> KeyBindings {
        KeyBindings {
            confirm: overrides.confirm.unwrap_or(self.confirm),
            deny: overrides.deny.unwrap_or(self.deny),
            help: overrides.help.unwrap_or(self.help),
        }
    }
}

/// Session-level configuration supplied by the caller.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub edit_mode: Option<EditMode>,
    pub style: StyleOverrides,
    pub keys: KeyOverrides,
    /// Cursor wrap-around policy for list-family prompts.
    pub wrap: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            edit_mode: None,
            style: StyleOverrides::default(),
            keys: KeyOverrides::default(),
            wrap: true,
        }
    }
}

/// Fully-resolved configuration consumed by a prompt at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub style: Style,
    pub keys: KeyBindings,
    pub edit_mode: Option<EditMode>,
    pub wrap: bool,
}

impl PromptConfig {
    /// defaults <- session overrides <- question overrides.
    pub fn resolve(options: &SessionOptions, question: &QuestionSpec) -> Self {
        let style = Style::default().merged(&options.style).merged(&question.style);
        let keys = KeyBindings::default().merged(&options.keys).merged(&question.keys);
        let edit_mode = question.edit_mode.or(options.edit_mode);
        Self { style, keys, edit_mode, wrap: options.wrap }
    }
}
