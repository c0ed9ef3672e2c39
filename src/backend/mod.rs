//! Terminal backend seam for prompt execution.
//!
//! The prompt engine never talks to a terminal library directly; it goes
//! through these interfaces. Each method blocks for one committed value.
//! Select-style methods receive the normalized choice list and must return
//! entry indices of selectable entries; the engine re-validates what comes
//! back. A backend signals a user interrupt by returning
//! [`Error::Aborted`](crate::error::Error::Aborted).

use crate::choice::ChoiceList;
use crate::completion::CompletionProvider;
use crate::error::Result;
use crate::style::PromptConfig;

pub mod dialoguer;
pub mod scripted;

pub use self::dialoguer::DialoguerBackend;
pub use self::scripted::ScriptedBackend;

/// Configuration for single-line and multiline text input.
#[derive(Debug)]
pub struct TextConfig<'a> {
    pub message: &'a str,
    pub default: Option<&'a str>,
    pub multiline: bool,
    /// Validation message from the previous attempt, shown beneath the
    /// prompt while re-editing.
    pub error: Option<&'a str>,
    pub config: &'a PromptConfig,
}

/// Configuration for password input. Never echoed, no completion, no
/// history.
#[derive(Debug)]
pub struct SecretConfig<'a> {
    pub message: &'a str,
    pub confirm: bool,
    pub mismatch_message: &'a str,
    pub error: Option<&'a str>,
    pub config: &'a PromptConfig,
}

/// Configuration for binary yes/no confirmation. Bare Enter commits the
/// default.
#[derive(Debug)]
pub struct ConfirmConfig<'a> {
    pub message: &'a str,
    pub default: bool,
    pub config: &'a PromptConfig,
}

/// Configuration for single-select list prompts.
#[derive(Debug)]
pub struct SelectConfig<'a> {
    pub message: &'a str,
    pub list: &'a ChoiceList,
    /// Entry index the cursor starts on; always selectable.
    pub default_index: Option<usize>,
    /// Rawlist: prefix entries with their 1-based number and let a typed
    /// number jump to the matching entry.
    pub numbered: bool,
    pub instruction: Option<&'a str>,
    pub config: &'a PromptConfig,
}

/// Configuration for multi-select checkbox prompts. Initial toggles come
/// from the list's checked flags.
#[derive(Debug)]
pub struct MultiSelectConfig<'a> {
    pub message: &'a str,
    pub list: &'a ChoiceList,
    pub instruction: Option<&'a str>,
    pub config: &'a PromptConfig,
}

/// Configuration for expand prompts: every choice is bound to a single key,
/// the help key lists all bindings.
#[derive(Debug)]
pub struct ExpandConfig<'a> {
    pub message: &'a str,
    pub list: &'a ChoiceList,
    /// Key committed on bare Enter, when the question has a default.
    pub default_key: Option<char>,
    pub instruction: Option<&'a str>,
    pub config: &'a PromptConfig,
}

/// Configuration for path input backed by a completion provider.
#[derive(Debug)]
pub struct PathConfig<'a> {
    pub message: &'a str,
    pub default: Option<&'a str>,
    pub error: Option<&'a str>,
    pub config: &'a PromptConfig,
}

pub trait TextPrompter {
    fn prompt_text(&self, config: &TextConfig) -> Result<String>;
}

pub trait SecretPrompter {
    fn prompt_secret(&self, config: &SecretConfig) -> Result<String>;
}

pub trait ConfirmPrompter {
    fn prompt_confirm(&self, config: &ConfirmConfig) -> Result<bool>;
}

pub trait SelectPrompter {
    fn prompt_select(&self, config: &SelectConfig) -> Result<usize>;
}

pub trait MultiSelectPrompter {
    fn prompt_multi_select(&self, config: &MultiSelectConfig) -> Result<Vec<usize>>;
}

pub trait ExpandPrompter {
    fn prompt_expand(&self, config: &ExpandConfig) -> Result<char>;
}

pub trait PathPrompter {
    fn prompt_path(
        &self,
        config: &PathConfig,
        completer: &dyn CompletionProvider,
    ) -> Result<String>;
}

/// Combined interface the session executes prompts against.
pub trait PromptBackend:
    TextPrompter
    + SecretPrompter
    + ConfirmPrompter
    + SelectPrompter
    + MultiSelectPrompter
    + ExpandPrompter
    + PathPrompter
{
    /// Echoes the transformed answer next to the question after commit.
    fn render_committed(&self, _message: &str, _display: &str) {}
}
