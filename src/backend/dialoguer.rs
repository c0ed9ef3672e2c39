//! Dialoguer-based terminal backend.
//!
//! Concrete implementation of the backend interfaces using the dialoguer
//! library. Multiline input delegates to an external editor, rawlist
//! numbering rides on the fuzzy matcher (typing a number narrows to the
//! matching entry) and path completion adapts the crate's completion
//! provider to dialoguer's single-candidate contract.

use super::{
    ConfirmConfig, ConfirmPrompter, ExpandConfig, ExpandPrompter, MultiSelectConfig,
    MultiSelectPrompter, PathConfig, PathPrompter, PromptBackend, SecretConfig,
    SecretPrompter, SelectConfig, SelectPrompter, TextConfig, TextPrompter,
};
use crate::completion::CompletionProvider;
use crate::constants::messages;
use crate::error::{Error, Result};
use crate::style::{KeyBindings, PromptConfig};
use dialoguer::{Editor, FuzzySelect, Input, MultiSelect, Password, Select};

pub struct DialoguerBackend;

impl DialoguerBackend {
    pub fn new() -> Self {
        Self
    }

    fn decorate(config: &PromptConfig, message: &str) -> String {
        format!("{} {}", config.style.qmark, message)
    }

    fn show_error(config: &PromptConfig, error: Option<&str>) {
        if let Some(error) = error {
            eprintln!("{} {}", config.style.error_prefix, error);
        }
    }

    /// Display rows for the selectable entries only, paired with the entry
    /// index each row maps back to. Separators cannot receive focus in
    /// dialoguer, so they are folded away at this boundary.
    fn selectable_rows(config: &SelectConfig) -> (Vec<String>, Vec<usize>) {
        let numbers = config.list.numbered();
        let mut labels = Vec::new();
        let mut indices = Vec::new();
        for (index, entry) in config.list.entries().iter().enumerate() {
            if !entry.is_selectable() {
                continue;
            }
            let choice = match entry.as_choice() {
                Some(choice) => choice,
                None => continue,
            };
            let label = if config.numbered {
                let number = numbers
                    .iter()
                    .find(|&&(_, at)| at == index)
                    .map(|&(n, _)| n)
                    .unwrap_or(0);
                format!("{number}) {}", choice.name)
            } else {
                choice.name.clone()
            };
            labels.push(label);
            indices.push(index);
        }
        (labels, indices)
    }
}

impl Default for DialoguerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPrompter for DialoguerBackend {
    fn prompt_text(&self, config: &TextConfig) -> Result<String> {
        Self::show_error(config.config, config.error);
        if config.multiline {
            let seed = config.default.unwrap_or("");
            let edited = Editor::new().edit(seed)?;
            return Ok(edited.unwrap_or_else(|| seed.to_string()));
        }
        let mut input = Input::<String>::new()
            .with_prompt(Self::decorate(config.config, config.message));
        if let Some(default) = config.default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}

impl SecretPrompter for DialoguerBackend {
    fn prompt_secret(&self, config: &SecretConfig) -> Result<String> {
        Self::show_error(config.config, config.error);
        let prompt = Self::decorate(config.config, config.message);
        let mut password = Password::new().with_prompt(prompt.clone());
        if config.confirm {
            password = password.with_confirmation(
                format!("{prompt} (confirm)"),
                config.mismatch_message.to_string(),
            );
        }
        Ok(password.interact()?)
    }
}

impl DialoguerBackend {
    /// Maps one typed confirm response to an outcome: bare Enter commits the
    /// default, the bound keys commit their value, anything else re-asks.
    fn parse_confirm(keys: &KeyBindings, typed: &str, default: bool) -> Option<bool> {
        match typed.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            None => Some(default),
            Some(key) if key == keys.confirm => Some(true),
            Some(key) if key == keys.deny => Some(false),
            Some(_) => None,
        }
    }
}

impl ConfirmPrompter for DialoguerBackend {
    fn prompt_confirm(&self, config: &ConfirmConfig) -> Result<bool> {
        let keys = config.config.keys;
        let prompt = format!(
            "{} [{}/{}]",
            Self::decorate(config.config, config.message),
            keys.confirm,
            keys.deny
        );
        loop {
            let typed = Input::<String>::new()
                .with_prompt(prompt.clone())
                .allow_empty(true)
                .interact_text()?;
            match Self::parse_confirm(&keys, &typed, config.default) {
                Some(answer) => return Ok(answer),
                None => eprintln!(
                    "{} press '{}' or '{}'",
                    config.config.style.error_prefix, keys.confirm, keys.deny
                ),
            }
        }
    }
}

impl SelectPrompter for DialoguerBackend {
    fn prompt_select(&self, config: &SelectConfig) -> Result<usize> {
        let (labels, indices) = Self::selectable_rows(config);
        if labels.is_empty() {
            return Err(Error::ConfigError("select prompt with no rows".to_string()));
        }
        let default_row = config
            .default_index
            .and_then(|entry| indices.iter().position(|&at| at == entry))
            .unwrap_or(0);
        let prompt = Self::decorate(config.config, config.message);

        let row = if config.numbered {
            FuzzySelect::new()
                .with_prompt(prompt)
                .items(&labels)
                .default(default_row)
                .interact()?
        } else {
            Select::new()
                .with_prompt(prompt)
                .items(&labels)
                .default(default_row)
                .interact()?
        };
        Ok(indices[row])
    }
}

impl MultiSelectPrompter for DialoguerBackend {
    fn prompt_multi_select(&self, config: &MultiSelectConfig) -> Result<Vec<usize>> {
        let rows: Vec<(usize, String, bool)> = config
            .list
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_selectable())
            .filter_map(|(index, entry)| {
                entry
                    .as_choice()
                    .map(|choice| (index, choice.name.clone(), choice.checked))
            })
            .collect();
        let labels: Vec<&String> = rows.iter().map(|(_, label, _)| label).collect();
        let defaults: Vec<bool> = rows.iter().map(|(_, _, checked)| *checked).collect();

        let picked = MultiSelect::new()
            .with_prompt(Self::decorate(config.config, config.message))
            .items(&labels)
            .defaults(&defaults)
            .interact()?;
        Ok(picked.into_iter().map(|row| rows[row].0).collect())
    }
}

impl DialoguerBackend {
    /// Prompt line for the expand menu: bound keys plus the help key, then
    /// the question's instruction (a built-in hint when none is configured).
    fn expand_prompt_line(config: &ExpandConfig) -> String {
        let help = config.config.keys.help;
        let summary: String = config
            .list
            .key_bindings()
            .iter()
            .map(|&(key, _)| key)
            .chain([help])
            .collect();
        let instruction = config.instruction.unwrap_or(messages::EXPAND_INSTRUCTION);
        format!(
            "{} ({summary}) {instruction}",
            Self::decorate(config.config, config.message)
        )
    }
}

impl ExpandPrompter for DialoguerBackend {
    fn prompt_expand(&self, config: &ExpandConfig) -> Result<char> {
        let bindings = config.list.key_bindings();
        let help = config.config.keys.help;
        let prompt = Self::expand_prompt_line(config);

        loop {
            let typed = Input::<String>::new()
                .with_prompt(prompt.clone())
                .allow_empty(config.default_key.is_some())
                .interact_text()?;
            let key = match typed.chars().next() {
                Some(key) => key.to_ascii_lowercase(),
                None => match config.default_key {
                    Some(default) => return Ok(default),
                    None => continue,
                },
            };
            if key == help {
                for (bound, index) in &bindings {
                    if let Some(choice) = config.list.choice_at(*index) {
                        println!("  {bound}) {}", choice.name);
                    }
                }
                continue;
            }
            if bindings.iter().any(|&(bound, _)| bound == key) {
                return Ok(key);
            }
            eprintln!(
                "{} no binding for '{key}'",
                config.config.style.error_prefix
            );
        }
    }
}

/// Adapts a completion provider to dialoguer's single-candidate completion:
/// the common prefix of all candidates when it extends the typed basename,
/// the sole candidate otherwise.
struct CompletionAdapter<'a> {
    provider: &'a dyn CompletionProvider,
}

impl dialoguer::Completion for CompletionAdapter<'_> {
    fn get(&self, input: &str) -> Option<String> {
        let suggestions = match self.provider.suggest(input, input.len()) {
            Ok(suggestions) => suggestions,
            Err(err) => {
                log::warn!("completion provider failed, degrading: {err}");
                return None;
            }
        };
        if suggestions.is_empty() {
            return None;
        }
        let stem_len = input.rfind('/').map(|pos| pos + 1).unwrap_or(0);
        let prefix = &input[stem_len..];
        let mut common = suggestions[0].text.clone();
        for suggestion in &suggestions[1..] {
            // Byte length of the shared prefix; truncate cuts at byte
            // offsets, so counting chars would split multibyte names.
            let shared = common
                .chars()
                .zip(suggestion.text.chars())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a.len_utf8())
                .sum();
            common.truncate(shared);
        }
        if common.len() > prefix.len() {
            Some(format!("{}{common}", &input[..stem_len]))
        } else {
            None
        }
    }
}

impl PathPrompter for DialoguerBackend {
    fn prompt_path(
        &self,
        config: &PathConfig,
        completer: &dyn CompletionProvider,
    ) -> Result<String> {
        Self::show_error(config.config, config.error);
        let adapter = CompletionAdapter { provider: completer };
        let mut input = Input::<String>::new()
            .with_prompt(Self::decorate(config.config, config.message))
            .completion_with(&adapter);
        if let Some(default) = config.default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}

impl PromptBackend for DialoguerBackend {
    fn render_committed(&self, message: &str, display: &str) {
        println!("{message} {display}");
    }
}
