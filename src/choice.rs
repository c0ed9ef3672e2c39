//! Choice normalization and cursor navigation for list-family prompts.
//!
//! Callers declare choices in several shapes (plain values, labeled pairs,
//! disabled entries, separators). A normalization step turns them into one
//! uniform [`Entry`] sequence before any prompt logic runs, and
//! [`ChoiceList`] owns the focused-cursor model on top of it: movement skips
//! separators and disabled entries, wrap-around is policy-configurable and
//! symmetric, rawlist numbering is 1-based over non-separator entries and
//! expand entries are bound to single key characters.

use crate::constants::symbols;
use serde::Deserialize;
use serde_json::Value;

/// Declarative form of one list entry, as written by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChoiceSpec {
    /// Non-selectable visual divider: `{"separator": "-- fruits --"}`.
    Separator { separator: String },
    /// Labeled pair: display name, underlying value, optional disabled
    /// reason, expand key and initial checkbox state.
    Labeled {
        name: String,
        value: Value,
        #[serde(default)]
        disabled: Option<String>,
        #[serde(default)]
        key: Option<char>,
        #[serde(default)]
        checked: bool,
    },
    /// Plain value; the display name is its string form.
    Plain(Value),
}

impl ChoiceSpec {
    pub fn separator() -> Self {
        ChoiceSpec::Separator { separator: symbols::SEPARATOR_LINE.to_string() }
    }

    pub fn separator_with(line: impl Into<String>) -> Self {
        ChoiceSpec::Separator { separator: line.into() }
    }

    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        ChoiceSpec::Labeled {
            name: name.into(),
            value: value.into(),
            disabled: None,
            key: None,
            checked: false,
        }
    }

    pub fn disabled(
        name: impl Into<String>,
        value: impl Into<Value>,
        reason: impl Into<String>,
    ) -> Self {
        ChoiceSpec::Labeled {
            name: name.into(),
            value: value.into(),
            disabled: Some(reason.into()),
            key: None,
            checked: false,
        }
    }

    /// Binds an expand key to the entry.
    pub fn keyed(self, key: char) -> Self {
        match self {
            ChoiceSpec::Labeled { name, value, disabled, checked, .. } => {
                ChoiceSpec::Labeled { name, value, disabled, key: Some(key), checked }
            }
            other => other,
        }
    }

    /// Marks the entry as toggled on when a checkbox prompt opens.
    pub fn checked(self) -> Self {
        match self {
            ChoiceSpec::Labeled { name, value, disabled, key, .. } => {
                ChoiceSpec::Labeled { name, value, disabled, key, checked: true }
            }
            other => other,
        }
    }
}

impl From<&str> for ChoiceSpec {
    fn from(value: &str) -> Self {
        ChoiceSpec::Plain(Value::String(value.to_string()))
    }
}

impl From<String> for ChoiceSpec {
    fn from(value: String) -> Self {
        ChoiceSpec::Plain(Value::String(value))
    }
}

impl From<Value> for ChoiceSpec {
    fn from(value: Value) -> Self {
        ChoiceSpec::Plain(value)
    }
}

/// Normalized selectable unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub name: String,
    pub value: Value,
    pub disabled: Option<String>,
    pub key: Option<char>,
    pub checked: bool,
}

/// One normalized list entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Choice(Choice),
    Separator(String),
}

impl Entry {
    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Entry::Choice(choice) => Some(choice),
            Entry::Separator(_) => None,
        }
    }

    /// Separators and disabled choices can never receive focus.
    pub fn is_selectable(&self) -> bool {
        matches!(self, Entry::Choice(choice) if choice.disabled.is_none())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Uniform list structure with selection state for list, checkbox, rawlist
/// and expand prompts.
#[derive(Debug, Clone)]
pub struct ChoiceList {
    entries: Vec<Entry>,
    wrap: bool,
}

impl ChoiceList {
    /// Normalizes heterogeneous choice declarations into a uniform entry
    /// sequence. Plain string values display as themselves; other plain
    /// values display as their JSON form.
    pub fn normalize(specs: &[ChoiceSpec], wrap: bool) -> Self {
        let entries = specs
            .iter()
            .map(|spec| match spec {
                ChoiceSpec::Separator { separator } => {
                    Entry::Separator(separator.clone())
                }
                ChoiceSpec::Labeled { name, value, disabled, key, checked } => {
                    Entry::Choice(Choice {
                        name: name.clone(),
                        value: value.clone(),
                        disabled: disabled.clone(),
                        key: *key,
                        checked: *checked,
                    })
                }
                ChoiceSpec::Plain(value) => {
                    let name = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    Entry::Choice(Choice {
                        name,
                        value: value.clone(),
                        disabled: None,
                        key: None,
                        checked: false,
                    })
                }
            })
            .collect();
        Self { entries, wrap }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    pub fn choice_at(&self, index: usize) -> Option<&Choice> {
        self.entries.get(index).and_then(Entry::as_choice)
    }

    pub fn is_selectable(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(Entry::is_selectable)
    }

    pub fn selectable_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_selectable())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn first_selectable(&self) -> Option<usize> {
        self.entries.iter().position(Entry::is_selectable)
    }

    /// Entry index the cursor should start on for the given default value.
    /// Matches by underlying value first, then by display name for string
    /// defaults; falls back to the first selectable entry.
    pub fn default_index(&self, default: &Value) -> Option<usize> {
        if !default.is_null() {
            let by_value = self.entries.iter().position(|entry| {
                entry.is_selectable()
                    && entry.as_choice().is_some_and(|c| &c.value == default)
            });
            if by_value.is_some() {
                return by_value;
            }
            if let Some(name) = default.as_str() {
                let by_name = self.entries.iter().position(|entry| {
                    entry.is_selectable()
                        && entry.as_choice().is_some_and(|c| c.name == name)
                });
                if by_name.is_some() {
                    return by_name;
                }
            }
        }
        self.first_selectable()
    }

    /// Moves the cursor one selectable step from `from`. Separators and
    /// disabled entries are skipped. At a list end the cursor wraps to the
    /// other end when the wrap policy is on, otherwise it stays put; both
    /// directions behave symmetrically.
    pub fn step(&self, from: usize, direction: Direction) -> usize {
        let selectable = self.selectable_indices();
        let (first, last) = match (selectable.first(), selectable.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return from,
        };
        match direction {
            Direction::Forward => selectable
                .iter()
                .copied()
                .find(|&index| index > from)
                .unwrap_or(if self.wrap { first } else { from.min(last).max(first) }),
            Direction::Backward => selectable
                .iter()
                .rev()
                .copied()
                .find(|&index| index < from)
                .unwrap_or(if self.wrap { last } else { from.max(first).min(last) }),
        }
    }

    /// 1-based rawlist numbering over non-separator entries, paired with the
    /// entry index each number displays at.
    pub fn numbered(&self) -> Vec<(usize, usize)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.as_choice().is_some())
            .enumerate()
            .map(|(ordinal, (index, _))| (ordinal + 1, index))
            .collect()
    }

    /// Entry index for a typed rawlist number. Numbers shown next to
    /// disabled entries do not jump.
    pub fn entry_for_number(&self, number: usize) -> Option<usize> {
        self.numbered()
            .into_iter()
            .find(|&(ordinal, index)| ordinal == number && self.is_selectable(index))
            .map(|(_, index)| index)
    }

    /// Entry index bound to an expand key, either explicitly or derived.
    pub fn entry_for_key(&self, key: char) -> Option<usize> {
        self.entries.iter().position(|entry| {
            entry.is_selectable()
                && entry.as_choice().and_then(|c| self.key_of(c)) == Some(key)
        })
    }

    fn key_of(&self, choice: &Choice) -> Option<char> {
        choice.key.or_else(|| {
            choice.name.chars().next().map(|c| c.to_ascii_lowercase())
        })
    }

    /// (key, entry index) bindings for the expand help view, in entry order.
    pub fn key_bindings(&self) -> Vec<(char, usize)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_selectable())
            .filter_map(|(index, entry)| {
                entry.as_choice().and_then(|c| self.key_of(c)).map(|k| (k, index))
            })
            .collect()
    }

    /// Checks that every selectable entry carries a usable, unique expand
    /// key that does not collide with the reserved help key.
    pub fn check_expand_keys(&self, help_key: char) -> Result<(), String> {
        let mut seen = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.is_selectable() {
                continue;
            }
            let choice = match entry.as_choice() {
                Some(choice) => choice,
                None => continue,
            };
            let key = match self.key_of(choice) {
                Some(key) => key,
                None => return Err(format!("entry {index} has no usable key")),
            };
            if key == help_key {
                return Err(format!(
                    "entry '{}' is bound to the reserved help key '{help_key}'",
                    choice.name
                ));
            }
            if seen.contains(&key) {
                return Err(format!("duplicate expand key '{key}'"));
            }
            seen.push(key);
        }
        Ok(())
    }

    /// Ordered values of the toggled entries. Indices pointing at separators
    /// or disabled entries are ignored; zero toggles yield an empty vector.
    pub fn toggled_values(&self, toggled: &[usize]) -> Vec<Value> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, entry)| entry.is_selectable() && toggled.contains(index))
            .filter_map(|(_, entry)| entry.as_choice().map(|c| c.value.clone()))
            .collect()
    }

    /// Entry indices toggled on when a checkbox prompt opens.
    pub fn checked_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry.is_selectable()
                    && entry.as_choice().is_some_and(|c| c.checked)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Marks entries whose value appears in `defaults` as initially checked.
    pub fn apply_checked_defaults(&mut self, defaults: &[Value]) {
        for entry in &mut self.entries {
            if let Entry::Choice(choice) = entry {
                if choice.disabled.is_none() && defaults.contains(&choice.value) {
                    choice.checked = true;
                }
            }
        }
    }
}
