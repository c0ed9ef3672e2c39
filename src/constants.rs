//! Constants used throughout enquiry.

/// Default prompt glyphs.
pub mod symbols {
    pub const QMARK: &str = "?";
    pub const POINTER: &str = "❯";
    pub const CHECKED: &str = "◉";
    pub const UNCHECKED: &str = "◯";
    pub const ERROR_PREFIX: &str = "»";
    pub const SEPARATOR_LINE: &str = "---------------";
}

/// Default key characters for single-keystroke prompts.
pub mod keys {
    pub const CONFIRM: char = 'y';
    pub const DENY: char = 'n';
    pub const HELP: char = 'h';
}

/// User-facing messages.
pub mod messages {
    pub const INVALID_INPUT: &str = "Invalid input";
    pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";
    pub const EXPAND_INSTRUCTION: &str = "press a bound key, h for help";
}
