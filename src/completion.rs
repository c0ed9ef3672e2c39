//! Filesystem completion for filepath prompts.

use crate::error::Result;
use std::path::PathBuf;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text that replaces the basename component of the buffer.
    pub text: String,
    /// How the candidate is listed; directories carry a trailing slash.
    pub display: String,
}

/// Source of completion candidates for a text-style prompt.
///
/// `cursor` is a byte offset into `buffer`; only text before it is
/// considered. A provider error degrades to "no completions" at the call
/// site; it never fails the prompt.
pub trait CompletionProvider {
    fn suggest(&self, buffer: &str, cursor: usize) -> Result<Vec<Suggestion>>;
}

/// Completes paths from the directory component of the buffer content.
///
/// `~` resolves to the home directory, candidates are the entries of the
/// resolved parent directory whose names start with the typed basename, and
/// nothing outside that directory is ever offered.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCompleter {
    only_directories: bool,
}

impl PathCompleter {
    pub fn new(only_directories: bool) -> Self {
        Self { only_directories }
    }

    /// Splits the typed text into the directory to list and the basename
    /// prefix to match, with `~` already expanded.
    fn split(typed: &str) -> (PathBuf, String) {
        let expanded = expand_home(typed);
        match expanded.rfind('/') {
            Some(pos) => {
                (PathBuf::from(&expanded[..=pos]), expanded[pos + 1..].to_string())
            }
            None if typed.starts_with('~') => (PathBuf::from(expanded), String::new()),
            None => (PathBuf::from("."), expanded),
        }
    }
}

fn expand_home(typed: &str) -> String {
    if let Some(rest) = typed.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return format!("{}{}", home.display(), rest);
            }
        }
    }
    typed.to_string()
}

impl CompletionProvider for PathCompleter {
    fn suggest(&self, buffer: &str, cursor: usize) -> Result<Vec<Suggestion>> {
        // The cursor is a byte offset; one landing inside a multibyte
        // character clamps back to the previous boundary.
        let mut end = cursor.min(buffer.len());
        while !buffer.is_char_boundary(end) {
            end -= 1;
        }
        let typed = &buffer[..end];
        let (dir, prefix) = Self::split(typed);

        let mut suggestions = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(&prefix) {
                continue;
            }
            let is_dir = entry.file_type()?.is_dir();
            if self.only_directories && !is_dir {
                continue;
            }
            let display = if is_dir { format!("{name}/") } else { name.clone() };
            suggestions.push(Suggestion { text: name, display });
        }
        suggestions.sort_by(|a, b| a.text.cmp(&b.text));
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        for sub in ["dir1", "dir2", "dir3", ".dir"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
        }
        for file in ["file1", "file2", "file3", ".file"] {
            fs::write(dir.path().join(file), b"").unwrap();
        }
        dir
    }

    fn texts(completer: &PathCompleter, buffer: &str) -> Vec<String> {
        completer
            .suggest(buffer, buffer.len())
            .unwrap()
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn trailing_slash_lists_everything_in_the_directory() {
        let dir = fixture();
        let buffer = format!("{}/", dir.path().display());
        let mut got = texts(&PathCompleter::new(false), &buffer);
        got.sort();
        assert_eq!(
            got,
            vec![".dir", ".file", "dir1", "dir2", "dir3", "file1", "file2", "file3"]
        );
    }

    #[test]
    fn basename_prefix_filters_candidates() {
        let dir = fixture();
        let buffer = format!("{}/file", dir.path().display());
        assert_eq!(
            texts(&PathCompleter::new(false), &buffer),
            vec!["file1", "file2", "file3"]
        );
    }

    #[test]
    fn dot_prefix_lists_hidden_entries() {
        let dir = fixture();
        let buffer = format!("{}/.", dir.path().display());
        assert_eq!(texts(&PathCompleter::new(false), &buffer), vec![".dir", ".file"]);
    }

    #[test]
    fn only_directories_excludes_files() {
        let dir = fixture();
        let buffer = format!("{}/", dir.path().display());
        let mut got = texts(&PathCompleter::new(true), &buffer);
        got.sort();
        assert_eq!(got, vec![".dir", "dir1", "dir2", "dir3"]);
    }

    #[test]
    fn directories_display_with_trailing_slash() {
        let dir = fixture();
        let buffer = format!("{}/dir1", dir.path().display());
        let suggestions =
            PathCompleter::new(false).suggest(&buffer, buffer.len()).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].text, "dir1");
        assert_eq!(suggestions[0].display, "dir1/");
    }

    #[test]
    fn tilde_expands_to_home() {
        if dirs::home_dir().is_none() {
            return;
        }
        let suggestions = PathCompleter::new(false).suggest("~/", 2);
        // Home directories exist on every supported platform; listing one
        // must not error.
        assert!(suggestions.is_ok());
    }

    #[test]
    fn unreadable_directory_is_an_error_for_the_caller_to_degrade() {
        let result = PathCompleter::new(false).suggest("/definitely/not/here/", 21);
        assert!(result.is_err());
    }

    #[test]
    fn mid_character_cursor_clamps_to_the_previous_boundary() {
        let dir = TempDir::new().unwrap();
        for file in ["caf\u{e9}1", "caf\u{e9}2"] {
            fs::write(dir.path().join(file), b"").unwrap();
        }
        let buffer = format!("{}/caf\u{e9}", dir.path().display());
        // One byte into the two-byte final character.
        let cursor = buffer.len() - 1;
        let suggestions =
            PathCompleter::new(false).suggest(&buffer, cursor).unwrap();
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn completion_only_considers_text_before_the_cursor() {
        let dir = fixture();
        let buffer = format!("{}/fileXYZ", dir.path().display());
        let cursor = buffer.len() - 3;
        let suggestions =
            PathCompleter::new(false).suggest(&buffer, cursor).unwrap();
        assert_eq!(suggestions.len(), 3);
    }
}
