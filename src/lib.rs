//! enquiry: interactive command-line prompting.
//!
//! Questions are declared up front (in code or deserialized from a
//! document), then executed in order by a [`Session`]; later questions can
//! depend on earlier answers through templated fields, closures and `when`
//! gates. The terminal itself sits behind a backend seam, so the whole
//! engine also runs scripted for automation and tests.
//!
//! ```no_run
//! use enquiry::{prompt, QuestionSpec};
//!
//! let answers = prompt(vec![
//!     QuestionSpec::input("Enter your age:").named("age"),
//!     QuestionSpec::list("Would you like a drink:")
//!         .named("drink")
//!         .with_choices(["Wine", "Beer", "Soda"])
//!         .ask_if("age | int >= 18"),
//! ])?;
//! # Ok::<(), enquiry::Error>(())
//! ```

/// Ordered answer collection.
pub mod answers;

/// Terminal backend seam and its implementations.
pub mod backend;

/// Choice normalization and cursor navigation.
pub mod choice;

/// Filesystem completion for filepath prompts.
pub mod completion;

/// Default glyphs, keys and messages.
pub mod constants;

/// Custom error types.
pub mod error;

/// Validation, filtering and transformation callbacks.
pub mod pipeline;

/// Single-prompt execution.
pub mod prompt;

/// Declarative question specifications.
pub mod question;

/// Template rendering and expression evaluation.
pub mod render;

/// Session orchestration.
pub mod session;

/// Styling, key bindings and configuration merging.
pub mod style;

pub use answers::Answers;
pub use backend::{DialoguerBackend, PromptBackend, ScriptedBackend};
pub use choice::{Choice, ChoiceList, ChoiceSpec, Entry};
pub use completion::{CompletionProvider, PathCompleter, Suggestion};
pub use error::{Error, Result};
pub use pipeline::{Checked, Pipeline};
pub use prompt::{Prompt, PromptStatus};
pub use question::{Dynamic, Kind, QuestionSpec, When};
pub use render::{MiniJinjaRenderer, TemplateRenderer};
pub use session::{prompt, prompt_with_options, Session};
pub use style::{EditMode, KeyOverrides, SessionOptions, Style, StyleOverrides};
