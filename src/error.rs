use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to render. Original error: {0}")]
    TemplateError(#[from] minijinja::Error),

    /// Malformed prompt configuration (programmer error). Surfaces before or
    /// during prompt construction, never recovered.
    #[error("Invalid prompt configuration: {0}.")]
    ConfigError(String),

    #[error("Duplicate question name: '{name}'.")]
    DuplicateName { name: String },

    #[error("Question '{name}' has no selectable choices.")]
    NoSelectableChoices { name: String },

    /// The user interrupted the session. Answers collected so far are
    /// discarded.
    #[error("Prompt session aborted.")]
    Aborted,
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(err)
                if err.kind() == std::io::ErrorKind::Interrupted =>
            {
                Error::Aborted
            }
            dialoguer::Error::IO(err) => Error::IoError(err),
        }
    }
}
