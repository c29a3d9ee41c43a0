//! Error types and error handling

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = DryCrudError> = std::result::Result<T, E>;

/// Crate error type
#[derive(Debug, Error)]
pub enum DryCrudError {
    /// An attribute or format name the model does not respond to
    #[error("Unknown attribute '{attribute}' for {model}")]
    UnknownAttribute {
        /// Singular model name
        model: String,
        /// Requested attribute
        attribute: String,
    },

    /// Reading a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A translation file could not be parsed
    #[error("Invalid translation file {path}: {message}")]
    TranslationParse {
        /// File that failed to parse
        path: String,
        /// Parser message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for DryCrudError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl DryCrudError {
    /// Build an [`DryCrudError::UnknownAttribute`]
    #[must_use]
    pub fn unknown_attribute(model: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            model: model.into(),
            attribute: attribute.into(),
        }
    }
}
