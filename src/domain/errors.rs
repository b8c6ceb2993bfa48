//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types:
//! parser and I/O failures are converted at the boundary where they occur.

use thiserror::Error;

/// Main jsonymize error type
///
/// This is the primary error type used throughout the application.
/// Resolution misses (an override naming a generator that doesn't exist, a
/// value matching no type tag) are deliberately *not* represented here: they
/// resolve silently by leaving the value unchanged.
#[derive(Debug, Error)]
pub enum JsonymizeError {
    /// Configuration-related errors (missing file, bad TOML, bad extension)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The streaming parser could not tokenize the input.
    ///
    /// Carries the raw trailing fragment of input consumed before the
    /// failure, so callers can report what text failed to parse.
    #[error("Parse error near {fragment:?}: {message}")]
    Parse { fragment: String, message: String },

    /// A generator was invoked with parameters it cannot satisfy
    #[error("Generator error: {0}")]
    Generator(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl JsonymizeError {
    /// The raw input fragment associated with a parse failure, if any
    pub fn fragment(&self) -> Option<&str> {
        match self {
            JsonymizeError::Parse { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for JsonymizeError {
    fn from(err: std::io::Error) -> Self {
        JsonymizeError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for JsonymizeError {
    fn from(err: toml::de::Error) -> Self {
        JsonymizeError::Configuration(format!("TOML parse error: {err}"))
    }
}
