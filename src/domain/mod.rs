//! Domain types for jsonymize.
//!
//! The domain layer provides the error hierarchy ([`JsonymizeError`]) and
//! the crate-wide [`Result`] alias. All fallible operations in the library
//! return [`Result<T, JsonymizeError>`]; resolution ambiguity inside the
//! replacement engine (no matching generator for a value) is *not* an error
//! and never appears here. It resolves by leaving the value unchanged.

pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::JsonymizeError;
pub use result::Result;
