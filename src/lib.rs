// jsonymize - Streaming JSON anonymizer
// Licensed under the MIT License

//! # jsonymize - Streaming JSON Anonymizer
//!
//! jsonymize replaces values at configured field names inside a JSON
//! document with synthetically generated substitutes (fake emails, names,
//! numbers, dates), preserving document structure. The document streams
//! through a push-style parse: each targeted node is replaced as its
//! subtree completes, without ever buffering the raw input text whole.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Classification, generator registry, replacement engine,
//!   stream driver
//! - [`config`] - TOML configuration loading and the override schema
//! - [`domain`] - Error types and the crate `Result` alias
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonymize::core::{Anonymizer, AnonymizerOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = AnonymizerOptions {
//!     fields: vec!["email".to_string()],
//!     ..Default::default()
//! };
//!
//! let anonymizer = Anonymizer::new(options);
//! let input = r#"{"email": "a@b.com", "id": 12}"#;
//! let document = anonymizer.anonymize(input.as_bytes())?;
//!
//! // `id` is untargeted and passes through unchanged
//! assert_eq!(document["id"], 12);
//! // `email` was replaced with a freshly generated address
//! assert_ne!(document["email"], "a@b.com");
//! # Ok(())
//! # }
//! ```
//!
//! ## Generator selection
//!
//! For each targeted field, the engine builds an ordered candidate list:
//! the configured override generator (if any) followed by the value's
//! classified type tags, most specific first. The first candidate that
//! resolves to a known generator wins; if none resolves, the value passes
//! through unchanged. Selection never fails -- only a generator that
//! cannot satisfy its parameters aborts the run.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::JsonymizeError`]:
//!
//! ```rust
//! use jsonymize::core::{Anonymizer, AnonymizerOptions};
//! use jsonymize::domain::JsonymizeError;
//!
//! let anonymizer = Anonymizer::new(AnonymizerOptions::default());
//! let err = anonymizer.anonymize(&b"{\"broken\": "[..]).unwrap_err();
//! assert!(matches!(err, JsonymizeError::Parse { .. }));
//! ```
//!
//! ## Logging
//!
//! jsonymize uses structured logging with the `tracing` crate; all log
//! output goes to stderr, keeping stdout clean for the document.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
