//! Configuration management for jsonymize.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation for the anonymization run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jsonymize::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("jsonymize.toml")?;
//! println!("Anonymizing {} fields", config.fields.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! fields = ["email", "id", "cc"]
//! extensions = ["generators/custom.toml"]
//!
//! [aliases]
//! cc = "credit_card"
//!
//! [generators]
//! email = "email"
//! id = { generator = "natural", params = { min = 1, max = 9999 } }
//! ```
//!
//! Every section is optional; an empty file (or no file at all) is a valid
//! configuration that anonymizes nothing.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{Override, RunConfig};
