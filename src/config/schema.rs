//! Configuration schema types
//!
//! This module defines the run configuration structure: which fields to
//! anonymize, how logical names map to document field names, per-field
//! generator overrides, and extension files to fold onto the generator
//! library.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;

/// Per-field generator override
///
/// A field may configure either a bare generator name or a name plus fixed
/// parameters. The two TOML shapes are:
///
/// ```toml
/// [generators]
/// email = "email"
/// id = { generator = "natural", params = { min = 1, max = 99 } }
/// ```
///
/// The variant is resolved once when the action table is built and never
/// inspected ad hoc downstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Override {
    /// Bare generator name
    Bare(String),

    /// Generator name plus fixed parameters passed on every invocation
    Parameterized {
        /// Name of the generator to force for this field
        generator: String,
        /// Fixed parameters merged into every invocation (the original
        /// value is added under `value` afterwards and always wins)
        #[serde(default)]
        params: Map<String, Value>,
    },
}

impl Override {
    /// The generator name this override forces
    pub fn generator(&self) -> &str {
        match self {
            Override::Bare(name) => name,
            Override::Parameterized { generator, .. } => generator,
        }
    }

    /// Fixed parameters configured for this override (empty for bare names)
    pub fn params(&self) -> Map<String, Value> {
        match self {
            Override::Bare(_) => Map::new(),
            Override::Parameterized { params, .. } => params.clone(),
        }
    }
}

/// Main run configuration
///
/// This is the root structure that maps to the TOML configuration file.
/// All sections are optional and default to empty: an empty configuration
/// is valid and anonymizes nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Logical field name -> actual document field name (identity if absent)
    pub aliases: HashMap<String, String>,

    /// Logical field names to anonymize, in configuration order.
    /// When two entries alias to the same actual field, the later one wins.
    pub fields: Vec<String>,

    /// Logical field name -> generator override
    pub generators: HashMap<String, Override>,

    /// Extension files declaring additional generators, applied in order
    /// (later extensions shadow earlier ones and builtins)
    pub extensions: Vec<PathBuf>,
}

impl RunConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configured name is empty
    pub fn validate(&self) -> Result<(), String> {
        for field in &self.fields {
            if field.is_empty() {
                return Err("fields must not contain empty names".to_string());
            }
        }
        for (alias, actual) in &self.aliases {
            if alias.is_empty() || actual.is_empty() {
                return Err("aliases must not map empty names".to_string());
            }
        }
        for (field, ov) in &self.generators {
            if field.is_empty() || ov.generator().is_empty() {
                return Err(format!("generator override for '{field}' names no generator"));
            }
        }
        Ok(())
    }
}
