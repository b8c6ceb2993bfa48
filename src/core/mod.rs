//! Core anonymization logic
//!
//! The pipeline, leaves first:
//!
//! - [`classify`] - semantic type tags for raw values
//! - [`registry`] - the named generator library plus extensions
//! - [`actions`] - alias resolution and the per-field action table
//! - [`engine`] - generator selection and value replacement
//! - [`stream`] - the streaming parse/rebuild cycle
//!
//! [`Anonymizer`] is the embeddable entry point combining all of them:
//! construct once per run, then feed it a reader producing JSON text.

pub mod actions;
pub mod classify;
pub mod engine;
pub mod extension;
pub mod registry;
pub mod stream;

pub use actions::ActionTable;
pub use classify::{classify, TypeTag};
pub use engine::ReplacementEngine;
pub use extension::load_extension_file;
pub use registry::{Extension, GeneratorRegistry, Params};
pub use stream::StreamDriver;

use crate::config::{Override, RunConfig};
use crate::domain::result::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;

/// Options for one anonymization run
///
/// Mirrors [`RunConfig`] but with extension files already loaded and
/// compiled, so library embedders can also supply programmatic extensions.
#[derive(Default)]
pub struct AnonymizerOptions {
    /// Logical field name -> actual document field name
    pub aliases: HashMap<String, String>,
    /// Logical field names to anonymize, in order
    pub fields: Vec<String>,
    /// Logical field name -> generator override
    pub generators: HashMap<String, Override>,
    /// Generator extensions, folded onto the builtins in order
    pub extensions: Vec<Extension>,
    /// Seed for the randomness source; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl AnonymizerOptions {
    /// Build options from a loaded configuration, compiling its extension
    /// files in configured order
    ///
    /// # Errors
    ///
    /// Returns an error if an extension file is missing or invalid.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        let extensions = config
            .extensions
            .iter()
            .map(load_extension_file)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            aliases: config.aliases.clone(),
            fields: config.fields.clone(),
            generators: config.generators.clone(),
            extensions,
            seed: None,
        })
    }
}

/// One-shot JSON anonymizer
///
/// Owns the generator registry (and its randomness source) and the derived
/// action table for the run. Construction never touches the input; all
/// failures before streaming are configuration failures surfaced earlier.
pub struct Anonymizer {
    engine: ReplacementEngine,
}

impl Anonymizer {
    /// Build the registry and action table for a run
    pub fn new(options: AnonymizerOptions) -> Self {
        let mut registry = GeneratorRegistry::with_extensions(options.extensions);
        if let Some(seed) = options.seed {
            registry = registry.with_seed(seed);
        }
        let actions = ActionTable::build(&options.fields, &options.aliases, &options.generators);
        tracing::debug!(targets = actions.len(), "action table built");

        Self {
            engine: ReplacementEngine::new(actions, registry),
        }
    }

    /// Anonymize a JSON document read from `reader`
    ///
    /// Consumes the whole stream and returns the fully reconstructed
    /// document with replacements applied in place.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::JsonymizeError::Parse`] carrying the raw
    /// offending fragment when the input cannot be tokenized, or a
    /// generator failure when an invocation cannot satisfy its parameters.
    pub fn anonymize<R: Read>(&self, reader: R) -> Result<Value> {
        StreamDriver::new(&self.engine).run(reader)
    }
}
