//! Replacement engine
//!
//! For each document node whose field name is targeted, combines the field's
//! resolved action with the value's classified type tags to choose exactly
//! one generator, invokes it, and substitutes the result in place.
//!
//! Selection is an explicit ordered list: the override name (if configured)
//! followed by the type tags in priority order, filtered to names that
//! resolve in the registry, first survivor wins. An empty list after
//! filtering is not an error; the node passes through unchanged.

use crate::core::actions::ActionTable;
use crate::core::classify::classify;
use crate::core::registry::GeneratorRegistry;
use crate::domain::result::Result;
use serde_json::Value;

/// Chooses and invokes one generator per targeted document node
pub struct ReplacementEngine {
    actions: ActionTable,
    registry: GeneratorRegistry,
}

impl ReplacementEngine {
    /// Create an engine from a derived action table and a built registry
    pub fn new(actions: ActionTable, registry: GeneratorRegistry) -> Self {
        Self { actions, registry }
    }

    /// Whether any field is targeted at all
    pub fn has_targets(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Replace the value observed at `field`, or return it unchanged
    ///
    /// Untargeted fields, and targeted fields for which no candidate
    /// generator resolves, pass through unchanged. The only error is a
    /// generator that cannot satisfy its parameters.
    pub fn replace(&self, field: &str, value: Value) -> Result<Value> {
        let Some(action) = self.actions.get(field) else {
            return Ok(value);
        };

        // Classification runs even when an override is supplied; the tags
        // are the fallback when the override doesn't resolve.
        let tags = classify(&value);
        let selected = action
            .override_name
            .as_deref()
            .into_iter()
            .chain(tags.iter().map(|tag| tag.generator_name()))
            .find(|name| self.registry.contains(name));

        let Some(name) = selected else {
            tracing::trace!(field, "no generator resolved, leaving value unchanged");
            return Ok(value);
        };

        tracing::trace!(field, generator = name, "replacing value");
        let mut params = action.fixed_params.clone();
        // the original value is applied last and overwrites any same-named
        // fixed parameter
        params.insert("value".to_string(), value);
        self.registry.invoke(name, &params)
    }
}
