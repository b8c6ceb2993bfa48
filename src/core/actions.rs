//! Field resolution and the action table
//!
//! Maps each configured logical field name through the alias table to the
//! actual document field name and extracts its generator override, producing
//! one [`FieldAction`] per actual field. The table is derived once before
//! streaming begins and read-only afterwards.

use crate::config::Override;
use crate::core::registry::Params;
use std::collections::HashMap;

/// Resolved replacement instruction for one actual field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAction {
    /// Generator forced by configuration, if any (may name a generator
    /// that doesn't exist; the engine skips unresolvable names silently)
    pub override_name: Option<String>,

    /// Fixed parameters configured for the override (empty otherwise)
    pub fixed_params: Params,
}

/// Read-only mapping from actual field name to its replacement instruction
///
/// Exactly one entry exists per actual field name: when two logical fields
/// alias to the same actual name, the later one in configuration order wins.
#[derive(Debug, Default)]
pub struct ActionTable {
    actions: HashMap<String, FieldAction>,
}

impl ActionTable {
    /// Build the table from configured fields, aliases, and overrides
    ///
    /// Fields are folded in configuration order; a later entry overwrites
    /// an earlier one that resolves to the same actual field name.
    pub fn build(
        fields: &[String],
        aliases: &HashMap<String, String>,
        generators: &HashMap<String, Override>,
    ) -> Self {
        let mut actions = HashMap::new();

        for alias in fields {
            let actual = aliases.get(alias).unwrap_or(alias).clone();
            let action = match generators.get(alias) {
                Some(ov) => FieldAction {
                    override_name: Some(ov.generator().to_string()),
                    fixed_params: ov.params(),
                },
                None => FieldAction::default(),
            };
            actions.insert(actual, action);
        }

        Self { actions }
    }

    /// The replacement instruction for an actual field name, if targeted
    pub fn get(&self, field: &str) -> Option<&FieldAction> {
        self.actions.get(field)
    }

    /// Whether any field is targeted at all
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of targeted actual field names
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
