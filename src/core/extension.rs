//! Declarative generator extensions
//!
//! An extension file is a TOML document declaring named generators that
//! fold onto the builtin library (later extensions shadow earlier ones and
//! builtins of the same name). Four rule shapes exist:
//!
//! ```toml
//! [generators.company]
//! fixed = "ACME"
//!
//! [generators.status]
//! choice = ["active", "inactive", "suspended"]
//!
//! [generators.age]
//! range = { min = 18, max = 99 }
//!
//! [generators.serial]
//! pattern = "SN-####-??"   # '#' draws a digit, '?' a lowercase letter
//! ```
//!
//! Rules are compiled to generator functions at load time; nothing is
//! invoked until the stream runs. Library embedders can bypass files
//! entirely and pass programmatic [`Extension`] values instead.

use crate::core::registry::{Extension, GeneratorFn};
use crate::domain::errors::JsonymizeError;
use crate::domain::result::Result;
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// One declared generator rule
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExtensionRule {
    /// Always produce this exact value
    Fixed { fixed: Value },
    /// Pick one of these values uniformly
    Choice { choice: Vec<Value> },
    /// Draw an integer from an inclusive range
    Range { range: RangeSpec },
    /// Fill a template: `#` draws a digit, `?` a lowercase letter,
    /// anything else is literal
    Pattern { pattern: String },
}

/// Inclusive integer range for [`ExtensionRule::Range`]
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RangeSpec {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct ExtensionFile {
    generators: std::collections::HashMap<String, ExtensionRule>,
}

/// Load an extension from a TOML file
pub fn load_extension_file(path: impl AsRef<Path>) -> Result<Extension> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(JsonymizeError::Configuration(format!(
            "Extension file not found: {}",
            path.display()
        )));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| {
        JsonymizeError::Configuration(format!(
            "Failed to read extension file {}: {}",
            path.display(),
            e
        ))
    })?;
    extension_from_toml(&contents).map_err(|e| {
        JsonymizeError::Configuration(format!("Invalid extension file {}: {}", path.display(), e))
    })
}

/// Parse and compile an extension from TOML content
pub fn extension_from_toml(contents: &str) -> Result<Extension> {
    let file: ExtensionFile = toml::from_str(contents)
        .map_err(|e| JsonymizeError::Configuration(format!("TOML parse error: {e}")))?;

    let mut extension = Extension::new();
    for (name, rule) in file.generators {
        let generator = compile(&name, rule)?;
        extension.push((name, generator));
    }
    Ok(extension)
}

/// Compile one rule to a generator function
///
/// Structural problems (empty choice list, inverted range) are caught here,
/// at construction time, so a bad extension fails the run before any input
/// is consumed.
fn compile(name: &str, rule: ExtensionRule) -> Result<GeneratorFn> {
    match rule {
        ExtensionRule::Fixed { fixed } => Ok(Box::new(move |_rng, _params| Ok(fixed.clone()))),
        ExtensionRule::Choice { choice } => {
            if choice.is_empty() {
                return Err(JsonymizeError::Configuration(format!(
                    "generator '{name}': choice list must not be empty"
                )));
            }
            Ok(Box::new(move |rng, _params| {
                Ok(choice[rng.gen_range(0..choice.len())].clone())
            }))
        }
        ExtensionRule::Range { range } => {
            if range.min > range.max {
                return Err(JsonymizeError::Configuration(format!(
                    "generator '{name}': range min ({}) exceeds max ({})",
                    range.min, range.max
                )));
            }
            Ok(Box::new(move |rng, _params| {
                Ok(Value::from(rng.gen_range(range.min..=range.max)))
            }))
        }
        ExtensionRule::Pattern { pattern } => Ok(Box::new(move |rng, _params| {
            let filled: String = pattern
                .chars()
                .map(|c| match c {
                    '#' => std::char::from_digit(rng.gen_range(0..10), 10).unwrap(),
                    '?' => (b'a' + rng.gen_range(0..26u8)) as char,
                    literal => literal,
                })
                .collect();
            Ok(Value::String(filled))
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{GeneratorRegistry, Params};
    use serde_json::json;

    #[test]
    fn test_fixed_rule() {
        let extension = extension_from_toml(
            r#"
            [generators.company]
            fixed = "ACME"
            "#,
        )
        .unwrap();
        let registry = GeneratorRegistry::with_extensions(vec![extension]);
        assert_eq!(
            registry.invoke("company", &Params::new()).unwrap(),
            json!("ACME")
        );
    }

    #[test]
    fn test_choice_rule() {
        let extension = extension_from_toml(
            r#"
            [generators.status]
            choice = ["active", "inactive"]
            "#,
        )
        .unwrap();
        let registry = GeneratorRegistry::with_extensions(vec![extension]);
        for _ in 0..20 {
            let value = registry.invoke("status", &Params::new()).unwrap();
            assert!(value == json!("active") || value == json!("inactive"));
        }
    }

    #[test]
    fn test_empty_choice_fails_at_load() {
        let result = extension_from_toml(
            r#"
            [generators.status]
            choice = []
            "#,
        );
        assert!(matches!(result, Err(JsonymizeError::Configuration(_))));
    }

    #[test]
    fn test_range_rule() {
        let extension = extension_from_toml(
            r#"
            [generators.age]
            range = { min = 18, max = 21 }
            "#,
        )
        .unwrap();
        let registry = GeneratorRegistry::with_extensions(vec![extension]);
        for _ in 0..20 {
            let n = registry.invoke("age", &Params::new()).unwrap().as_i64().unwrap();
            assert!((18..=21).contains(&n));
        }
    }

    #[test]
    fn test_inverted_range_fails_at_load() {
        let result = extension_from_toml(
            r#"
            [generators.age]
            range = { min = 9, max = 1 }
            "#,
        );
        assert!(matches!(result, Err(JsonymizeError::Configuration(_))));
    }

    #[test]
    fn test_pattern_rule() {
        let extension = extension_from_toml(
            r#"
            [generators.serial]
            pattern = "SN-###-?"
            "#,
        )
        .unwrap();
        let registry = GeneratorRegistry::with_extensions(vec![extension]);
        let value = registry.invoke("serial", &Params::new()).unwrap();
        let s = value.as_str().unwrap();
        let re = regex::Regex::new(r"^SN-\d{3}-[a-z]$").unwrap();
        assert!(re.is_match(s), "pattern output was {s:?}");
    }

    #[test]
    fn test_invalid_rule_shape_rejected() {
        let result = extension_from_toml(
            r#"
            [generators.broken]
            unknown = true
            "#,
        );
        assert!(matches!(result, Err(JsonymizeError::Configuration(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_extension_file("/nonexistent/ext.toml");
        assert!(matches!(result, Err(JsonymizeError::Configuration(_))));
    }

    #[test]
    fn test_load_extension_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[generators.company]\nfixed = \"ACME\"\n").unwrap();

        let extension = load_extension_file(&path).unwrap();
        assert_eq!(extension.len(), 1);
        assert_eq!(extension[0].0, "company");
    }
}
