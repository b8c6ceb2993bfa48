//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for jsonymize using
//! clap. Flags win over config-file values: each knob (fields, aliases,
//! generators, extensions) is taken wholesale from the command line when
//! given there, otherwise from the configuration file, otherwise empty.

use crate::config::{Override, RunConfig};
use crate::domain::errors::JsonymizeError;
use crate::domain::result::Result;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;

/// Anonymize JSON values read from stdin
#[derive(Parser, Debug)]
#[command(name = "jsonymize")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Field names to anonymize (replaces the config file's field list)
    #[arg(value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "JSONYMIZE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Map a logical field name to the actual document field name
    #[arg(short = 'a', long = "alias", value_name = "LOGICAL=ACTUAL")]
    pub aliases: Vec<String>,

    /// Force a generator for a field
    #[arg(short = 'g', long = "generator", value_name = "FIELD=GENERATOR")]
    pub generators: Vec<String>,

    /// Extension file declaring custom generators
    #[arg(short = 'e', long = "extension", value_name = "PATH")]
    pub extensions: Vec<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "JSONYMIZE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Merge command-line knobs over a loaded configuration file
    ///
    /// Each knob is replaced wholesale when present on the command line;
    /// there is no per-entry merging.
    pub fn merge_into(&self, file: RunConfig) -> Result<RunConfig> {
        let fields = if self.fields.is_empty() {
            file.fields
        } else {
            self.fields.clone()
        };

        let aliases = if self.aliases.is_empty() {
            file.aliases
        } else {
            parse_pairs(&self.aliases, "alias")?
        };

        let generators = if self.generators.is_empty() {
            file.generators
        } else {
            parse_pairs(&self.generators, "generator")?
                .into_iter()
                .map(|(field, name)| (field, Override::Bare(name)))
                .collect()
        };

        let extensions = if self.extensions.is_empty() {
            file.extensions
        } else {
            self.extensions.clone()
        };

        Ok(RunConfig {
            aliases,
            fields,
            generators,
            extensions,
        })
    }
}

/// Parse repeated `KEY=VALUE` flags into a map
fn parse_pairs(pairs: &[String], flag: &str) -> Result<HashMap<String, String>> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => {
                Ok((key.to_string(), value.to_string()))
            }
            _ => Err(JsonymizeError::Configuration(format!(
                "Invalid --{flag} '{pair}': expected KEY=VALUE"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_fields() {
        let cli = Cli::parse_from(["jsonymize", "email", "name"]);
        assert_eq!(cli.fields, vec!["email", "name"]);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["jsonymize", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_parse_repeatable_flags() {
        let cli = Cli::parse_from([
            "jsonymize",
            "-a",
            "e=email",
            "-a",
            "n=name",
            "-g",
            "id=guid",
            "-e",
            "ext.toml",
        ]);
        assert_eq!(cli.aliases, vec!["e=email", "n=name"]);
        assert_eq!(cli.generators, vec!["id=guid"]);
        assert_eq!(cli.extensions, vec![PathBuf::from("ext.toml")]);
    }

    #[test]
    fn test_merge_cli_fields_win() {
        let cli = Cli::parse_from(["jsonymize", "email"]);
        let file = RunConfig {
            fields: vec!["id".to_string()],
            ..Default::default()
        };
        let merged = cli.merge_into(file).unwrap();
        assert_eq!(merged.fields, vec!["email"]);
    }

    #[test]
    fn test_merge_falls_back_to_file_config() {
        let cli = Cli::parse_from(["jsonymize"]);
        let file = RunConfig {
            fields: vec!["id".to_string()],
            aliases: HashMap::from([("e".to_string(), "email".to_string())]),
            ..Default::default()
        };
        let merged = cli.merge_into(file).unwrap();
        assert_eq!(merged.fields, vec!["id"]);
        assert_eq!(merged.aliases["e"], "email");
    }

    #[test]
    fn test_merge_aliases_replace_wholesale() {
        // a single CLI alias discards the whole file alias table
        let cli = Cli::parse_from(["jsonymize", "-a", "n=name"]);
        let file = RunConfig {
            aliases: HashMap::from([("e".to_string(), "email".to_string())]),
            ..Default::default()
        };
        let merged = cli.merge_into(file).unwrap();
        assert_eq!(merged.aliases.len(), 1);
        assert_eq!(merged.aliases["n"], "name");
    }

    #[test]
    fn test_merge_generator_flags_are_bare_overrides() {
        let cli = Cli::parse_from(["jsonymize", "-g", "id=guid"]);
        let merged = cli.merge_into(RunConfig::default()).unwrap();
        assert_eq!(merged.generators["id"], Override::Bare("guid".to_string()));
    }

    #[test]
    fn test_malformed_pair_rejected() {
        let cli = Cli::parse_from(["jsonymize", "-a", "no-separator"]);
        let result = cli.merge_into(RunConfig::default());
        assert!(matches!(result, Err(JsonymizeError::Configuration(_))));
    }
}
