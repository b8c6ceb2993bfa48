// jsonymize - Streaming JSON anonymizer
// Licensed under the MIT License

use anyhow::Context;
use clap::Parser;
use jsonymize::cli::Cli;
use jsonymize::config::{load_config, RunConfig};
use jsonymize::core::{Anonymizer, AnonymizerOptions};
use jsonymize::logging::init_logging;
use std::io::{self, Write};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(2);
    }

    // Exit codes: 0 success, 2 configuration failure, 3 anonymization or
    // parse failure. Errors propagated out of run() are all
    // configuration-class; stream failures are mapped inside.
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            eprintln!("Error: {e:#}");
            2
        }
    };

    process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    // A named config file that doesn't exist aborts before any processing
    let file_config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                eprintln!("Could not read configuration file \"{}\"", path.display());
                return Ok(2);
            }
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => RunConfig::default(),
    };

    let config = cli
        .merge_into(file_config)
        .context("invalid command-line overrides")?;
    let options =
        AnonymizerOptions::from_config(&config).context("failed to build generator library")?;

    tracing::debug!(fields = config.fields.len(), "starting anonymization");
    let anonymizer = Anonymizer::new(options);
    let stdin = io::stdin();

    match anonymizer.anonymize(stdin.lock()) {
        Ok(document) => {
            let line = serde_json::to_string(&document).context("failed to serialize output")?;
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{line}") {
                eprintln!("Error! {e}");
                return Ok(3);
            }
            Ok(0)
        }
        Err(e) => {
            tracing::error!(error = %e, "anonymization failed");
            match e.fragment() {
                Some(fragment) => eprintln!("Error! {fragment:?}"),
                None => eprintln!("Error! {e}"),
            }
            Ok(3)
        }
    }
}
