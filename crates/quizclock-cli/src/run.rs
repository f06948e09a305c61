//! Wires configuration, the question file, and stdio into a quiz run.

use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizclock_core::config::{load_config_from, QuizConfig, StaleInputPolicy};
use quizclock_core::parser;
use quizclock_core::reporter::ConsoleReporter;
use quizclock_core::{QuizError, QuizRunner};

/// Settings given on the command line; these win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub filename: Option<PathBuf>,
    pub limit: Option<u64>,
    pub discard_stale_input: bool,
}

impl Overrides {
    fn apply(self, config: &mut QuizConfig) {
        if let Some(filename) = self.filename {
            config.filename = filename;
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if self.discard_stale_input {
            config.stale_input = StaleInputPolicy::Discard;
        }
    }
}

/// Run one quiz on stdin/stdout.
///
/// Setup problems (config, question file, too few questions) are printed and
/// the quiz is skipped. Only a failure of the input stream mid-quiz is
/// returned as an error.
pub async fn execute(overrides: Overrides, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = match load_config_from(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_setup_error(e),
    };
    overrides.apply(&mut config);
    tracing::debug!(?config, "resolved configuration");

    let questions = match parser::load_questions(&config.filename) {
        Ok(questions) => questions,
        Err(e) => return report_setup_error(e),
    };

    let runner = QuizRunner::new(config.runner_config());
    let reporter = ConsoleReporter::new(io::stdout());
    let stdin = BufReader::new(io::stdin());

    match runner.run(&questions, stdin, &reporter).await {
        Ok(_) => Ok(()),
        Err(e) if e.is_setup() => report_setup_error(e),
        Err(e) => Err(e).context("quiz aborted"),
    }
}

fn report_setup_error(error: QuizError) -> Result<()> {
    tracing::debug!("setup failed: {error:?}");
    println!("{error}");
    Ok(())
}
