//! Quiz configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `QUIZCLOCK_*` environment variables. Command-line flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{QuizError, Result};
use crate::model::QUIZ_LENGTH;
use crate::runner::RunnerConfig;

/// What to do with lines typed before a question was shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleInputPolicy {
    /// Hand them to the next question, in typing order.
    #[default]
    Deliver,
    /// Drop them before each question is asked.
    Discard,
}

/// Top-level quizclock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizConfig {
    /// Question file to load.
    #[serde(default = "default_filename")]
    pub filename: PathBuf,
    /// Seconds allowed per question.
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Handling of answers typed ahead of their question.
    #[serde(default)]
    pub stale_input: StaleInputPolicy,
}

fn default_filename() -> PathBuf {
    PathBuf::from("problem.csv")
}

fn default_limit() -> u64 {
    10
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            limit: default_limit(),
            stale_input: StaleInputPolicy::default(),
        }
    }
}

impl QuizConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.limit)
    }

    /// Runner settings for the standard fixed-length quiz.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            quiz_length: QUIZ_LENGTH,
            time_limit: self.time_limit(),
            stale_input: self.stale_input,
        }
    }

    /// Apply `QUIZCLOCK_FILENAME` / `QUIZCLOCK_LIMIT` style overrides.
    ///
    /// `lookup` resolves a variable name to its value.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filename) = lookup("QUIZCLOCK_FILENAME") {
            self.filename = PathBuf::from(filename);
        }
        if let Some(limit) = lookup("QUIZCLOCK_LIMIT") {
            self.limit = limit.trim().parse().map_err(|_| {
                QuizError::Config(format!("QUIZCLOCK_LIMIT is not a whole number: '{limit}'"))
            })?;
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizclock.toml` in the current directory
/// 2. `~/.config/quizclock/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            return Err(QuizError::Config(format!(
                "config file not found: {}",
                p.display()
            )));
        }
    } else {
        let local = PathBuf::from("quizclock.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("reading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => QuizConfig::default(),
    };

    config.apply_env_overrides(|name| std::env::var(name).ok())?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<QuizConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        QuizError::Config(format!("failed to read config {}: {e}", path.display()))
    })?;
    toml::from_str(&content).map_err(|e| {
        QuizError::Config(format!("failed to parse config {}: {e}", path.display()))
    })
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizclock"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.filename, PathBuf::from("problem.csv"));
        assert_eq!(config.limit, 10);
        assert_eq!(config.stale_input, StaleInputPolicy::Deliver);

        let runner = config.runner_config();
        assert_eq!(runner.quiz_length, 10);
        assert_eq!(runner.time_limit, Duration::from_secs(10));
    }

    #[test]
    fn parse_partial_file() {
        let config: QuizConfig = toml::from_str(
            r#"
limit = 30
stale_input = "discard"
"#,
        )
        .unwrap();
        assert_eq!(config.limit, 30);
        assert_eq!(config.filename, PathBuf::from("problem.csv"));
        assert_eq!(config.stale_input, StaleInputPolicy::Discard);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(QuizError::Config(_))));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, "filename = \"capitals.csv\"\n").unwrap();

        let config = parse_config_file(&path).unwrap();
        assert_eq!(config.filename, PathBuf::from("capitals.csv"));
        assert_eq!(config.limit, 10);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, "limit = \"soon\"\n").unwrap();

        assert!(matches!(
            parse_config_file(&path),
            Err(QuizError::Config(_))
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = QuizConfig {
            filename: PathBuf::from("from-file.csv"),
            limit: 30,
            stale_input: StaleInputPolicy::Deliver,
        };
        config
            .apply_env_overrides(|name| match name {
                "QUIZCLOCK_LIMIT" => Some("5".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.filename, PathBuf::from("from-file.csv"));
        assert_eq!(config.limit, 5);

        let err = config
            .apply_env_overrides(|name| (name == "QUIZCLOCK_LIMIT").then(|| "soon".into()))
            .unwrap_err();
        assert!(err.to_string().contains("QUIZCLOCK_LIMIT"));
    }
}
