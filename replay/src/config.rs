//! Configuration for the replay tool.
//!
//! Every flag can also come from the environment (or a `.env` file loaded
//! beforehand), so recorded sessions can be replayed from CI without
//! rewriting command lines.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

/// Replay configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nailfeed-replay",
    version,
    about = "Replay a recorded feed event script and print the resulting feed"
)]
pub struct Config {
    /// Event script, one JSON feed event per line
    #[arg(env = "NAILFEED_SCRIPT")]
    pub script: PathBuf,

    /// JSON file with the initial post list
    #[arg(long, env = "NAILFEED_SEED")]
    pub seed: Option<PathBuf>,

    /// Output format
    #[arg(long, env = "NAILFEED_FORMAT", value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Include the change produced by every step in the report
    #[arg(long, env = "NAILFEED_STEPS", action = ArgAction::Set, default_value_t = true)]
    pub steps: bool,
}

impl Config {
    /// Parse the command line and environment, then check the inputs exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check that the referenced files exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.script.is_file() {
            return Err(ConfigError::ScriptNotFound(self.script.clone()));
        }
        if let Some(seed) = &self.seed {
            if !seed.is_file() {
                return Err(ConfigError::SeedNotFound(seed.clone()));
            }
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("script file not found: {}", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("seed file not found: {}", .0.display())]
    SeedNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let config = Config::try_parse_from(["nailfeed-replay", "events.jsonl"]).unwrap();

        assert_eq!(config.script, PathBuf::from("events.jsonl"));
        assert_eq!(config.seed, None);
        assert_eq!(config.format, OutputFormat::Pretty);
        assert!(config.steps);
    }

    #[test]
    fn parse_flags() {
        let config = Config::try_parse_from([
            "nailfeed-replay",
            "events.jsonl",
            "--seed",
            "posts.json",
            "--format",
            "compact",
            "--steps",
            "false",
        ])
        .unwrap();

        assert_eq!(config.seed, Some(PathBuf::from("posts.json")));
        assert_eq!(config.format, OutputFormat::Compact);
        assert!(!config.steps);
    }

    #[test]
    fn validate_missing_files() {
        let config =
            Config::try_parse_from(["nailfeed-replay", "/nonexistent/events.jsonl"]).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ScriptNotFound(_)));
        assert_eq!(
            err.to_string(),
            "script file not found: /nonexistent/events.jsonl"
        );
    }
}
