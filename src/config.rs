//! Runtime configuration from environment variables.
//!
//! - `VITALIS_MODEL_PATH`: model directory or file (default `models`)
//! - `VITALIS_REQUIRE_MODEL_DIGEST`: refuse models without `model.sha256`
//! - `VITALIS_LOG_MODE`: `auto` | `file` | `stdout`
//! - `VITALIS_LOG_FILE`: log file path when logging to a file
//!
//! Log filtering itself follows `RUST_LOG` (see `main.rs`).

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "VITALIS_MODEL_PATH";
pub const REQUIRE_MODEL_DIGEST_ENV: &str = "VITALIS_REQUIRE_MODEL_DIGEST";
pub const LOG_MODE_ENV: &str = "VITALIS_LOG_MODE";
pub const LOG_FILE_ENV: &str = "VITALIS_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models";
const DEFAULT_LOG_FILE: &str = "vitalis.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Writing logs to the terminal corrupts the TUI's alternate screen, so
    /// interactive sessions log to a file unless told otherwise.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model_path: PathBuf,
    pub require_model_digest: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Config {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            model_path: lookup(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            require_model_digest: lookup(REQUIRE_MODEL_DIGEST_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(LogMode::Auto),
            log_file: lookup(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
