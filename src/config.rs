use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::error::TerminalError;
use crate::session::DEFAULT_HISTORY_LIMIT;

const RC_FILE: &str = ".nctermrc";

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, String),
    InvalidLine { line: usize, content: String },
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, msg) => {
                write!(f, "cannot read {}: {}", path.display(), msg)
            }
            ConfigError::InvalidLine { line, content } => {
                write!(f, "invalid config line {}: {}", line, content)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {}: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Startup configuration read from `~/.nctermrc` (or a path given with
/// `-c`). `key = value` lines, `#` comments; unknown keys are collected so
/// the front-end can warn about them in debug mode.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    pub prompt: Option<String>,
    pub history_limit: usize,
    unknown_keys: Vec<String>,
}

impl Config {
    pub fn new() -> Result<Self, TerminalError> {
        let home = dirs::home_dir().ok_or(TerminalError::HomeDirNotFound)?;
        Ok(Self::with_path(home.join(RC_FILE)))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Config {
            path,
            prompt: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            unknown_keys: Vec::new(),
        }
    }

    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown_keys
    }

    pub fn load(&mut self) -> Result<(), ConfigError> {
        if !self.path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::Read(self.path.clone(), e.to_string()))?;

        for (index, raw) in content.lines().enumerate() {
            self.process_line(index + 1, raw)?;
        }
        Ok(())
    }

    fn process_line(&mut self, number: usize, raw: &str) -> Result<(), ConfigError> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::InvalidLine {
            line: number,
            content: raw.to_string(),
        })?;
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        match key {
            "prompt" => self.prompt = Some(value.to_string()),
            "history-limit" => {
                self.history_limit = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
            }
            _ => self.unknown_keys.push(key.to_string()),
        }
        Ok(())
    }
}
