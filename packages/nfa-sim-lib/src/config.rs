use std::{fmt::Display, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{logger::LogLevel, spec::Tokenization};

/// Decides when the empty word is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyWordRule {
    /// Accept iff the epsilon closure of the initial states contains a final
    /// state.
    #[default]
    Closure,
    /// Additionally accept whenever the automaton has any epsilon transition
    /// at all, regardless of where it is. Applies to every empty word, so a
    /// blank input line is treated the same as `-`.
    AnyEpsilon,
}

impl FromStr for EmptyWordRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "closure" => Ok(EmptyWordRule::Closure),
            "any_epsilon" | "legacy" => Ok(EmptyWordRule::AnyEpsilon),
            _ => Err(format!("Invalid empty word rule: {}", s)),
        }
    }
}

impl Display for EmptyWordRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyWordRule::Closure => write!(f, "closure"),
            EmptyWordRule::AnyEpsilon => write!(f, "any-epsilon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    enabled: bool,
    log_file: bool,
    log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_log_file(mut self, log_file: bool) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn get_enabled(&self) -> &bool {
        &self.enabled
    }

    pub fn get_log_file(&self) -> &bool {
        &self.log_file
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }
}

/// The tokens written for accepted and rejected words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    accept_token: String,
    reject_token: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            accept_token: "aceita".to_string(),
            reject_token: "rejeita".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn with_accept_token(mut self, accept_token: String) -> Self {
        self.accept_token = accept_token;
        self
    }

    pub fn with_reject_token(mut self, reject_token: String) -> Self {
        self.reject_token = reject_token;
        self
    }

    pub fn get_accept_token(&self) -> &str {
        &self.accept_token
    }

    pub fn get_reject_token(&self) -> &str {
        &self.reject_token
    }
}

/// Configuration of a simulation run. Missing entries of a TOML file fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    empty_word: EmptyWordRule,
    tokenization: Tokenization,
    parallel: bool,
    logger: LoggerConfig,
    output: OutputConfig,
}

impl SimulationConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        let canonic_path = std::fs::canonicalize(file_path)?;
        let content = std::fs::read_to_string(canonic_path)?;
        Self::from_toml(&content)
    }

    pub fn from_optional_file<P: AsRef<Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
        match file_path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_empty_word(mut self, empty_word: EmptyWordRule) -> Self {
        self.empty_word = empty_word;
        self
    }

    pub fn with_tokenization(mut self, tokenization: Tokenization) -> Self {
        self.tokenization = tokenization;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn get_empty_word(&self) -> &EmptyWordRule {
        &self.empty_word
    }

    pub fn get_tokenization(&self) -> &Tokenization {
        &self.tokenization
    }

    pub fn get_parallel(&self) -> &bool {
        &self.parallel
    }

    pub fn get_logger(&self) -> &LoggerConfig {
        &self.logger
    }

    pub fn get_output(&self) -> &OutputConfig {
        &self.output
    }
}

#[test]
fn test_partial_config() {
    let config = SimulationConfig::from_toml(
        r#"
        empty_word = "any_epsilon"

        [output]
        accept_token = "accepted"
        "#,
    )
    .unwrap();

    assert_eq!(config.get_empty_word(), &EmptyWordRule::AnyEpsilon);
    assert_eq!(config.get_tokenization(), &Tokenization::Chars);
    assert!(!config.get_parallel());
    assert_eq!(config.get_output().get_accept_token(), "accepted");
    assert_eq!(config.get_output().get_reject_token(), "rejeita");
    assert_eq!(config.get_logger(), &LoggerConfig::default());
}

#[test]
fn test_invalid_config() {
    assert!(SimulationConfig::from_toml("empty_word = \"sometimes\"").is_err());
    assert!(SimulationConfig::from_optional_file(None::<&str>).is_ok());
}
