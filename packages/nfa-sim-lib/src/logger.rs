use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
    sync::Mutex,
};

use anyhow::Context;
use chrono::Local;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WAR",
            LogLevel::Error => "ERR",
        }
    }

    pub fn colored_tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => self.tag().bright_cyan(),
            LogLevel::Info => self.tag().bright_green(),
            LogLevel::Warn => self.tag().yellow(),
            LogLevel::Error => self.tag().bright_red(),
        }
    }

    /// Whether a message of this level passes the given threshold.
    pub fn shown_at(&self, threshold: &LogLevel) -> bool {
        self >= threshold
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// A leveled logger writing to stderr and, optionally, to a file.
///
/// Messages below the configured level are not printed, but every message is
/// written to the log file.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    name: String,
    file: Option<Mutex<BufWriter<File>>>,
}

impl Logger {
    pub fn new(level: LogLevel, name: String, log_file_path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match log_file_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let file = File::create(path)
                    .with_context(|| format!("Failed to create log file {}", path.display()))?;
                Some(Mutex::new(BufWriter::new(file)))
            }
            None => None,
        };

        Ok(Logger { level, name, file })
    }

    pub fn from_config(config: &LoggerConfig, name: String) -> anyhow::Result<Option<Self>> {
        if !*config.get_enabled() {
            return Ok(None);
        }

        let log_file_path = if *config.get_log_file() {
            Some(format!(
                "./logs/nfa_sim_{}.txt",
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            ))
        } else {
            None
        };

        Logger::new(
            *config.get_log_level(),
            name,
            log_file_path.as_deref().map(Path::new),
        )
        .map(Some)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.writeln_to_file(&format!("[{}] {}: {}", level.tag(), self.name, message));

        if level.shown_at(&self.level) {
            eprintln!(
                "[{}] {} {}",
                level.colored_tag(),
                format!("{}:", self.name).dimmed(),
                message
            );
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    // A failing log file must not abort a run, so write errors are dropped.
    fn writeln_to_file(&self, line: &str) {
        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let _ = writeln!(f, "{}", line);
        }
    }

    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder::new(name, self)
    }
}

/// Logs a named group of fields as one message.
#[derive(Debug, Clone)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObjectBuilder<'a> {
    fn new(name: &'a str, logger: &'a Logger) -> Self {
        ObjectBuilder {
            logger,
            name,
            fields: vec![],
        }
    }

    pub fn add_field(mut self, name: &'a str, value: impl Display) -> Self {
        self.fields.push((name, value.to_string()));

        self
    }

    fn build(&self) -> String {
        let mut result = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            result.push_str(&format!("\n  {}: {}", name, value));
        }
        result.push_str("\n}");
        result
    }

    pub fn log(&self, level: LogLevel) {
        self.logger.log(level, &self.build());
    }
}

#[test]
fn test_level_threshold() {
    assert!(LogLevel::Error.shown_at(&LogLevel::Warn));
    assert!(LogLevel::Warn.shown_at(&LogLevel::Warn));
    assert!(!LogLevel::Info.shown_at(&LogLevel::Warn));
    assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
}

#[test]
fn test_object_builder() {
    let logger = Logger::new(LogLevel::Error, "test".to_string(), None).unwrap();
    let object = logger.object("NFA").add_field("states", 3).add_field("alphabet", "{a}");

    assert_eq!(object.build(), "NFA {\n  states: 3\n  alphabet: {a}\n}");
}
