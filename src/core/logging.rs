//! Runtime control of the global log level
//!
//! The subscriber is a `tracing-subscriber` fmt layer behind a reload layer
//! holding a [`LevelFilter`], so quiet and verbose modes can be switched after
//! the subscriber is installed.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, Registry};

use crate::config::LoggingConfig;
use crate::error::{LaretError, Result};

/// Parse a level name such as "INFO" or "debug"
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

pub struct LogManager {
    handle: Option<reload::Handle<LevelFilter, Registry>>,
    level: Mutex<LevelFilter>,
    default_level: LevelFilter,
}

impl LogManager {
    /// A manager not bound to any installed subscriber
    pub fn new(level: LevelFilter) -> Self {
        Self {
            handle: None,
            level: Mutex::new(level),
            default_level: level,
        }
    }

    /// Install the global subscriber described by `config`
    ///
    /// Writes to stderr, or appends to `config.file` when one is set.
    pub fn install(config: &LoggingConfig) -> Result<Self> {
        let level = parse_level(&config.level).unwrap_or(LevelFilter::INFO);
        let (filter, handle) = reload::Layer::new(level);

        let to_file = !config.file.trim().is_empty();
        let writer = if to_file {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.file.trim())?;
            BoxMakeWriter::new(Mutex::new(file))
        } else {
            BoxMakeWriter::new(std::io::stderr)
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_ansi(!to_file),
            )
            .try_init()
            .map_err(|e| LaretError::Logging(e.to_string()))?;

        Ok(Self {
            handle: Some(handle),
            level: Mutex::new(level),
            default_level: level,
        })
    }

    pub fn disable_logging(&self) {
        self.set_level(LevelFilter::OFF);
    }

    /// Restore the configured default level
    pub fn enable_logging(&self) {
        self.set_level(self.default_level);
    }

    pub fn set_level(&self, level: LevelFilter) {
        if let Ok(mut current) = self.level.lock() {
            *current = level;
        }
        if let Some(handle) = &self.handle {
            if let Err(err) = handle.reload(level) {
                eprintln!("Failed to change log level: {}", err);
            }
        }
    }

    /// Replace the default restored by [`LogManager::enable_logging`] and apply it
    pub fn set_default_level(&mut self, level: LevelFilter) {
        self.default_level = level;
        self.set_level(level);
    }

    pub fn level(&self) -> LevelFilter {
        self.level
            .lock()
            .map(|level| *level)
            .unwrap_or(self.default_level)
    }

    pub fn default_level(&self) -> LevelFilter {
        self.default_level
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}
