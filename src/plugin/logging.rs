//! Built-in plugin that prints execution banners with timing to stderr

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use chrono::Local;

use super::{Plugin, PluginError, PluginResult};
use crate::core::CliApp;
use crate::model::Command;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const RULE: &str = "─────────────────────────────────────────────";

#[derive(Default)]
pub struct LoggingPlugin {
    started: Mutex<HashMap<String, Instant>>,
}

impl LoggingPlugin {
    pub const NAME: &'static str = "LoggingPlugin";

    pub fn new() -> Self {
        Self::default()
    }

    fn timestamp() -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    fn started(&self) -> PluginResult<std::sync::MutexGuard<'_, HashMap<String, Instant>>> {
        self.started
            .lock()
            .map_err(|_| PluginError::Failed("timing table poisoned".to_string()))
    }
}

/// Execution-start banner for a command
pub fn start_banner(command: &Command, timestamp: &str) -> String {
    let mut lines = vec![
        format!("┌{}┐", RULE),
        "│    COMMAND EXECUTION START".to_string(),
        format!("├{}┤", RULE),
        format!("│ Timestamp: {}", timestamp),
        format!("│ Command:   {}", command.name),
        format!("│ Description: {}", command.description),
        format!("│ Arguments: {}", command.arguments.len()),
        format!("│ Options:   {}", command.options.len()),
    ];

    if !command.arguments.is_empty() {
        lines.push("│".to_string());
        lines.push("│ Arguments:".to_string());
        for argument in &command.arguments {
            let requirement = if argument.is_mandatory() {
                "REQUIRED"
            } else {
                "OPTIONAL"
            };
            lines.push(format!(
                "│   • {:<20} [{}] {}",
                argument.name, requirement, argument.description
            ));
        }
    }

    if !command.options.is_empty() {
        lines.push("│".to_string());
        lines.push("│ Options:".to_string());
        for option in &command.options {
            let takes_value = if option.takes_value {
                "(takes value) "
            } else {
                ""
            };
            lines.push(format!(
                "│   • {:<20} {}{}",
                option.spelling(),
                takes_value,
                option.description
            ));
        }
    }

    lines.push(format!("└{}┘", RULE));
    lines.join("\n")
}

/// Execution-end banner with elapsed milliseconds
pub fn end_banner(command: &Command, timestamp: &str, elapsed_ms: u128) -> String {
    [
        format!("┌{}┐", RULE),
        "│   COMMAND EXECUTION COMPLETED".to_string(),
        format!("├{}┤", RULE),
        format!("│   Timestamp: {}", timestamp),
        format!("│   Command:   {}", command.name),
        format!("│   Duration:  {}ms", elapsed_ms),
        format!("└{}┘", RULE),
    ]
    .join("\n")
}

impl Plugin for LoggingPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn initialize(&self, app: &CliApp) -> PluginResult<()> {
        eprintln!(
            "Logging plugin initialized for app: {} v{}",
            app.name(),
            app.version()
        );
        eprintln!("Total command groups: {}", app.groups().len());
        for group in app.groups() {
            eprintln!(
                "Group '{}': {} commands",
                group.name,
                group.commands.len()
            );
            for command in &group.commands {
                eprintln!("    {}: {}", command.name, command.description);
            }
        }
        Ok(())
    }

    fn before_execute(&self, command: &Command) -> PluginResult<bool> {
        self.started()?.insert(command.name.clone(), Instant::now());
        eprintln!("{}", start_banner(command, &Self::timestamp()));
        Ok(true)
    }

    fn after_execute(&self, command: &Command) -> PluginResult<()> {
        let elapsed = self
            .started()?
            .remove(&command.name)
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        eprintln!("{}", end_banner(command, &Self::timestamp(), elapsed));
        Ok(())
    }

    fn shutdown(&self) -> PluginResult<()> {
        eprintln!("LoggingPlugin shutting down");
        Ok(())
    }
}
