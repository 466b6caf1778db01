//! Command definition and the token dispatcher
//!
//! [`Command::execute`] is the single place where a command runs. It follows
//! a fixed lifecycle:
//!
//! ```text
//! PENDING -> before_execute gate -> { REJECTED | ARGS_INVALID | RUNNING } -> after_execute -> DONE
//! ```
//!
//! `after_execute` runs on every path, including rejection by a plugin and a
//! missing required argument. Faults raised by the action (an `Err` or a
//! panic) are reported to stderr and never propagate past this boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::argument::Argument;
use super::option::CliOption;
use crate::core::{help, panic_message, CliApp, CommandContext};
use crate::output::OutputFormat;
use crate::ui;

/// The capability invoked once a command's tokens are bound
pub trait Action: Send + Sync {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> miette::Result<()>;
}

impl<F> Action for F
where
    F: Fn(&mut CommandContext<'_>) -> miette::Result<()> + Send + Sync,
{
    fn execute(&self, ctx: &mut CommandContext<'_>) -> miette::Result<()> {
        self(ctx)
    }
}

fn noop(_ctx: &mut CommandContext<'_>) -> miette::Result<()> {
    Ok(())
}

/// How a single command execution ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// The action ran to completion
    Completed,
    /// A plugin's `before_execute` returned false
    Rejected,
    /// A required, non-optional argument was not bound
    ArgumentMissing { argument: String },
    /// The action returned an error or panicked
    Failed { message: String },
}

impl ExecutionStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, ExecutionStatus::Completed)
    }
}

/// Raw values bound from a token sequence
///
/// Options are keyed by their long name regardless of the spelling used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pub arguments: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
}

/// A named unit of executable behavior within a group
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: String,
    pub arguments: Vec<Argument>,
    pub options: Vec<CliOption>,
    action: Arc<dyn Action>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Command {
    /// A command with no arguments, no options and a no-op action
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments: Vec::new(),
            options: Vec::new(),
            action: Arc::new(noop),
        }
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_option(mut self, option: CliOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> miette::Result<()> + Send + Sync + 'static,
    {
        self.action = Arc::new(action);
        self
    }

    pub(crate) fn set_action(&mut self, action: Arc<dyn Action>) {
        self.action = action;
    }

    /// First option whose long name matches
    pub fn find_long(&self, long: &str) -> Option<&CliOption> {
        self.options.iter().find(|o| o.long == long)
    }

    /// First option whose short name matches
    pub fn find_short(&self, short: &str) -> Option<&CliOption> {
        self.options.iter().find(|o| o.short == short)
    }

    /// Declared argument by name
    pub fn find_argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Bind a token sequence in one left-to-right scan
    ///
    /// Unknown flags, tokens like `-10` and positionals beyond the declared
    /// arguments are dropped without error.
    pub fn parse(&self, tokens: &[String]) -> Bindings {
        let mut bindings = Bindings::default();
        let mut arg_index = 0;
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i].as_str();
            let next = tokens.get(i + 1);

            let option = if let Some(long) = token.strip_prefix("--") {
                self.find_long(long)
            } else if token.starts_with('-') && token.chars().count() == 2 {
                self.find_short(&token[1..])
            } else {
                if !token.starts_with('-') {
                    if let Some(argument) = self.arguments.get(arg_index) {
                        bindings
                            .arguments
                            .insert(argument.name.clone(), token.to_string());
                        arg_index += 1;
                    }
                }
                None
            };

            if let Some(option) = option {
                if bind_option(option, next, &mut bindings.options) {
                    i += 1;
                }
            }

            i += 1;
        }

        bindings
    }

    /// First mandatory argument with no bound value
    pub fn missing_argument(&self, bindings: &Bindings) -> Option<&Argument> {
        self.arguments
            .iter()
            .filter(|a| a.is_mandatory())
            .find(|a| !bindings.arguments.contains_key(&a.name))
    }

    /// Parse `tokens`, validate, and run the action bracketed by plugin hooks
    pub fn execute(
        &self,
        tokens: &[String],
        app: Option<&CliApp>,
        output: OutputFormat,
    ) -> ExecutionStatus {
        let plugins = app
            .map(|app| app.plugin_manager())
            .filter(|manager| !manager.is_empty());

        let status = match plugins {
            Some(manager) if !manager.before_execute(self) => {
                tracing::warn!(command = %self.name, "plugin rejected execution");
                ui::warning(&format!(
                    "Plugin rejected execution of command: {}",
                    self.name
                ));
                ExecutionStatus::Rejected
            }
            _ => self.bind_and_run(tokens, app, output),
        };

        if let Some(manager) = plugins {
            manager.after_execute(self);
        }

        status
    }

    fn bind_and_run(
        &self,
        tokens: &[String],
        app: Option<&CliApp>,
        output: OutputFormat,
    ) -> ExecutionStatus {
        let bindings = self.parse(tokens);

        if let Some(argument) = self.missing_argument(&bindings) {
            tracing::error!(command = %self.name, argument = %argument.name, "required argument missing");
            eprintln!("{}", help::argument_missing(&argument.name));
            eprintln!("{}", help::command_help(self));
            return ExecutionStatus::ArgumentMissing {
                argument: argument.name.clone(),
            };
        }

        let mut ctx = CommandContext::new(self, app, output, bindings);
        tracing::debug!(command = %self.name, "running action");

        match panic::catch_unwind(AssertUnwindSafe(|| self.action.execute(&mut ctx))) {
            Ok(Ok(())) => ExecutionStatus::Completed,
            Ok(Err(report)) => {
                tracing::error!(command = %self.name, error = %report, "action failed");
                eprintln!("{}", ui::red_bold(&format!("Error: {}", report)));
                eprintln!("{:?}", report);
                ExecutionStatus::Failed {
                    message: report.to_string(),
                }
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(command = %self.name, error = %message, "action panicked");
                eprintln!("{}", ui::red_bold(&format!("Error: {}", message)));
                ExecutionStatus::Failed { message }
            }
        }
    }
}

/// Bind one option; returns true when the following token was consumed
fn bind_option(
    option: &CliOption,
    next: Option<&String>,
    options: &mut BTreeMap<String, String>,
) -> bool {
    match next {
        Some(value) if option.takes_value && !value.starts_with('-') => {
            options.insert(option.long.clone(), value.clone());
            true
        }
        _ => {
            options.insert(option.long.clone(), "true".to_string());
            false
        }
    }
}
