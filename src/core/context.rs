//! Per-invocation execution context passed to command actions

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::CliApp;
use crate::model::{Bindings, Command};
use crate::output::{OutputError, OutputFormat};

/// Bound arguments and options for one command execution
///
/// Created fresh by the dispatcher for every execution and dropped when the
/// action returns.
pub struct CommandContext<'a> {
    command: &'a Command,
    app: Option<&'a CliApp>,
    output: OutputFormat,
    /// Positional values keyed by argument name
    pub arguments: BTreeMap<String, String>,
    /// Option values keyed by the option's long name
    pub options: BTreeMap<String, String>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        command: &'a Command,
        app: Option<&'a CliApp>,
        output: OutputFormat,
        bindings: Bindings,
    ) -> Self {
        Self {
            command,
            app,
            output,
            arguments: bindings.arguments,
            options: bindings.options,
        }
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    pub fn app(&self) -> Option<&'a CliApp> {
        self.app
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
    }

    /// Bound argument value, or "" when absent
    pub fn argument(&self, name: &str) -> &str {
        self.arguments.get(name).map(String::as_str).unwrap_or("")
    }

    /// Bound argument value, falling back to the declared default
    pub fn argument_or_default(&self, name: &str) -> &str {
        match self.arguments.get(name) {
            Some(value) => value,
            None => self
                .command
                .find_argument(name)
                .map(|a| a.default.as_str())
                .unwrap_or(""),
        }
    }

    /// Bound option value, or "" when absent
    pub fn option(&self, name: &str) -> &str {
        self.options.get(name).map(String::as_str).unwrap_or("")
    }

    /// Bound option value, falling back to the declared default
    pub fn option_or_default(&self, name: &str) -> &str {
        match self.options.get(name) {
            Some(value) => value,
            None => self
                .command
                .find_long(name)
                .map(|o| o.default.as_str())
                .unwrap_or(""),
        }
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// True only when the bound value is "true" (any case)
    pub fn option_bool(&self, name: &str) -> bool {
        self.options
            .get(name)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Bound value as an integer, 0 when absent or not a number
    pub fn option_int(&self, name: &str) -> i64 {
        self.options
            .get(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Render data through this invocation's output strategy
    ///
    /// JSON is prettified unless the owning application turned it off.
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, OutputError> {
        let prettify = self.app.map_or(true, CliApp::prettify);
        self.output.render(data, prettify)
    }
}
