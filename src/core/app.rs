//! Application root and argument router

use std::ffi::OsString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;

use crate::config::AppConfig;
use crate::error::{LaretError, Result};
use crate::core::{help, logging, LogManager};
use crate::model::{CommandGroup, ExecutionStatus};
use crate::output::OutputFormat;
use crate::plugin::{Plugin, PluginManager};
use crate::ui;

/// What the router did with an argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    HelpShown,
    VersionShown,
    GroupHelpShown,
    GroupNotFound(String),
    CommandNotFound { group: String, command: String },
    Executed(ExecutionStatus),
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::HelpShown | Outcome::VersionShown | Outcome::GroupHelpShown => 0,
            Outcome::GroupNotFound(_) | Outcome::CommandNotFound { .. } => 2,
            Outcome::Executed(status) => match status {
                ExecutionStatus::Completed => 0,
                ExecutionStatus::Failed { .. } => 1,
                ExecutionStatus::ArgumentMissing { .. } => 2,
                ExecutionStatus::Rejected => 3,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}

/// Convert raw process arguments for routing
///
/// The first argument that is not valid UTF-8 is reported in lossy form.
pub fn utf8_args<I>(args: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| LaretError::InvalidArgument(raw.to_string_lossy().into_owned()))
        })
        .collect()
}

/// A complete CLI application: the schema plus registered plugins
pub struct CliApp {
    name: String,
    version: String,
    description: String,
    groups: Vec<CommandGroup>,
    plugins: PluginManager,
    quiet: AtomicBool,
    verbose: bool,
    output_format: OutputFormat,
    prettify: bool,
    log_manager: Option<LogManager>,
}

impl CliApp {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        groups: Vec<CommandGroup>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            groups,
            plugins: PluginManager::new(),
            quiet: AtomicBool::new(false),
            verbose: false,
            output_format: OutputFormat::Plain,
            prettify: true,
            log_manager: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// First group with the given name
    pub fn find_group(&self, name: &str) -> Option<&CommandGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    // ---- plugins ----

    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) -> &mut Self {
        self.plugins.register(plugin);
        self
    }

    pub fn register_plugins<I>(&mut self, plugins: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Plugin>>,
    {
        for plugin in plugins {
            self.plugins.register(plugin);
        }
        self
    }

    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        self.plugins.plugins()
    }

    pub fn has_plugins(&self) -> bool {
        !self.plugins.is_empty()
    }

    pub fn find_plugin(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.plugins().iter().find(|p| p.name() == name)
    }

    pub fn plugin_manager(&self) -> &PluginManager {
        &self.plugins
    }

    // ---- mode and configuration ----

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) -> &mut Self {
        self.output_format = format;
        self
    }

    /// Whether JSON output is indented
    pub fn prettify(&self) -> bool {
        self.prettify
    }

    pub fn set_prettify(&mut self, prettify: bool) -> &mut Self {
        self.prettify = prettify;
        self
    }

    pub fn set_log_manager(&mut self, manager: LogManager) -> &mut Self {
        self.log_manager = Some(manager);
        self
    }

    pub fn log_manager(&self) -> Option<&LogManager> {
        self.log_manager.as_ref()
    }

    /// Apply a loaded configuration; call before the first dispatch
    pub fn apply_config(&mut self, config: &AppConfig) -> &mut Self {
        match config.output.format.parse::<OutputFormat>() {
            Ok(format) => self.output_format = format,
            Err(err) => {
                tracing::warn!(format = %config.output.format, "{}", err);
            }
        }
        self.verbose = config.output.verbose;
        self.prettify = config.output.prettify;
        ui::set_colors(config.output.colorized);

        if let Some(manager) = self.log_manager.as_mut() {
            if let Some(level) = logging::parse_level(&config.logging.level) {
                manager.set_default_level(level);
            }
        }

        for name in &config.plugins.disabled {
            let removed = self.plugins.remove_named(name);
            if removed > 0 {
                tracing::debug!(plugin = %name, "plugin disabled by configuration");
            }
        }

        self
    }

    // ---- routing ----

    /// Full lifecycle: initialize plugins, dispatch, shut plugins down
    pub fn run(&self, args: &[String]) -> Outcome {
        self.enter_mode(args);

        if self.has_plugins() {
            tracing::info!(count = self.plugins.len(), "initializing plugins");
            self.plugins.initialize(self);
        }

        let outcome = self.dispatch(args);

        if self.has_plugins() {
            tracing::info!(count = self.plugins.len(), "shutting down plugins");
            self.plugins.shutdown();
        }

        outcome
    }

    /// Route one argument vector without the plugin lifecycle bracket
    pub fn dispatch(&self, args: &[String]) -> Outcome {
        self.enter_mode(args);

        let args: Vec<String> = args.iter().filter(|a| *a != "--quiet").cloned().collect();

        match args.first().map(String::as_str) {
            None | Some("--help") | Some("-h") => {
                println!("{}", help::app_help(self));
                Outcome::HelpShown
            }
            Some("--version") | Some("-v") => {
                println!("{} version {}", self.name, self.version);
                Outcome::VersionShown
            }
            Some(group) => self.route_group(group, &args),
        }
    }

    fn route_group(&self, group_name: &str, args: &[String]) -> Outcome {
        let Some(group) = self.find_group(group_name) else {
            tracing::error!(group = %group_name, "group not found");
            eprintln!("{}", help::group_not_found(group_name));
            println!("{}", help::app_help(self));
            return Outcome::GroupNotFound(group_name.to_string());
        };

        let command_name = match args.get(1).map(String::as_str) {
            None => {
                println!("{}", help::group_help(group));
                return Outcome::GroupHelpShown;
            }
            Some("-h") | Some("--help") if args.len() == 2 => {
                println!("{}", help::group_help(group));
                return Outcome::GroupHelpShown;
            }
            Some(name) => name,
        };

        let Some(command) = group.find_command(command_name) else {
            tracing::error!(group = %group_name, command = %command_name, "command not found");
            eprintln!("{}", help::command_not_found(command_name));
            eprintln!("{}", help::group_help(group));
            return Outcome::CommandNotFound {
                group: group_name.to_string(),
                command: command_name.to_string(),
            };
        };

        tracing::debug!(group = %group_name, command = %command_name, "dispatching");
        Outcome::Executed(command.execute(&args[2..], Some(self), self.output_format))
    }

    /// Record quiet mode for `args` and set the log level to match
    pub fn enter_mode(&self, args: &[String]) {
        let quiet = args.iter().any(|a| a == "--quiet")
            || args.first().map(String::as_str) == Some("completion");
        self.quiet.store(quiet, Ordering::Relaxed);

        if let Some(manager) = &self.log_manager {
            if quiet {
                manager.disable_logging();
            } else if self.verbose {
                manager.set_level(LevelFilter::DEBUG);
            } else {
                manager.enable_logging();
            }
        }
    }
}
