//! Laret: a declarative command-group CLI framework
//!
//! Describe a tree of groups and commands with scoped builders, then hand the
//! process arguments to [`core::CliApp::run`]. The router resolves the group
//! and command, the dispatcher binds positional arguments and flags into a
//! [`core::CommandContext`], and registered plugins gate and bracket every
//! command execution.

pub mod commands;
pub mod completion;
pub mod config;
pub mod core;
pub mod dsl;
pub mod error;
pub mod model;
pub mod output;
pub mod plugin;
pub mod ui;

pub use crate::core::{CliApp, CommandContext, Outcome};
pub use crate::dsl::cli;
pub use crate::error::LaretError;
pub use crate::model::{Argument, CliOption, Command, CommandGroup, ExecutionStatus};
pub use crate::plugin::{Plugin, PluginError, PluginManager};
