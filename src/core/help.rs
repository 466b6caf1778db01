//! Help text rendering
//!
//! Every renderer returns a `String` so callers decide the stream. Groups,
//! commands, arguments and options are rendered in declaration order, which
//! keeps output stable across calls.

use console::style;

use crate::core::CliApp;
use crate::model::{Command, CommandGroup};

const RULE: &str = "========================================";

/// Full application help: banner, usage, command tree and global options
pub fn app_help(app: &CliApp) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", style(RULE).cyan().bold()));
    out.push_str(&format!(
        "{}\n",
        style(format!("{} v{}", app.name(), app.version()))
            .cyan()
            .bold()
    ));
    if !app.description().is_empty() {
        out.push_str(&format!("{}\n", app.description()));
    }
    out.push_str(&format!("{}\n\n", style(RULE).cyan().bold()));

    out.push_str(&format!("{}\n", style("USAGE:").bold()));
    out.push_str(&format!(
        "  {} [COMMAND] [SUBCOMMAND] [OPTIONS]\n\n",
        app.name()
    ));

    out.push_str(&format!("{}\n", style("COMMANDS:").bold()));
    for group in app.groups() {
        out.push_str(&format!(
            "  {} {}\n",
            style(format!("{:<20}", group.name)).green(),
            group.description
        ));
        for command in &group.commands {
            out.push_str(&format!(
                "    {} {}\n",
                style(format!("{:<18}", command.name)).blue(),
                command.description
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", style("GLOBAL OPTIONS:").bold()));
    out.push_str("  -h, --help              Show this help message\n");
    out.push_str("  -v, --version           Show version\n");
    out.push_str("  --quiet                 Suppress all logging output\n\n");

    out.push_str("For more information on a command group, use:\n");
    out.push_str(&format!("  {} [COMMAND] --help", app.name()));

    out
}

/// Group header followed by its padded command list
pub fn group_help(group: &CommandGroup) -> String {
    let mut out = format!("Group: {} - {}\n\nCommands:", group.name, group.description);
    for command in &group.commands {
        out.push_str(&format!("\n  {:<20} {}", command.name, command.description));
    }
    out
}

/// Command name, description, arguments and options
pub fn command_help(command: &Command) -> String {
    let mut out = format!("Command: {}", command.name);
    if !command.description.is_empty() {
        out.push_str(&format!("\nDescription: {}", command.description));
    }

    if !command.arguments.is_empty() {
        out.push_str("\n\nArguments:");
        for argument in &command.arguments {
            let requirement = if argument.is_mandatory() {
                "required"
            } else {
                "optional"
            };
            out.push_str(&format!(
                "\n  {:<20} {} - {}",
                argument.name, requirement, argument.description
            ));
        }
    }

    if !command.options.is_empty() {
        out.push_str("\n\nOptions:");
        for option in &command.options {
            out.push_str(&format!(
                "\n  {:<25} {}",
                option.spelling(),
                option.description
            ));
        }
    }

    out
}

pub fn argument_missing(name: &str) -> String {
    style(format!("Error: Required argument '{}' not provided", name))
        .red()
        .bold()
        .to_string()
}

pub fn group_not_found(name: &str) -> String {
    style(format!("Group not found: {}", name))
        .red()
        .bold()
        .to_string()
}

pub fn command_not_found(name: &str) -> String {
    style(format!("Command not found: {}", name))
        .red()
        .bold()
        .to_string()
}
