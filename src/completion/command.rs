//! Mirror of the application schema as a `clap::Command` tree
//!
//! The tree exists only to feed `clap_complete`; dispatch never parses with it.

use std::collections::HashSet;

use clap::{Arg, ArgAction};

use crate::core::CliApp;
use crate::model::{Command, CommandGroup};

/// Build `app` as a clap command with one subcommand per group and one
/// nested subcommand per command
///
/// Names that would collide inside one clap command are skipped after their
/// first occurrence, matching the dispatcher's first-match lookups.
pub fn to_clap_command(app: &CliApp) -> clap::Command {
    let mut root = clap::Command::new(app.name().to_string())
        .version(app.version().to_string())
        .about(app.description().to_string())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Show version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress all logging output")
                .global(true)
                .action(ArgAction::SetTrue),
        );

    let mut seen = HashSet::new();
    for group in app.groups() {
        if seen.insert(group.name.as_str()) {
            root = root.subcommand(group_command(group));
        }
    }
    root
}

fn group_command(group: &CommandGroup) -> clap::Command {
    let mut cmd = clap::Command::new(group.name.clone())
        .about(group.description.clone())
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .help("Show group help")
                .action(ArgAction::SetTrue),
        );

    let mut seen = HashSet::new();
    for command in &group.commands {
        if seen.insert(command.name.as_str()) {
            cmd = cmd.subcommand(leaf_command(command));
        }
    }
    cmd
}

fn leaf_command(command: &Command) -> clap::Command {
    let mut cmd = clap::Command::new(command.name.clone())
        .about(command.description.clone())
        .disable_help_flag(true);

    // ids, longs and shorts share clap's uniqueness checks; "quiet" is global
    let mut ids: HashSet<String> = HashSet::from(["quiet".to_string()]);
    let mut shorts: HashSet<char> = HashSet::new();

    for argument in &command.arguments {
        if !ids.insert(argument.name.clone()) {
            continue;
        }
        cmd = cmd.arg(
            Arg::new(argument.name.clone())
                .value_name(argument.name.to_uppercase())
                .help(argument.description.clone())
                .action(ArgAction::Set),
        );
    }

    for option in &command.options {
        if option.long.is_empty() || !ids.insert(option.long.clone()) {
            continue;
        }
        let mut arg = Arg::new(option.long.clone())
            .long(option.long.clone())
            .help(option.description.clone());

        let mut chars = option.short.chars();
        if let (Some(short), None) = (chars.next(), chars.next()) {
            if shorts.insert(short) {
                arg = arg.short(short);
            }
        }

        arg = if option.takes_value {
            arg.value_name(option.long.to_uppercase()).action(ArgAction::Set)
        } else {
            arg.action(ArgAction::SetTrue)
        };
        cmd = cmd.arg(arg);
    }
    cmd
}
