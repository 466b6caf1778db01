use std::sync::Arc;

use crate::core::{CliApp, CommandContext};
use crate::model::{Action, Argument, CliOption, Command, CommandGroup};

pub struct CliBuilder {
    name: String,
    version: String,
    description: String,
    groups: Vec<CommandGroup>,
}

impl CliBuilder {
    pub fn new(name: &str, version: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            description: description.to_string(),
            groups: Vec::new(),
        }
    }

    /// Define a group of related commands
    pub fn group<F>(&mut self, name: &str, description: &str, block: F) -> &mut Self
    where
        F: FnOnce(&mut GroupBuilder),
    {
        let mut builder = GroupBuilder::new(name, description);
        block(&mut builder);
        self.groups.push(builder.build());
        self
    }

    pub fn build(self) -> CliApp {
        CliApp::new(self.name, self.version, self.description, self.groups)
    }
}

pub struct GroupBuilder {
    name: String,
    description: String,
    commands: Vec<Command>,
}

impl GroupBuilder {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            commands: Vec::new(),
        }
    }

    /// Define a command within this group
    pub fn command<F>(&mut self, name: &str, description: &str, block: F) -> &mut Self
    where
        F: FnOnce(&mut CommandBuilder),
    {
        let mut builder = CommandBuilder::new(name, description);
        block(&mut builder);
        self.commands.push(builder.build());
        self
    }

    pub fn build(self) -> CommandGroup {
        CommandGroup {
            name: self.name,
            description: self.description,
            commands: self.commands,
        }
    }
}

pub struct CommandBuilder {
    command: Command,
}

impl CommandBuilder {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            command: Command::new(name, description),
        }
    }

    /// Append a positional argument; declaration order is binding order
    pub fn argument(
        &mut self,
        name: &str,
        description: &str,
        required: bool,
        optional: bool,
        default: &str,
    ) -> &mut Self {
        self.arg(Argument {
            name: name.to_string(),
            description: description.to_string(),
            required,
            optional,
            default: default.to_string(),
        })
    }

    /// Append an option; colliding names are not checked
    pub fn option(
        &mut self,
        short: &str,
        long: &str,
        description: &str,
        default: &str,
        takes_value: bool,
    ) -> &mut Self {
        self.opt(CliOption {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
            default: default.to_string(),
            takes_value,
        })
    }

    pub fn arg(&mut self, argument: Argument) -> &mut Self {
        self.command.arguments.push(argument);
        self
    }

    pub fn opt(&mut self, option: CliOption) -> &mut Self {
        self.command.options.push(option);
        self
    }

    /// Replace the action run when the command executes
    pub fn action<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&mut CommandContext<'_>) -> miette::Result<()> + Send + Sync + 'static,
    {
        let action: Arc<dyn Action> = Arc::new(action);
        self.command.set_action(action);
        self
    }

    pub fn build(self) -> Command {
        self.command
    }
}

#[cfg(test)]
mod tests {
    use crate::dsl::cli;
    use crate::model::ExecutionStatus;
    use crate::output::OutputFormat;
    use crate::Outcome;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_nested_builders_preserve_order() {
        let app = cli("tool", "0.3.0", "Tool", |c| {
            c.group("file", "File operations", |g| {
                g.command("create", "Create", |cmd| {
                    cmd.argument("path", "File path", true, false, "");
                    cmd.argument("mode", "Mode", false, true, "644");
                    cmd.option("c", "content", "Content", "", true);
                    cmd.option("f", "force", "Force", "", false);
                });
                g.command("read", "Read", |_| {});
            });
            c.group("dir", "Directory operations", |_| {});
        });

        assert_eq!(app.name(), "tool");
        assert_eq!(app.version(), "0.3.0");
        let names: Vec<&str> = app.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["file", "dir"]);

        let create = app.find_group("file").unwrap().find_command("create").unwrap();
        assert_eq!(create.arguments[0].name, "path");
        assert!(create.arguments[0].is_mandatory());
        assert_eq!(create.arguments[1].default, "644");
        assert!(create.options[0].takes_value);
        assert!(!create.options[1].takes_value);
    }

    #[test]
    fn test_action_is_attached() {
        let counter = Arc::new(AtomicUsize::new(0));
        let inner = counter.clone();
        let app = cli("tool", "1.0.0", "", |c| {
            c.group("g", "", |g| {
                g.command("run", "", |cmd| {
                    cmd.action(move |_ctx| {
                        inner.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    });
                });
            });
        });

        let command = app.find_group("g").unwrap().find_command("run").unwrap();
        assert!(command.execute(&[], None, OutputFormat::Plain).is_completed());

        let outcome = app.dispatch(&["g".to_string(), "run".to_string()]);
        assert_eq!(outcome, Outcome::Executed(ExecutionStatus::Completed));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_duplicate_names_are_accepted() {
        let app = cli("tool", "1.0.0", "", |c| {
            c.group("g", "first", |_| {});
            c.group("g", "second", |_| {});
        });
        assert_eq!(app.groups().len(), 2);
        assert_eq!(app.find_group("g").unwrap().description, "first");
    }
}
