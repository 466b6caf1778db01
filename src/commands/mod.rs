//! Command groups of the `laret` binary
//!
//! Each action is a plain function taking the bound [`CommandContext`], wired
//! into the schema by [`build_app`].
//!
//! [`CommandContext`]: crate::core::CommandContext

pub mod dir;
pub mod file;
pub mod shell;

use crate::core::CliApp;
use crate::dsl::cli;

pub const APP_NAME: &str = "laret";

pub fn build_app() -> CliApp {
    cli(
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        "Laret - a declarative command-group CLI framework",
        |c| {
            c.group("completion", "Shell completion", |g| {
                g.command("bash", "Generate bash completion script", |cmd| {
                    cmd.action(shell::bash);
                });
                g.command("zsh", "Generate zsh completion script", |cmd| {
                    cmd.action(shell::zsh);
                });
                g.command("fish", "Generate fish completion script", |cmd| {
                    cmd.action(shell::fish);
                });
                g.command("powershell", "Generate PowerShell completion script", |cmd| {
                    cmd.action(shell::powershell);
                });
                g.command("install", "Install completion script", |cmd| {
                    cmd.argument(
                        "shell",
                        "Shell type (bash, zsh, fish, or powershell)",
                        true,
                        false,
                        "",
                    );
                    cmd.action(shell::install);
                });
            });

            c.group("file", "File operations", |g| {
                g.command("create", "Create a new file", |cmd| {
                    cmd.argument("path", "File path", true, false, "");
                    cmd.option("c", "content", "File content", "", true);
                    cmd.option("f", "force", "Overwrite if exists", "", false);
                    cmd.action(file::create);
                });
                g.command("delete", "Delete a file", |cmd| {
                    cmd.argument("path", "File path", true, false, "");
                    cmd.option("f", "force", "Force deletion without confirmation", "", false);
                    cmd.action(file::delete);
                });
                g.command("read", "Read file contents", |cmd| {
                    cmd.argument("path", "File path", true, false, "");
                    cmd.action(file::read);
                });
            });

            c.group("dir", "Directory operations", |g| {
                g.command("list", "List directory contents", |cmd| {
                    cmd.argument("path", "Directory path", false, true, ".");
                    cmd.option("l", "long", "Long format", "", false);
                    cmd.option("a", "all", "Show hidden files", "", false);
                    cmd.action(dir::list);
                });
                g.command("create", "Create a new directory", |cmd| {
                    cmd.argument("path", "Directory path", true, false, "");
                    cmd.option("p", "parents", "Create parent directories", "", false);
                    cmd.action(dir::create);
                });
            });
        },
    )
}
