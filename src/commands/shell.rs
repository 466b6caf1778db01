//! `laret completion` commands

use miette::Result;

use crate::completion::{generate_completion, install_completion, Shell};
use crate::core::{CliApp, CommandContext};
use crate::ui;

fn app<'a>(ctx: &CommandContext<'a>) -> Result<&'a CliApp> {
    ctx.app()
        .ok_or_else(|| miette::miette!("Application not available"))
}

pub fn bash(ctx: &mut CommandContext<'_>) -> Result<()> {
    println!("{}", generate_completion(app(ctx)?, Shell::Bash));
    Ok(())
}

pub fn zsh(ctx: &mut CommandContext<'_>) -> Result<()> {
    println!("{}", generate_completion(app(ctx)?, Shell::Zsh));
    Ok(())
}

pub fn fish(ctx: &mut CommandContext<'_>) -> Result<()> {
    println!("{}", generate_completion(app(ctx)?, Shell::Fish));
    Ok(())
}

pub fn powershell(ctx: &mut CommandContext<'_>) -> Result<()> {
    println!("{}", generate_completion(app(ctx)?, Shell::PowerShell));
    Ok(())
}

pub fn install(ctx: &mut CommandContext<'_>) -> Result<()> {
    let shell: Shell = ctx.argument("shell").parse()?;
    let path = install_completion(app(ctx)?, shell)?;

    println!(
        "{}",
        ui::green_bold(&format!("Completion installed: {}", path.display()))
    );
    if shell == Shell::PowerShell {
        println!("\nAdd to your $PROFILE:");
        println!(". '{}'", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_app;
    use crate::model::ExecutionStatus;
    use crate::Outcome;

    #[test]
    fn test_generation_requires_app() {
        let app = build_app();
        let command = app
            .find_group("completion")
            .unwrap()
            .find_command("bash")
            .unwrap();

        let status = command.execute(&[], None, crate::output::OutputFormat::Plain);
        assert!(matches!(status, ExecutionStatus::Failed { .. }));

        let outcome = app.dispatch(&["completion".to_string(), "bash".to_string()]);
        assert_eq!(outcome, Outcome::Executed(ExecutionStatus::Completed));
    }

    #[test]
    fn test_install_rejects_unknown_shell() {
        let app = build_app();
        let outcome = app.dispatch(&[
            "completion".to_string(),
            "install".to_string(),
            "tcsh".to_string(),
        ]);
        assert!(matches!(
            outcome,
            Outcome::Executed(ExecutionStatus::Failed { ref message }) if message.contains("tcsh")
        ));
    }
}
