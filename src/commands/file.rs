//! `laret file` commands

use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::Path;

use crate::core::CommandContext;
use crate::ui;

pub fn create(ctx: &mut CommandContext<'_>) -> Result<()> {
    let path = ctx.argument("path").to_string();
    let content = ctx.option("content");
    let force = ctx.option_bool("force");

    if Path::new(&path).exists() && !force {
        println!(
            "{}",
            ui::yellow_italic(&format!(
                "File already exists: {} (use --force to overwrite)",
                path
            ))
        );
        return Ok(());
    }

    fs::write(&path, content).into_diagnostic()?;
    tracing::info!(path = %path, bytes = content.len(), "file created");
    println!("{}", ui::green_bold(&format!("File created: {}", path)));
    Ok(())
}

pub fn delete(ctx: &mut CommandContext<'_>) -> Result<()> {
    let path = ctx.argument("path");

    if !Path::new(path).is_file() {
        return Err(miette::miette!("File not found: {}", path));
    }

    fs::remove_file(path)
        .map_err(|e| miette::miette!("Failed to delete file {}: {}", path, e))?;
    tracing::info!(path = %path, "file deleted");
    println!("{}", ui::green_bold(&format!("File deleted: {}", path)));
    Ok(())
}

pub fn read(ctx: &mut CommandContext<'_>) -> Result<()> {
    let path = ctx.argument("path");

    if !Path::new(path).is_file() {
        return Err(miette::miette!("File not found: {}", path));
    }

    let contents = fs::read_to_string(path).into_diagnostic()?;
    println!("{}", ui::cyan_bold(&format!("Reading: {}", path)));
    println!("{}", contents);
    Ok(())
}
