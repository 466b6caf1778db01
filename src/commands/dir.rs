//! `laret dir` commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::CommandContext;
use crate::output::OutputFormat;
use crate::ui;

#[derive(Debug, Serialize)]
pub struct Entry {
    pub name: String,
    pub directory: bool,
    pub size: u64,
}

/// Listing rendered through non-plain output formats
#[derive(Debug, Serialize)]
pub struct Listing {
    pub path: String,
    pub entries: Vec<Entry>,
}

/// Entries of `path` sorted by name; dot-files only when `all`
pub fn entries(path: &Path, all: bool) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !all && name.starts_with('.') {
            continue;
        }
        let metadata = entry.metadata()?;
        entries.push(Entry {
            name,
            directory: metadata.is_dir(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub fn list(ctx: &mut CommandContext<'_>) -> Result<()> {
    let path = match ctx.argument_or_default("path") {
        "" => ".".to_string(),
        path => path.to_string(),
    };
    let long = ctx.option_bool("long");
    let all = ctx.option_bool("all");

    if !Path::new(&path).is_dir() {
        return Err(miette::miette!("Not a directory: {}", path));
    }

    let entries = entries(Path::new(&path), all).into_diagnostic()?;

    if ctx.output_format() != OutputFormat::Plain {
        let listing = Listing { path, entries };
        println!("{}", ctx.render(&listing).into_diagnostic()?);
        return Ok(());
    }

    println!("{}", ui::cyan_bold(&format!("Listing: {}", path)));
    for entry in &entries {
        match (long, entry.directory) {
            (true, true) => println!("{}  {}", ui::blue_bold("d"), entry.name),
            (true, false) => println!("- {} B {}", entry.size, entry.name),
            (false, true) => println!("{}", ui::blue_bold(&format!("{}/", entry.name))),
            (false, false) => println!("{}", entry.name),
        }
    }
    Ok(())
}

pub fn create(ctx: &mut CommandContext<'_>) -> Result<()> {
    let path = ctx.argument("path");
    let parents = ctx.option_bool("parents");

    let created = if parents {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };

    created.map_err(|e| miette::miette!("Failed to create directory {}: {}", path, e))?;
    tracing::info!(path = %path, parents, "directory created");
    println!("{}", ui::green_bold(&format!("Directory created: {}", path)));
    Ok(())
}
