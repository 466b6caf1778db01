//! Scoped builders for declaring an application
//!
//! ```no_run
//! use laret::cli;
//!
//! let app = cli("tool", "1.0.0", "Example tool", |c| {
//!     c.group("file", "File operations", |g| {
//!         g.command("read", "Read file contents", |cmd| {
//!             cmd.argument("path", "File path", true, false, "");
//!             cmd.action(|ctx| {
//!                 println!("{}", ctx.argument("path"));
//!                 Ok(())
//!             });
//!         });
//!     });
//! });
//! ```

mod builder;

pub use builder::{CliBuilder, CommandBuilder, GroupBuilder};

use crate::core::CliApp;

/// Build an application from a scoped definition block
pub fn cli<F>(name: &str, version: &str, description: &str, block: F) -> CliApp
where
    F: FnOnce(&mut CliBuilder),
{
    let mut builder = CliBuilder::new(name, version, description);
    block(&mut builder);
    builder.build()
}
