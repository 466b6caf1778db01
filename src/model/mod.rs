//! Schema types - the declarative description of the CLI surface
//!
//! A [`CommandGroup`] owns an ordered list of [`Command`]s. Each command owns
//! its positional [`Argument`]s (bound in declaration order), its
//! [`CliOption`] flags, and the [`Action`] invoked once parsing succeeds.

pub mod argument;
pub mod command;
pub mod group;
pub mod option;

pub use argument::Argument;
pub use command::{Action, Bindings, Command, ExecutionStatus};
pub use group::CommandGroup;
pub use option::CliOption;
