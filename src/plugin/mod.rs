//! Plugin system - lifecycle observers that gate and bracket command execution

pub mod logging;
pub mod manager;

pub use logging::LoggingPlugin;
pub use manager::PluginManager;

use thiserror::Error;

use crate::core::CliApp;
use crate::model::Command;

/// Failure raised inside a plugin hook
///
/// Hook failures never abort dispatch; the manager reports them and moves on
/// to the next plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("{0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// A lifecycle observer registered on a [`CliApp`]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "1.0.0"
    }

    /// Called once per run, before dispatch
    fn initialize(&self, _app: &CliApp) -> PluginResult<()> {
        Ok(())
    }

    /// Returning `Ok(false)` prevents the command's action from running
    fn before_execute(&self, _command: &Command) -> PluginResult<bool> {
        Ok(true)
    }

    fn after_execute(&self, _command: &Command) -> PluginResult<()> {
        Ok(())
    }

    fn shutdown(&self) -> PluginResult<()> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Plugin doubles that record hook invocations

    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Hook {
        Initialize,
        BeforeExecute,
        AfterExecute,
        Shutdown,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Behavior {
        Allow,
        Reject,
        Fail,
        Panic,
    }

    pub struct RecordingPlugin {
        name: String,
        behavior: Behavior,
        calls: Mutex<HashMap<Hook, usize>>,
    }

    impl RecordingPlugin {
        fn build(name: &str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                behavior,
                calls: Mutex::new(HashMap::new()),
            })
        }

        pub fn new(name: &str) -> Arc<Self> {
            Self::build(name, Behavior::Allow)
        }

        /// Returns false from `before_execute`
        pub fn rejecting(name: &str) -> Arc<Self> {
            Self::build(name, Behavior::Reject)
        }

        /// Returns an error from every hook
        pub fn failing(name: &str) -> Arc<Self> {
            Self::build(name, Behavior::Fail)
        }

        /// Panics in every hook
        pub fn panicking(name: &str) -> Arc<Self> {
            Self::build(name, Behavior::Panic)
        }

        pub fn count(&self, hook: Hook) -> usize {
            self.calls.lock().unwrap().get(&hook).copied().unwrap_or(0)
        }

        fn record(&self, hook: Hook) -> PluginResult<()> {
            *self.calls.lock().unwrap().entry(hook).or_insert(0) += 1;
            match self.behavior {
                Behavior::Fail => Err(PluginError::Failed(format!("{} failed", self.name))),
                Behavior::Panic => panic!("{} panicked", self.name),
                Behavior::Allow | Behavior::Reject => Ok(()),
            }
        }
    }

    impl Plugin for RecordingPlugin {
        fn name(&self) -> &str {
            &self.name
        }

        fn initialize(&self, _app: &CliApp) -> PluginResult<()> {
            self.record(Hook::Initialize)
        }

        fn before_execute(&self, _command: &Command) -> PluginResult<bool> {
            self.record(Hook::BeforeExecute)?;
            Ok(self.behavior != Behavior::Reject)
        }

        fn after_execute(&self, _command: &Command) -> PluginResult<()> {
            self.record(Hook::AfterExecute)
        }

        fn shutdown(&self) -> PluginResult<()> {
            self.record(Hook::Shutdown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Minimal;

    impl Plugin for Minimal {
        fn name(&self) -> &str {
            "minimal"
        }
    }

    #[test]
    fn test_default_hooks() {
        let plugin = Minimal;
        let app = CliApp::new("demo", "1.0.0", "", Vec::new());
        let command = Command::new("noop", "");

        assert_eq!(plugin.version(), "1.0.0");
        assert!(plugin.initialize(&app).is_ok());
        assert!(plugin.before_execute(&command).unwrap());
        assert!(plugin.after_execute(&command).is_ok());
        assert!(plugin.shutdown().is_ok());
    }
}
