//! Ordered plugin registry with fault-isolated hook dispatch

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::{Plugin, PluginResult};
use crate::core::{panic_message, CliApp};
use crate::model::Command;
use crate::ui;

/// Plugins in registration order
///
/// Duplicates (the same instance or the same name) are kept. A hook that
/// returns an error or panics is reported and treated as a no-op for that
/// plugin; it never stops the remaining plugins.
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> &mut Self {
        tracing::debug!(plugin = %plugin.name(), version = %plugin.version(), "plugin registered");
        self.plugins.push(plugin);
        self
    }

    /// Remove every plugin with the given name, returning how many were removed
    pub fn remove_named(&mut self, name: &str) -> usize {
        let before = self.plugins.len();
        self.plugins.retain(|p| p.name() != name);
        before - self.plugins.len()
    }

    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn initialize(&self, app: &CliApp) {
        for plugin in &self.plugins {
            guarded(plugin.as_ref(), "initialize", || plugin.initialize(app));
        }
    }

    /// False as soon as one plugin rejects; later plugins are not consulted
    ///
    /// A faulting plugin counts as having allowed execution.
    pub fn before_execute(&self, command: &Command) -> bool {
        for plugin in &self.plugins {
            let allowed = guarded(plugin.as_ref(), "before_execute", || {
                plugin.before_execute(command)
            })
            .unwrap_or(true);

            if !allowed {
                tracing::info!(plugin = %plugin.name(), command = %command.name, "execution rejected");
                return false;
            }
        }
        true
    }

    pub fn after_execute(&self, command: &Command) {
        for plugin in &self.plugins {
            guarded(plugin.as_ref(), "after_execute", || {
                plugin.after_execute(command)
            });
        }
    }

    pub fn shutdown(&self) {
        for plugin in &self.plugins {
            guarded(plugin.as_ref(), "shutdown", || plugin.shutdown());
        }
    }
}

/// Run one hook, containing both returned errors and panics
fn guarded<T>(
    plugin: &dyn Plugin,
    hook: &str,
    call: impl FnOnce() -> PluginResult<T>,
) -> Option<T> {
    let message = match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(err)) => err.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    tracing::warn!(plugin = %plugin.name(), hook, error = %message, "plugin hook failed");
    ui::warning(&format!(
        "Exception in plugin {} {}: {}",
        plugin.name(),
        hook,
        message
    ));
    None
}
