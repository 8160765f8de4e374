use atrium_core::plugin_system::host::{EventHandler, HandlerTable, HostApp};
use atrium_core::plugin_system::model::CallbackError;
use log::debug;

/// Host handed to plugin callback hooks when running from the command line.
///
/// Handlers are kept in a [`HandlerTable`] so the `startup` command can list
/// what each plugin registered.
#[derive(Debug)]
pub struct CliHost {
    handlers: HandlerTable,
}

impl CliHost {
    pub fn new() -> Self {
        Self {
            handlers: HandlerTable::new("cli"),
        }
    }

    /// Registered events with their owning plugin, sorted by event
    pub fn events(&self) -> Vec<(String, String)> {
        self.handlers.events()
    }
}

impl Default for CliHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostApp for CliHost {
    fn name(&self) -> &str {
        self.handlers.name()
    }

    fn register_handler(
        &mut self,
        plugin_id: &str,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), CallbackError> {
        debug!("[CLI] plugin '{}' handles '{}'", plugin_id, event);
        self.handlers.register_handler(plugin_id, event, handler)
    }
}
