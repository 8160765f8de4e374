//! Host application touchpoint used by plugin callback hooks.
//!
//! The plugin system never inspects what a plugin registers; it only hands
//! the host to each active plugin's hook. [`HandlerTable`] is a ready-made
//! host implementation that keeps handlers keyed by event name.
use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::plugin_system::model::CallbackError;

/// Handler a plugin attaches to a host event
pub type EventHandler = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Interface the host application exposes to plugin callback hooks
pub trait HostApp {
    /// Get the name of this host
    fn name(&self) -> &str;

    /// Attach a handler for `event`, owned by `plugin_id`
    fn register_handler(
        &mut self,
        plugin_id: &str,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), CallbackError>;
}

struct Registration {
    owner: String,
    handler: EventHandler,
}

/// Handler table keyed by event name. Registering the same event twice is an
/// error so that two plugins cannot silently shadow each other.
#[derive(Default)]
pub struct HandlerTable {
    name: String,
    handlers: BTreeMap<String, Registration>,
}

impl HandlerTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handlers: BTreeMap::new(),
        }
    }

    /// Registered event names with their owning plugin, sorted by event
    pub fn events(&self) -> Vec<(String, String)> {
        self.handlers
            .iter()
            .map(|(event, reg)| (event.clone(), reg.owner.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke the handler for `event`, if one is registered
    pub fn dispatch(&self, event: &str, payload: &Value) -> Option<Value> {
        self.handlers.get(event).map(|reg| (reg.handler)(payload))
    }
}

impl HostApp for HandlerTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn register_handler(
        &mut self,
        plugin_id: &str,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), CallbackError> {
        if let Some(existing) = self.handlers.get(event) {
            return Err(format!(
                "event '{}' already handled by plugin '{}'",
                event, existing.owner
            )
            .into());
        }
        self.handlers.insert(
            event.to_string(),
            Registration {
                owner: plugin_id.to_string(),
                handler,
            },
        );
        Ok(())
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("name", &self.name)
            .field("events", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
