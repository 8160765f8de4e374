use atrium_core::plugin_system::host::HostApp;
use atrium_core::plugin_system::model::CallbackError;
use log::debug;
use serde_json::{Value, json};

use crate::constants::{DEFAULT_GREETING, GREET_EVENT, INCREMENT_EVENT, PLUGIN_ID};

/// Greet `name`, optionally with a custom `greeting`
pub fn greet(payload: &Value) -> Value {
    let name = payload.get("name").and_then(Value::as_str).unwrap_or("world");
    debug!("Greeting '{}'", name);
    let greeting = payload
        .get("greeting")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_GREETING);
    json!({ "message": format!("{}, {}!", greeting, name) })
}

/// Add one to `count`, saturating
pub fn increment(payload: &Value) -> Value {
    let count = payload.get("count").and_then(Value::as_u64).unwrap_or(0);
    json!({ "count": count.saturating_add(1) })
}

pub fn register_callbacks(host: &mut dyn HostApp) -> Result<(), CallbackError> {
    host.register_handler(PLUGIN_ID, GREET_EVENT, Box::new(greet))?;
    host.register_handler(PLUGIN_ID, INCREMENT_EVENT, Box::new(increment))
}
