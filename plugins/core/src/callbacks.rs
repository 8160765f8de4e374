use atrium_core::plugin_system::host::HostApp;
use atrium_core::plugin_system::model::CallbackError;
use log::debug;
use serde_json::{Value, json};

use crate::constants::{DEFAULT_THEME, PING_EVENT, PLUGIN_ID, THEME_EVENT, THEMES};

/// Reply to a liveness probe
pub fn ping(_payload: &Value) -> Value {
    json!({ "status": "ok", "plugin": PLUGIN_ID })
}

/// Resolve a theme request; unknown themes fall back to the default
pub fn theme(payload: &Value) -> Value {
    let requested = payload.get("theme").and_then(Value::as_str).unwrap_or(DEFAULT_THEME);
    let theme = if THEMES.contains(&requested) {
        requested
    } else {
        DEFAULT_THEME
    };
    json!({ "theme": theme })
}

pub fn register_callbacks(host: &mut dyn HostApp) -> Result<(), CallbackError> {
    debug!("Registering core callbacks on '{}'", host.name());
    host.register_handler(PLUGIN_ID, PING_EVENT, Box::new(ping))?;
    host.register_handler(PLUGIN_ID, THEME_EVENT, Box::new(theme))?;
    Ok(())
}
