use atrium_core::plugin_system::host::HostApp;
use atrium_core::plugin_system::model::CallbackError;
use log::warn;
use serde_json::{Value, json};

use crate::constants::{PLUGIN_ID, SUMMARY_EVENT};

/// Summary statistics of the numbers under `values`; other entries are ignored
pub fn summary(payload: &Value) -> Value {
    let values: Vec<f64> = payload
        .get("values")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();

    if values.is_empty() {
        warn!("data.summary called without numeric values");
        return json!({ "count": 0 });
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    json!({
        "count": count,
        "mean": sum / count as f64,
        "min": min,
        "max": max,
    })
}

pub fn register_callbacks(host: &mut dyn HostApp) -> Result<(), CallbackError> {
    host.register_handler(PLUGIN_ID, SUMMARY_EVENT, Box::new(summary))
}
