use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::plugin_system::model::Plugin;
use crate::plugin_system::version::check_version_compatibility;

/// Error that can occur when resolving dependencies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    /// Dependency cycle detected among known plugins
    #[error("Circular dependency detected: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),

    /// Plugins that could not be ordered because a dependency is not present
    #[error("Cannot resolve dependencies for: {} (missing: {})", .stuck.join(", "), .missing.join(", "))]
    Unresolved {
        stuck: Vec<String>,
        missing: Vec<String>,
    },

    /// A plugin declares dependencies that are not available
    #[error("Plugin '{plugin}' missing dependencies: {}", .missing.join(", "))]
    MissingPlugin {
        plugin: String,
        missing: Vec<String>,
    },
}

/// Outcome of dependency resolution.
///
/// A cycle yields an empty `ordered` list. A missing external dependency
/// yields the plugins that could be ordered plus an `Unresolved` error.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub ordered: Vec<Arc<Plugin>>,
    pub errors: Vec<DependencyError>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_cycle(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, DependencyError::CyclicDependency(_)))
    }

    /// Ordered plugin ids
    pub fn ids(&self) -> Vec<String> {
        self.ordered.iter().map(|p| p.id.clone()).collect()
    }
}

/// Advisory validation result for one plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub plugin_id: String,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Walk dependency edges depth-first and return the first cycle found,
/// as a path that starts and ends with the same id.
fn find_cycle<'a>(order: &[&'a str], graph: &HashMap<&'a str, Vec<&'a str>>) -> Option<Vec<String>> {
    fn visit<'a>(
        id: &'a str,
        graph: &HashMap<&'a str, Vec<&'a str>>,
        stack: &mut Vec<&'a str>,
        on_stack: &mut HashSet<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Option<Vec<String>> {
        if on_stack.contains(id) {
            let start = stack.iter().position(|s| *s == id).unwrap_or(0);
            let mut cycle: Vec<String> = stack[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(id.to_string());
            return Some(cycle);
        }
        if done.contains(id) {
            return None;
        }

        stack.push(id);
        on_stack.insert(id);
        for dep in graph.get(id).into_iter().flatten() {
            if let Some(cycle) = visit(*dep, graph, stack, on_stack, done) {
                return Some(cycle);
            }
        }
        stack.pop();
        on_stack.remove(id);
        done.insert(id);
        None
    }

    let mut done = HashSet::new();
    for id in order {
        let mut stack = Vec::new();
        let mut on_stack = HashSet::new();
        if let Some(cycle) = visit(*id, graph, &mut stack, &mut on_stack, &mut done) {
            return Some(cycle);
        }
    }
    None
}

/// Compute a load order in which every plugin follows its dependencies.
///
/// Fails closed on a cycle among the given plugins: the order is empty and a
/// `CyclicDependency` error is reported. Plugins depending on ids absent from
/// the input cannot be placed; they are left out and reported as
/// `Unresolved` while everything else is still ordered.
pub fn resolve_dependencies(plugins: &[Arc<Plugin>]) -> Resolution {
    let mut index: HashMap<&str, &Arc<Plugin>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for plugin in plugins {
        if index.contains_key(plugin.id.as_str()) {
            warn!("Ignoring duplicate plugin id '{}' during resolution", plugin.id);
            continue;
        }
        index.insert(plugin.id.as_str(), plugin);
        order.push(plugin.id.as_str());
    }

    // Edges only between known plugins; unknown ids cannot form a cycle
    let graph: HashMap<&str, Vec<&str>> = order
        .iter()
        .map(|id| {
            let deps = index[id]
                .dependencies
                .iter()
                .map(String::as_str)
                .filter(|dep| index.contains_key(dep))
                .collect();
            (*id, deps)
        })
        .collect();

    if let Some(cycle) = find_cycle(&order, &graph) {
        warn!("Circular dependency detected: {}", cycle.join(" -> "));
        return Resolution {
            ordered: Vec::new(),
            errors: vec![DependencyError::CyclicDependency(cycle)],
        };
    }

    let mut resolved: HashSet<&str> = HashSet::new();
    let mut ordered: Vec<Arc<Plugin>> = Vec::new();
    let mut unresolved: Vec<&str> = order;

    while !unresolved.is_empty() {
        let (ready, pending): (Vec<&str>, Vec<&str>) = unresolved.iter().partition(|id| {
            index[*id]
                .dependencies
                .iter()
                .all(|dep| resolved.contains(dep.as_str()))
        });

        if ready.is_empty() {
            let missing: Vec<String> = pending
                .iter()
                .flat_map(|id| index[id].dependencies.iter())
                .filter(|dep| !index.contains_key(dep.as_str()))
                .fold(Vec::new(), |mut acc, dep| {
                    if !acc.contains(dep) {
                        acc.push(dep.clone());
                    }
                    acc
                });
            let error = DependencyError::Unresolved {
                stuck: pending.iter().map(|id| id.to_string()).collect(),
                missing,
            };
            warn!("{}", error);
            return Resolution {
                ordered,
                errors: vec![error],
            };
        }

        debug!("Resolved dependency pass: {:?}", ready);
        for id in &ready {
            resolved.insert(*id);
            ordered.push(Arc::clone(index[id]));
        }
        unresolved = pending;
    }

    Resolution {
        ordered,
        errors: Vec::new(),
    }
}

/// Check that every dependency of `plugin` is present in `available`
pub fn check_dependencies(
    plugin: &Plugin,
    available: &HashMap<String, Arc<Plugin>>,
) -> Result<(), DependencyError> {
    let missing: Vec<String> = plugin
        .dependencies
        .iter()
        .filter(|dep| !available.contains_key(dep.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DependencyError::MissingPlugin {
            plugin: plugin.name.clone(),
            missing,
        })
    }
}

/// Run the version and dependency-presence checks, reporting both failures
/// together rather than stopping at the first.
pub fn validate_plugin(
    plugin: &Plugin,
    available: &HashMap<String, Arc<Plugin>>,
    app_version: &str,
) -> ValidationReport {
    let mut errors = Vec::new();

    if let Err(reason) = check_version_compatibility(plugin, app_version) {
        errors.push(reason);
    }

    if let Err(e) = check_dependencies(plugin, available) {
        errors.push(e.to_string());
    }

    ValidationReport {
        plugin_id: plugin.id.clone(),
        errors,
    }
}
