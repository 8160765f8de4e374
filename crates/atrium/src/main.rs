mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use atrium_core::plugin_system::loader::qualified_name;
use atrium_core::plugin_system::structure::validate_structure;
use atrium_core::storage::ConfigDocument;
use atrium_core::{
    ConfigStore, EnabledSet, Error, HostSettings, PluginCatalog, PluginLoader, PluginManager,
    PluginRegistry, Result,
};
use clap::{Args, Parser, Subcommand};
use log::debug;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::cli::CliHost;

/// Atrium: a plugin host with discoverable, versioned plugins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Host settings file (.json, .yaml, .yml or .toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Directory scanned for plugin units
    #[arg(long, global = true)]
    plugins_dir: Option<PathBuf>,

    /// Directory of per-plugin config files
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Host version plugins are checked against
    #[arg(long, global = true)]
    app_version: Option<String>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Explicit enabled selection; omit to use the configured or default one
#[derive(Args, Debug, Clone)]
struct EnabledArgs {
    /// Plugin ids to enable (comma separated or repeated). Pass the flag
    /// without ids for an explicitly empty selection.
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    enabled: Option<Vec<String>>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect discovered plugins
    Plugins {
        #[command(subcommand)]
        command: PluginsCommand,
    },
    /// Print the navigation sections of the enabled plugins as JSON
    Nav(EnabledArgs),
    /// Render a single page standalone
    Render {
        /// The id of the page to render
        page_id: String,
    },
    /// Export or import enabled-plugin selections
    Enabled {
        #[command(subcommand)]
        command: EnabledCommand,
    },
    /// Manage per-plugin configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Run plugin startup against the command-line host
    Startup(EnabledArgs),
}

#[derive(Subcommand, Debug)]
enum PluginsCommand {
    /// List registered plugins and their status
    List(EnabledArgs),
    /// Check the structure of a plugin unit directory
    Check {
        /// The plugin unit directory
        dir: PathBuf,
    },
    /// Print the dependency load order
    Order,
    /// Validate every plugin against the host version and its dependencies
    Validate,
}

#[derive(Subcommand, Debug)]
enum EnabledCommand {
    /// Print the enabled selection as an interchange document
    Export(EnabledArgs),
    /// Read an interchange document and print the resulting selection
    Import {
        /// The document to import
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print a plugin's configuration
    Show { plugin: String },
    /// Print a single setting
    Get { plugin: String, key: String },
    /// Store a single setting; VALUE is parsed as JSON, or kept as a string
    Set {
        plugin: String,
        key: String,
        value: String,
    },
    /// Delete a plugin's configuration
    Delete { plugin: String },
    /// Validate a plugin's configuration against its schema
    Validate { plugin: String },
}

fn init_logging(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Settings file merged with command-line overrides
fn load_settings(args: &CliArgs) -> Result<HostSettings> {
    let mut settings = match &args.settings {
        Some(path) => HostSettings::load(path)?,
        None => HostSettings::default(),
    };
    if let Some(dir) = &args.plugins_dir {
        settings.plugins_dir = dir.clone();
    }
    if let Some(dir) = &args.config_dir {
        settings.config_dir = Some(dir.clone());
    }
    if let Some(version) = &args.app_version {
        settings.app_version = Some(version.clone());
    }
    Ok(settings)
}

/// Factories of the bundled plugins, keyed under `namespace`
fn plugin_catalog(namespace: &str) -> PluginCatalog {
    let mut catalog = PluginCatalog::new();
    catalog
        .register_fn(&qualified_name(namespace, "core"), atrium_plugin_core::get_plugin)
        .register_fn(&qualified_name(namespace, "data"), atrium_plugin_data::get_plugin)
        .register_fn(&qualified_name(namespace, "example"), atrium_plugin_example::get_plugin);
    catalog
}

fn build_manager(settings: &HostSettings) -> PluginManager {
    let loader = PluginLoader::new(plugin_catalog(&settings.namespace))
        .require_structure(settings.require_structure);
    let mut manager = PluginManager::new(
        PluginRegistry::new(),
        ConfigStore::new(settings.resolved_config_dir()),
        settings.resolved_app_version(),
    );
    manager.load_plugins_from_directory(&loader, &settings.plugins_dir, &settings.namespace);
    manager
}

/// Explicit selection from the command line, else from the settings file
fn requested_set(args: &EnabledArgs, settings: &HostSettings) -> Option<EnabledSet> {
    args.enabled
        .as_ref()
        .or(settings.enabled_plugins.as_ref())
        .map(|ids| ids.iter().cloned().collect())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Other(format!("JSON output failed: {}", e)))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        atrium_core::storage::StorageSystemError::io(e, "read_file", path.to_path_buf()).into()
    })
}

fn run_plugins(command: PluginsCommand, settings: &HostSettings) -> Result<ExitCode> {
    match command {
        PluginsCommand::List(enabled) => {
            let manager = build_manager(settings);
            let registry = manager.registry();
            let requested = requested_set(&enabled, settings);
            let status = registry.get_plugin_status(requested.as_ref());
            if status.is_empty() {
                println!("No plugins registered.");
                return Ok(ExitCode::SUCCESS);
            }
            println!("{:<12} {:<20} {:<10} {:<9} {}", "ID", "NAME", "VERSION", "STATUS", "LOCKED");
            for row in status {
                println!(
                    "{:<12} {:<20} {:<10} {:<9} {}",
                    row.metadata.id,
                    row.metadata.name,
                    row.metadata.version,
                    if row.enabled { "enabled" } else { "disabled" },
                    if row.metadata.locked { "yes" } else { "no" },
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        PluginsCommand::Check { dir } => {
            let report = validate_structure(&dir);
            if report.is_valid() {
                println!("{}", report);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}: {}", dir.display(), report);
                Ok(ExitCode::FAILURE)
            }
        }
        PluginsCommand::Order => {
            let manager = build_manager(settings);
            let resolution = manager.registry().resolve();
            for id in resolution.ids() {
                println!("{}", id);
            }
            for e in &resolution.errors {
                eprintln!("{}", e);
            }
            Ok(if resolution.is_complete() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        PluginsCommand::Validate => {
            let manager = build_manager(settings);
            let reports = manager.registry().validate_all(manager.app_version());
            let mut failed = false;
            for report in reports {
                if report.is_valid() {
                    println!("{}: ok", report.plugin_id);
                } else {
                    failed = true;
                    println!("{}: {}", report.plugin_id, report.errors.join("; "));
                }
            }
            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
    }
}

fn run_enabled(command: EnabledCommand, settings: &HostSettings) -> Result<ExitCode> {
    let manager = build_manager(settings);
    let registry = manager.registry();
    match command {
        EnabledCommand::Export(enabled) => {
            let requested = requested_set(&enabled, settings);
            let document = registry.export_enabled_plugins(requested.as_ref());
            println!("{}", document.to_json()?);
        }
        EnabledCommand::Import { file } => {
            let enabled = registry.import_enabled_plugins(&read_file(&file)?)?;
            for id in enabled {
                println!("{}", id);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_config(command: ConfigCommand, settings: &HostSettings) -> Result<ExitCode> {
    let store = ConfigStore::new(settings.resolved_config_dir());
    match command {
        ConfigCommand::Show { plugin } => {
            println!("{}", to_pretty_json(&store.load_config(&plugin))?);
        }
        ConfigCommand::Get { plugin, key } => match store.get_setting(&plugin, &key) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("No setting '{}' for plugin '{}'", key, plugin);
                return Ok(ExitCode::FAILURE);
            }
        },
        ConfigCommand::Set { plugin, key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            if !store.set_setting(&plugin, &key, value) {
                eprintln!("Failed to save configuration for plugin '{}'", plugin);
                return Ok(ExitCode::FAILURE);
            }
        }
        ConfigCommand::Delete { plugin } => {
            if !store.delete_config(&plugin) {
                eprintln!("Failed to delete configuration for plugin '{}'", plugin);
                return Ok(ExitCode::FAILURE);
            }
        }
        ConfigCommand::Validate { plugin } => {
            let manager = build_manager(settings);
            let Some(descriptor) = manager.registry().get_plugin(&plugin) else {
                eprintln!("Unknown plugin '{}'", plugin);
                return Ok(ExitCode::FAILURE);
            };
            let config: ConfigDocument = store.load_config(&plugin);
            let (ok, errors) = store.validate_config(&descriptor, &config);
            if !ok {
                for e in errors {
                    eprintln!("{}", e);
                }
                return Ok(ExitCode::FAILURE);
            }
            println!("{}: configuration is valid", plugin);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run(args: CliArgs) -> Result<ExitCode> {
    let settings = load_settings(&args)?;
    debug!("Using settings: {:?}", settings);

    match args.command {
        Commands::Plugins { command } => run_plugins(command, &settings),
        Commands::Nav(enabled) => {
            let manager = build_manager(&settings);
            let registry = manager.registry();
            let enabled = registry.normalize_enabled_plugins(requested_set(&enabled, &settings).as_ref());
            println!("{}", to_pretty_json(&registry.build_navigation(&enabled))?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Render { page_id } => {
            let manager = build_manager(&settings);
            let page = manager
                .registry()
                .get_plugins()
                .iter()
                .find_map(|plugin| plugin.page(&page_id).map(|page| page.render()));
            match page {
                Some(content) => {
                    println!("{}", content);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("Unknown page '{}'", page_id);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Enabled { command } => run_enabled(command, &settings),
        Commands::Config { command } => run_config(command, &settings),
        Commands::Startup(enabled) => {
            let manager = build_manager(&settings);
            let requested = requested_set(&enabled, &settings);
            let mut host = CliHost::new();
            let report = manager.startup(&mut host, requested.as_ref())?;

            println!("Load order: {}", report.load_order.join(", "));
            let enabled: Vec<&str> = report.enabled.iter().map(String::as_str).collect();
            println!("Enabled: {}", enabled.join(", "));
            for id in &report.excluded {
                println!("Excluded: {}", id);
            }
            for (event, owner) in host.events() {
                println!("  {} -> {}", event, owner);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
