use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PLUGINS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../plugins");

/// The binary pointed at the bundled plugins and a scratch config dir
fn atrium(config_dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("atrium")?;
    cmd.arg("--plugins-dir")
        .arg(PLUGINS_DIR)
        .arg("--config-dir")
        .arg(config_dir);
    Ok(cmd)
}

#[test]
fn test_plugins_list() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["plugins", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID"))
        .stdout(predicate::str::is_match(r"core\s+Core\s+1\.0\.0\s+enabled\s+yes")?)
        .stdout(predicate::str::is_match(r"example\s+Example\s+\S+\s+disabled\s+no")?);

    Ok(())
}

#[test]
fn test_plugins_list_explicit_selection_keeps_locked() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["plugins", "list", "--enabled", "example"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"core\s+\S+\s+\S+\s+enabled")?)
        .stdout(predicate::str::is_match(r"data\s+\S+\s+\S+\s+disabled")?)
        .stdout(predicate::str::is_match(r"example\s+\S+\s+\S+\s+enabled")?);

    Ok(())
}

#[test]
fn test_plugins_order_puts_core_first() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["plugins", "order"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("core\n"))
        .stdout(predicate::str::contains("data\n"))
        .stdout(predicate::str::contains("example\n"));

    Ok(())
}

#[test]
fn test_plugins_check() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["plugins", "check"])
        .arg(Path::new(PLUGINS_DIR).join("core"))
        .assert()
        .success()
        .stdout(predicate::str::contains(": ok"));

    let incomplete = TempDir::new()?;
    std::fs::create_dir(incomplete.path().join("src"))?;
    std::fs::write(incomplete.path().join("src").join("lib.rs"), "")?;

    atrium(config.path())?
        .args(["plugins", "check"])
        .arg(incomplete.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required files"))
        .stderr(predicate::str::contains("callbacks"));

    Ok(())
}

#[test]
fn test_plugins_validate_old_host() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["plugins", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core: ok"));

    atrium(config.path())?
        .args(["--app-version", "0.0.1", "plugins", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("data:"))
        .stdout(predicate::str::contains("data: ok").not());

    Ok(())
}

#[test]
fn test_nav_follows_enabled_selection() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .arg("nav")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Core\""))
        .stdout(predicate::str::contains("\"label\": \"Advanced\""))
        .stdout(predicate::str::contains("\"label\": \"Plugins\"").not());

    atrium(config.path())?
        .args(["nav", "--enabled", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Plugins\""))
        .stdout(predicate::str::contains("\"label\": \"Examples\""))
        .stdout(predicate::str::contains("\"label\": \"Data\"").not());

    Ok(())
}

#[test]
fn test_render() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["render", "example-hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, world"));

    atrium(config.path())?
        .args(["render", "no-such-page"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown page 'no-such-page'"));

    Ok(())
}

#[test]
fn test_enabled_export_and_import() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["enabled", "export", "--enabled", "example,ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled_plugins\""))
        .stdout(predicate::str::contains("\"core\""))
        .stdout(predicate::str::contains("\"example\""))
        .stdout(predicate::str::contains("ghost").not());

    let file = config.path().join("selection.json");
    std::fs::write(&file, r#"{"plugins": ["data", "ghost"]}"#)?;

    atrium(config.path())?
        .args(["enabled", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout("core\ndata\n");

    std::fs::write(&file, r#"{"enabled_plugins": "data"}"#)?;

    atrium(config.path())?
        .args(["enabled", "import"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    Ok(())
}

#[test]
fn test_config_roundtrip_and_validation() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["config", "validate", "example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: greeting"));

    atrium(config.path())?
        .args(["config", "set", "example", "greeting", "Hi"])
        .assert()
        .success();
    atrium(config.path())?
        .args(["config", "set", "example", "repeat", "3"])
        .assert()
        .success();
    assert!(config.path().join("example.json").is_file());

    atrium(config.path())?
        .args(["config", "get", "example", "greeting"])
        .assert()
        .success()
        .stdout("\"Hi\"\n");

    atrium(config.path())?
        .args(["config", "validate", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("example: configuration is valid"));

    atrium(config.path())?
        .args(["config", "set", "example", "repeat", "2.5"])
        .assert()
        .success();
    atrium(config.path())?
        .args(["config", "validate", "example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Field 'repeat' has type number, expected integer"));

    atrium(config.path())?
        .args(["config", "delete", "example"])
        .assert()
        .success();
    atrium(config.path())?
        .args(["config", "get", "example", "greeting"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_startup_registers_enabled_callbacks() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;

    atrium(config.path())?
        .args(["startup", "--enabled", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Load order: core"))
        .stdout(predicate::str::contains("Enabled: core, example"))
        .stdout(predicate::str::contains("core.ping -> core"))
        .stdout(predicate::str::contains("example.greet -> example"))
        .stdout(predicate::str::contains("data.summary").not());

    Ok(())
}

#[test]
fn test_startup_reads_settings_file() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let settings = config.path().join("atrium.json");
    std::fs::write(&settings, r#"{"enabled_plugins": ["data"]}"#)?;

    atrium(config.path())?
        .arg("--settings")
        .arg(&settings)
        .arg("startup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enabled: core, data\n"));

    Ok(())
}

#[test]
fn test_unknown_subcommand_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("atrium")?;
    cmd.arg("frobnicate").assert().code(2);

    Ok(())
}
