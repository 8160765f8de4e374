use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::storage::error::{StorageResult, StorageSystemError};
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

// Helper function to create PathBuf from str for tests
fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

#[test]
fn test_write_and_read_string() -> StorageResult<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.write_string(&p("nested/dir/settings.json"), "{\"a\": 1}")?;

    assert!(provider.is_file(&p("nested/dir/settings.json")));
    assert!(provider.is_dir(&p("nested/dir")));
    assert_eq!(provider.read_to_string(&p("nested/dir/settings.json"))?, "{\"a\": 1}");
    Ok(())
}

#[test]
fn test_write_replaces_contents() -> StorageResult<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.write_string(&p("value.txt"), "first version, longer")?;
    provider.write_string(&p("value.txt"), "second")?;
    assert_eq!(provider.read_to_string(&p("value.txt"))?, "second");

    // No temporary files are left behind next to the target
    let entries = provider.read_dir(&p(""))?;
    assert_eq!(entries, vec![p("value.txt")]);
    Ok(())
}

#[test]
fn test_missing_file_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    assert!(!provider.exists(&p("absent.json")));
    assert!(matches!(
        provider.read_to_string(&p("absent.json")),
        Err(StorageSystemError::FileNotFound(_))
    ));
    assert!(matches!(
        provider.remove_file(&p("absent.json")),
        Err(StorageSystemError::FileNotFound(_))
    ));
}

#[test]
fn test_remove_file() -> StorageResult<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.write_string(&p("gone.json"), "{}")?;
    provider.remove_file(&p("gone.json"))?;
    assert!(!provider.exists(&p("gone.json")));
    Ok(())
}

#[test]
fn test_read_dir_returns_relative_sorted_paths() -> StorageResult<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("configs")).unwrap();
    fs::write(root.join("configs/b.json"), "{}").unwrap();
    fs::write(root.join("configs/a.json"), "{}").unwrap();

    let provider = LocalStorageProvider::new(root.to_path_buf());
    let entries = provider.read_dir(&p("configs"))?;
    assert_eq!(entries, vec![p("configs/a.json"), p("configs/b.json")]);
    Ok(())
}

#[test]
fn test_absolute_paths_bypass_base() -> StorageResult<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(PathBuf::new());
    let target = temp_dir.path().join("absolute.txt");

    provider.write_string(&target, "here")?;
    assert_eq!(fs::read_to_string(&target).unwrap(), "here");
    assert_eq!(provider.name(), "local");
    Ok(())
}
