//! Path utilities for locating workspace files and building config fixtures.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the shipped catalogue config directory (`config/edr`).
pub fn catalog_config_dir() -> PathBuf {
    workspace_root().join("config").join("edr")
}

/// Creates a temporary config directory holding the given files.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
///
/// # Arguments
///
/// * `files` - `(file name, contents)` pairs written into the directory
pub fn temp_config_dir(files: &[(&str, &str)]) -> io::Result<tempfile::TempDir> {
    let dir = tempfile::Builder::new().prefix("edr_config_").tempdir()?;
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents)?;
    }
    Ok(dir)
}
