//! Optional `packager.toml` configuration file.
//!
//! The working directory may carry a `packager.toml` overriding the stock
//! naming and paths. CLI flags override the file; a missing file means
//! defaults.

use crate::error::{CliError, PackagerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the working directory.
pub const CONFIG_FILE_NAME: &str = "packager.toml";

/// Raw values read from `packager.toml`. All keys are optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    /// Product name; the bundle is created as `<product_name>.app`.
    pub product_name: Option<String>,

    /// Executable name inside `Contents/MacOS`.
    pub executable: Option<String>,

    /// Bundle identifier handed to PyInstaller in fallback mode.
    pub identifier: Option<String>,

    /// Entry-point script for the fallback invocation.
    pub entry: Option<PathBuf>,

    /// PyInstaller spec file name.
    pub spec: Option<PathBuf>,

    /// PyInstaller output directory.
    pub dist: Option<PathBuf>,
}

/// Loads `packager.toml` from `dir` when present.
///
/// A missing file is not an error; an unreadable or malformed one is.
pub fn load(dir: &Path) -> Result<Option<FileConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(&path).map_err(|e| {
        PackagerError::Cli(CliError::ExecutionFailed {
            command: "read_packager_toml".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    let config: FileConfig = toml::from_str(&raw)?;
    log::debug!("Loaded configuration from {}", path.display());

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_file_is_none() {
        let dir = TempDir::new().expect("temp dir");
        let loaded = load(dir.path()).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_leaves_other_keys_unset() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "product_name = \"Custom App\"\ndist = \"out\"\n",
        )
        .expect("write config");

        let config = load(dir.path()).expect("load").expect("some config");
        assert_eq!(config.product_name.as_deref(), Some("Custom App"));
        assert_eq!(config.dist, Some(PathBuf::from("out")));
        assert!(config.executable.is_none());
        assert!(config.identifier.is_none());
        assert!(config.entry.is_none());
        assert!(config.spec.is_none());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "product_name = [unclosed\n")
            .expect("write config");

        assert!(load(dir.path()).is_err());
    }
}
