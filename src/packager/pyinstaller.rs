//! PyInstaller discovery and invocation planning.

use crate::packager::error::{Context, Result};
use crate::packager::settings::Settings;
use std::path::{Path, PathBuf};

/// Locates `pyinstaller` on PATH.
pub fn find_pyinstaller() -> Option<PathBuf> {
    match which::which("pyinstaller") {
        Ok(path) => {
            log::debug!("Found pyinstaller at: {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("pyinstaller not found in PATH: {}", e);
            None
        }
    }
}

/// Probes `pyinstaller --version`.
///
/// A failed probe is advisory; callers still treat the tool as present.
pub async fn pyinstaller_version(path: &Path) -> Option<String> {
    match tokio::process::Command::new(path)
        .arg("--version")
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            log::debug!("pyinstaller --version reported {}", version);
            Some(version)
        }
        Ok(output) => {
            log::warn!(
                "pyinstaller found at {} but --version failed (exit code: {:?}). Stderr: {}",
                path.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
            None
        }
        Err(e) => {
            log::warn!(
                "pyinstaller found at {} but failed to execute: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// How PyInstaller will be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Build from the declarative spec file; it owns all bundle settings
    SpecFile(PathBuf),

    /// No spec file present; construct the bundle from command-line flags
    CommandLine,
}

impl Invocation {
    /// Chooses the invocation mode for `settings`.
    ///
    /// The spec file wins whenever it exists in the working directory.
    pub fn choose(settings: &Settings) -> Self {
        if settings.spec_file().exists() {
            Invocation::SpecFile(settings.spec_file().to_path_buf())
        } else {
            Invocation::CommandLine
        }
    }

    /// Builds the exact PyInstaller argument vector for this invocation.
    ///
    /// Spec-file mode passes no bundle-construction flags; the spec already
    /// carries them. Fallback mode requests a windowed onedir bundle with
    /// the configured name, identifier, and entry script.
    pub fn args(&self, settings: &Settings) -> Result<Vec<String>> {
        match self {
            Invocation::SpecFile(spec) => {
                let spec = spec.to_str().context("spec file path is not valid UTF-8")?;
                Ok(vec![
                    spec.to_string(),
                    "--clean".to_string(),
                    "--noconfirm".to_string(),
                ])
            }
            Invocation::CommandLine => {
                let entry = settings
                    .entry_script()
                    .to_str()
                    .context("entry script path is not valid UTF-8")?;
                Ok(vec![
                    "--clean".to_string(),
                    "--noconfirm".to_string(),
                    "--windowed".to_string(),
                    "--onedir".to_string(),
                    "--name".to_string(),
                    settings.product_name().to_string(),
                    "--osx-bundle-identifier".to_string(),
                    settings.bundle_identifier().to_string(),
                    entry.to_string(),
                ])
            }
        }
    }
}
