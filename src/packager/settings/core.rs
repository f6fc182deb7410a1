//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

/// Default product name; the bundle is named after it.
pub const DEFAULT_PRODUCT_NAME: &str = "Bitcoin Compiler";

/// Default bundle identifier passed to PyInstaller in fallback mode.
pub const DEFAULT_BUNDLE_IDENTIFIER: &str = "com.bitcoincompiler.app";

/// Default entry-point script for the fallback invocation.
pub const DEFAULT_ENTRY_SCRIPT: &str = "compile_bitcoind_gui.py";

/// Default PyInstaller spec file looked up in the working directory.
pub const DEFAULT_SPEC_FILE: &str = "bitcoin_compiler.spec";

/// Default PyInstaller output directory.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Resolved settings for one packaging run.
///
/// Central configuration constructed via [`SettingsBuilder`]. Covers naming
/// (product, executable, bundle identifier) and the filesystem layout
/// PyInstaller is expected to produce.
///
/// # Examples
///
/// ```no_run
/// use bitcoin_compiler_packager::SettingsBuilder;
///
/// # fn example() -> bitcoin_compiler_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .product_name("Bitcoin Compiler")
///     .bundle_identifier("com.bitcoincompiler.app")
///     .build()?;
/// assert!(settings.app_bundle_path().ends_with("Bitcoin Compiler.app"));
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product name; the `.app` bundle carries it.
    product_name: String,

    /// Executable name under `Contents/MacOS`.
    executable_name: String,

    /// Reverse-DNS bundle identifier.
    bundle_identifier: String,

    /// Entry-point script for the fallback invocation.
    entry_script: PathBuf,

    /// PyInstaller spec file; preferred over flags when it exists.
    spec_file: PathBuf,

    /// Directory PyInstaller writes bundles into.
    dist_dir: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the executable name expected inside the bundle.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Returns the bundle identifier.
    pub fn bundle_identifier(&self) -> &str {
        &self.bundle_identifier
    }

    /// Returns the entry-point script path.
    pub fn entry_script(&self) -> &Path {
        &self.entry_script
    }

    /// Returns the spec file path.
    pub fn spec_file(&self) -> &Path {
        &self.spec_file
    }

    /// Returns the PyInstaller output directory.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the expected `.app` bundle path under the dist directory.
    pub fn app_bundle_path(&self) -> PathBuf {
        self.dist_dir.join(format!("{}.app", self.product_name))
    }

    /// Returns the expected main executable inside the bundle.
    pub fn executable_path(&self) -> PathBuf {
        self.app_bundle_path()
            .join("Contents")
            .join("MacOS")
            .join(&self.executable_name)
    }

    /// Returns the bundle's Info.plist path.
    pub fn info_plist_path(&self) -> PathBuf {
        self.app_bundle_path().join("Contents").join("Info.plist")
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        product_name: String,
        executable_name: String,
        bundle_identifier: String,
        entry_script: PathBuf,
        spec_file: PathBuf,
        dist_dir: PathBuf,
    ) -> Self {
        Self {
            product_name,
            executable_name,
            bundle_identifier,
            entry_script,
            spec_file,
            dist_dir,
        }
    }
}
