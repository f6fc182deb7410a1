//! Builder for constructing Settings.

use super::core::{
    DEFAULT_BUNDLE_IDENTIFIER, DEFAULT_DIST_DIR, DEFAULT_ENTRY_SCRIPT, DEFAULT_PRODUCT_NAME,
    DEFAULT_SPEC_FILE,
};
use super::Settings;
use crate::bail;
use crate::config::FileConfig;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every field defaults to the stock Bitcoin Compiler values, so
/// `SettingsBuilder::new().build()` describes a plain packaging run.
///
/// # Examples
///
/// ```no_run
/// use bitcoin_compiler_packager::SettingsBuilder;
///
/// # fn example() -> bitcoin_compiler_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .product_name("Bitcoin Compiler")
///     .entry_script("compile_bitcoind_gui.py")
///     .dist_dir("dist")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    product_name: Option<String>,
    executable_name: Option<String>,
    bundle_identifier: Option<String>,
    entry_script: Option<PathBuf>,
    spec_file: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the product name.
    ///
    /// Default: "Bitcoin Compiler"
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Sets the executable name inside `Contents/MacOS`.
    ///
    /// Default: the product name with whitespace removed.
    pub fn executable_name(mut self, name: impl Into<String>) -> Self {
        self.executable_name = Some(name.into());
        self
    }

    /// Sets the bundle identifier.
    ///
    /// Default: "com.bitcoincompiler.app"
    pub fn bundle_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.bundle_identifier = Some(identifier.into());
        self
    }

    /// Sets the entry-point script used by the fallback invocation.
    ///
    /// Default: `compile_bitcoind_gui.py`
    pub fn entry_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the spec file to prefer when it exists.
    ///
    /// Default: `bitcoin_compiler.spec`
    pub fn spec_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.spec_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the PyInstaller output directory.
    ///
    /// Default: `dist`
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Fills unset fields from an optional `packager.toml`.
    ///
    /// Only fields still unset are taken, so builder calls made before this
    /// one (CLI flags) win over the file.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if self.product_name.is_none() {
            self.product_name = file.product_name;
        }
        if self.executable_name.is_none() {
            self.executable_name = file.executable;
        }
        if self.bundle_identifier.is_none() {
            self.bundle_identifier = file.identifier;
        }
        if self.entry_script.is_none() {
            self.entry_script = file.entry;
        }
        if self.spec_file.is_none() {
            self.spec_file = file.spec;
        }
        if self.dist_dir.is_none() {
            self.dist_dir = file.dist;
        }
        self
    }

    /// Builds the settings, applying the stock defaults to unset fields.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty product or executable name, or a
    /// bundle identifier containing whitespace.
    pub fn build(self) -> crate::packager::Result<Settings> {
        let product_name = self
            .product_name
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());
        if product_name.trim().is_empty() {
            bail!("product name cannot be empty");
        }

        let executable_name = self
            .executable_name
            .unwrap_or_else(|| product_name.split_whitespace().collect());
        if executable_name.is_empty() {
            bail!("executable name cannot be empty");
        }

        let bundle_identifier = self
            .bundle_identifier
            .unwrap_or_else(|| DEFAULT_BUNDLE_IDENTIFIER.to_string());
        if bundle_identifier.is_empty() || bundle_identifier.contains(char::is_whitespace) {
            bail!(
                "bundle identifier must be a reverse-DNS string without whitespace, got {:?}",
                bundle_identifier
            );
        }

        Ok(Settings::new(
            product_name,
            executable_name,
            bundle_identifier,
            self.entry_script
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY_SCRIPT)),
            self.spec_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SPEC_FILE)),
            self.dist_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
        ))
    }
}
