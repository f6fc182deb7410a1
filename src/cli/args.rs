//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// PyInstaller packaging driver for the Bitcoin Compiler GUI
#[derive(Parser, Debug)]
#[command(
    name = "bitcoin_compiler_packager",
    version,
    about = "Packages the Bitcoin Compiler GUI into a macOS .app bundle",
    long_about = "Packages the Bitcoin Compiler GUI into a macOS .app bundle with PyInstaller, \
then validates the result (executable present, Mach-O format, Dock visibility) and offers an \
interactive smoke test.

Runs with no arguments: prefers bitcoin_compiler.spec when it exists in the working directory, \
otherwise falls back to command-line flags naming compile_bitcoind_gui.py.

Usage:
  bitcoin_compiler_packager
  bitcoin_compiler_packager --name \"Bitcoin Compiler\" --identifier com.bitcoincompiler.app
  bitcoin_compiler_packager --assume-yes --no-launch

Exit code 0 = bundle built and validated (declining the launch prompt still counts). \
Exit code 1 = install declined, bundle missing, or bundle executable missing."
)]
pub struct Args {
    /// Product name; the bundle is created as "<NAME>.app"
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Executable name inside Contents/MacOS (default: product name without spaces)
    #[arg(long, value_name = "NAME")]
    pub executable: Option<String>,

    /// Bundle identifier for the fallback invocation
    #[arg(long, value_name = "ID")]
    pub identifier: Option<String>,

    /// Entry-point Python script for the fallback invocation
    #[arg(long, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// PyInstaller spec file preferred when it exists
    #[arg(long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// PyInstaller output directory containing the bundle
    #[arg(long, value_name = "DIR")]
    pub dist: Option<PathBuf>,

    /// Install PyInstaller without prompting when it is missing
    #[arg(short = 'y', long)]
    pub assume_yes: bool,

    /// Launch the bundle after validation without prompting
    #[arg(long, conflicts_with = "no_launch")]
    pub launch: bool,

    /// Skip the launch prompt entirely
    #[arg(long)]
    pub no_launch: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Product name cannot be empty".to_string());
            }
        }

        if let Some(executable) = &self.executable {
            if executable.trim().is_empty() || executable.contains('/') {
                return Err(format!(
                    "Invalid executable name: {:?}. Expected a bare file name",
                    executable
                ));
            }
        }

        if let Some(identifier) = &self.identifier {
            if identifier.is_empty() || identifier.contains(char::is_whitespace) {
                return Err(format!(
                    "Invalid bundle identifier: {:?}. Expected a reverse-DNS string like com.bitcoincompiler.app",
                    identifier
                ));
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(_args: &Args) -> Self {
        let output = super::OutputManager::new(
            true,  // Always verbose
            false, // Never quiet
        );

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print error message
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.output.error(message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
