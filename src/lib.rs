//! PyInstaller packaging driver for the Bitcoin Compiler GUI.
//!
//! This library backs the `bitcoin_compiler_packager` binary:
//! - PyInstaller discovery, offering a pip install when the tool is missing
//! - spec-file or command-line build invocation with streamed output
//! - bundle validation (size, checksum, Mach-O format, Dock visibility)
//! - the optional interactive launch test
//!
//! The packaging pieces under [`packager`] are usable as a library too.

pub mod cli;
pub mod config;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
pub use packager::{Settings, SettingsBuilder};
