//! Configuration for packaging runs.
//!
//! Naming and path settings with stock defaults, a fluent builder, and the
//! merge order used by the CLI (flags, then `packager.toml`, then defaults).

mod builder;
mod core;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::{
    Settings, DEFAULT_BUNDLE_IDENTIFIER, DEFAULT_DIST_DIR, DEFAULT_ENTRY_SCRIPT,
    DEFAULT_PRODUCT_NAME, DEFAULT_SPEC_FILE,
};
