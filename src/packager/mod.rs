//! Packaging pipeline: toolchain probing, invocation planning, bundle
//! validation, and launch.

pub mod error;
pub mod inspect;
pub mod launch;
pub mod pyinstaller;
pub mod settings;

// Re-export commonly used types
pub use error::{Error, Result};
pub use settings::{Settings, SettingsBuilder};
