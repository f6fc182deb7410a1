//! Validation of the PyInstaller-produced bundle.
//!
//! Nothing here mutates the bundle; each check reads the artifacts
//! PyInstaller wrote and reports what it found.

mod binary;
mod checksum;
mod info_plist;

pub use binary::{binary_format, BinaryFormat};
pub use checksum::{bundle_size, calculate_sha256};
pub use info_plist::{dock_visibility, DockVisibility};

/// Formats a byte count for operator-facing size reports.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
