//! Dock-visibility inspection of the bundle's Info.plist.

use crate::packager::error::{Error, Result};
use std::path::Path;

/// What `LSUIElement` says about the app's Dock presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockVisibility {
    /// Flag absent; macOS shows the app in the Dock
    Unspecified,

    /// Flag present and false
    Visible,

    /// Flag present and truthy; the app is hidden from the Dock
    Hidden,
}

impl DockVisibility {
    /// True when the app will appear in the Dock.
    pub fn is_visible(&self) -> bool {
        !matches!(self, DockVisibility::Hidden)
    }
}

/// Reads `LSUIElement` from the bundle's Info.plist.
///
/// PyInstaller writes the boolean form; the legacy string `"1"` from
/// hand-edited plists counts as hidden too.
pub fn dock_visibility(plist_path: &Path) -> Result<DockVisibility> {
    let value = plist::Value::from_file(plist_path)?;
    let dict = value.as_dictionary().ok_or_else(|| {
        Error::GenericError(format!(
            "Info.plist root is not a dictionary: {}",
            plist_path.display()
        ))
    })?;

    Ok(match dict.get("LSUIElement") {
        None => DockVisibility::Unspecified,
        Some(plist::Value::Boolean(true)) => DockVisibility::Hidden,
        Some(plist::Value::Boolean(false)) => DockVisibility::Visible,
        Some(plist::Value::String(s))
            if s == "1" || s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") =>
        {
            DockVisibility::Hidden
        }
        Some(plist::Value::String(_)) => DockVisibility::Visible,
        Some(_) => DockVisibility::Unspecified,
    })
}
