//! Interactive launch of the built bundle.

use crate::packager::error::{Error, Result};
use std::path::Path;

/// Opens the bundle through the OS `open` action.
///
/// Used for the operator's smoke test after a successful build. Failures do
/// not invalidate the build; callers downgrade them to warnings.
pub async fn open_bundle(app_path: &Path) -> Result<()> {
    let output = tokio::process::Command::new("open")
        .arg(app_path)
        .output()
        .await
        .map_err(|e| Error::GenericError(format!("failed to run open: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GenericError(format!(
            "open {} failed: {}",
            app_path.display(),
            stderr.trim()
        )));
    }

    log::debug!("Launched {}", app_path.display());
    Ok(())
}
