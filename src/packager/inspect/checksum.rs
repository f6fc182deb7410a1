//! Bundle size and checksum reporting.

use crate::{
    bail,
    packager::error::{ErrorExt, Result},
};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Returns the total on-disk size of a bundle in bytes.
///
/// Counts regular files only; symlinks are not followed. Entries that
/// cannot be read are skipped rather than failing the size report.
pub fn bundle_size(path: &Path) -> u64 {
    walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Calculates the SHA-256 checksum of a produced artifact.
///
/// A `.app` bundle is a directory, so directories are hashed as a tree:
/// each file's bundle-relative path and content feed one hasher, visited in
/// sorted order for a deterministic result. Plain files hash their content
/// alone.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the path cannot be read or is neither file nor directory
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("inspecting path for checksum", path)?;

    let mut hasher = Sha256::new();

    if metadata.is_dir() {
        let mut entries: Vec<_> = walkdir::WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .collect();

        // Sort by path for deterministic ordering
        entries.sort_by_key(|e| e.path().to_path_buf());

        for entry in entries {
            // Include the relative path so renames change the hash
            if let Ok(rel_path) = entry.path().strip_prefix(path) {
                hasher.update(rel_path.to_string_lossy().as_bytes());
            }
            hash_file_into(&mut hasher, entry.path()).await?;
        }
    } else if metadata.is_file() {
        hash_file_into(&mut hasher, path).await?;
    } else {
        bail!("path is neither file nor directory: {}", path.display());
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Streams one file into the hasher in 8KB chunks.
async fn hash_file_into(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hashing", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_bundle(dir: &Path) {
        let macos = dir.join("Contents").join("MacOS");
        std::fs::create_dir_all(&macos).expect("create MacOS dir");
        std::fs::write(macos.join("App"), b"binary bytes").expect("write binary");
        std::fs::write(dir.join("Contents").join("Info.plist"), b"<plist/>")
            .expect("write plist");
    }

    #[test]
    fn bundle_size_sums_nested_files() {
        let temp = TempDir::new().expect("temp dir");
        let bundle = temp.path().join("App.app");
        make_bundle(&bundle);

        assert_eq!(
            bundle_size(&bundle),
            ("binary bytes".len() + "<plist/>".len()) as u64
        );
    }

    #[tokio::test]
    async fn directory_hash_is_deterministic() {
        let temp = TempDir::new().expect("temp dir");
        let bundle = temp.path().join("App.app");
        make_bundle(&bundle);

        let first = calculate_sha256(&bundle).await.expect("first hash");
        let second = calculate_sha256(&bundle).await.expect("second hash");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[tokio::test]
    async fn content_changes_change_the_hash() {
        let temp = TempDir::new().expect("temp dir");
        let bundle = temp.path().join("App.app");
        make_bundle(&bundle);

        let before = calculate_sha256(&bundle).await.expect("hash before");
        std::fs::write(
            bundle.join("Contents").join("MacOS").join("App"),
            b"different bytes",
        )
        .expect("rewrite binary");
        let after = calculate_sha256(&bundle).await.expect("hash after");

        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn renames_change_the_hash() {
        let temp = TempDir::new().expect("temp dir");
        let bundle = temp.path().join("App.app");
        make_bundle(&bundle);

        let before = calculate_sha256(&bundle).await.expect("hash before");
        let macos = bundle.join("Contents").join("MacOS");
        std::fs::rename(macos.join("App"), macos.join("Renamed")).expect("rename");
        let after = calculate_sha256(&bundle).await.expect("hash after");

        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn single_file_hash_matches_known_digest() {
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("artifact");
        std::fs::write(&file, b"abc").expect("write file");

        let hash = calculate_sha256(&file).await.expect("hash");
        // sha256("abc")
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
