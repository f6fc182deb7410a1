//! Mach-O classification of the bundle's main executable.

use crate::packager::error::{ErrorExt, Result};
use goblin::mach::header::MH_EXECUTE;
use std::fmt;
use std::path::Path;

/// Classification of the bundle's main executable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryFormat {
    /// Thin Mach-O image; `executable` is true for the MH_EXECUTE file type
    MachO {
        /// Whether the image has the executable file type
        executable: bool,
    },

    /// Universal (fat) Mach-O with the given slice count
    Universal {
        /// Number of architecture slices
        arches: usize,
    },

    /// Parsed as something other than Mach-O
    Other {
        /// Human-readable description of what was found
        description: String,
    },
}

impl BinaryFormat {
    /// True when the image is what a double-clickable macOS app carries.
    pub fn is_app_executable(&self) -> bool {
        match self {
            BinaryFormat::MachO { executable } => *executable,
            BinaryFormat::Universal { arches } => *arches > 0,
            BinaryFormat::Other { .. } => false,
        }
    }
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryFormat::MachO { executable: true } => write!(f, "a Mach-O executable"),
            BinaryFormat::MachO { executable: false } => {
                write!(f, "a Mach-O image without the executable file type")
            }
            BinaryFormat::Universal { arches } => {
                write!(f, "a universal Mach-O binary ({} architectures)", arches)
            }
            BinaryFormat::Other { description } => write!(f, "{}", description),
        }
    }
}

/// Reads and classifies the executable at `path`.
pub async fn binary_format(path: &Path) -> Result<BinaryFormat> {
    let buffer = tokio::fs::read(path)
        .await
        .fs_context("reading bundle executable", path)?;
    Ok(classify(&buffer))
}

/// Classifies raw image bytes.
fn classify(buffer: &[u8]) -> BinaryFormat {
    match goblin::Object::parse(buffer) {
        Ok(goblin::Object::Mach(goblin::mach::Mach::Binary(macho))) => BinaryFormat::MachO {
            executable: macho.header.filetype == MH_EXECUTE,
        },
        Ok(goblin::Object::Mach(goblin::mach::Mach::Fat(fat))) => BinaryFormat::Universal {
            arches: fat.arches().map(|arches| arches.len()).unwrap_or(0),
        },
        Ok(goblin::Object::Elf(_)) => BinaryFormat::Other {
            description: "an ELF binary".to_string(),
        },
        Ok(goblin::Object::PE(_)) => BinaryFormat::Other {
            description: "a Windows PE binary".to_string(),
        },
        Ok(_) => BinaryFormat::Other {
            description: "an unrecognized object format".to_string(),
        },
        Err(_) => BinaryFormat::Other {
            description: "not a recognized executable image".to_string(),
        },
    }
}
