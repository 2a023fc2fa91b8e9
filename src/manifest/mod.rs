//! Reading GN source manifests, split into a tokenizer and a list extractor.

mod lexer;
mod parser;

use std::path::{Path, PathBuf};

pub use parser::{Manifest, ManifestEntry};

/// Errors raised while reading a manifest or looking up one of its lists.
#[derive(Debug)]
pub enum ManifestError {
    /// Failed to read the manifest from disk.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
    /// The manifest does not define the requested list.
    MissingEntry {
        /// Manifest that was searched.
        path: PathBuf,
        /// Name of the list that was expected.
        key: String,
    },
}

/// Load `path` and return the list named `key`.
pub fn load_sources(path: &Path, key: &str) -> Result<Vec<String>, ManifestError> {
    let manifest = Manifest::load(path)?;
    manifest
        .get(key)
        .map(<[String]>::to_vec)
        .ok_or_else(|| ManifestError::MissingEntry {
            path: path.to_path_buf(),
            key: key.to_string(),
        })
}

/// Load `path` and return the first list whose name ends with `suffix`, if any.
pub fn load_default_sources(path: &Path, suffix: &str) -> Result<Option<Vec<String>>, ManifestError> {
    let manifest = Manifest::load(path)?;
    Ok(manifest
        .first_with_suffix(suffix)
        .map(|entry| entry.values.clone()))
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::MissingEntry { path, key } => {
                write!(f, "no `{}` list in {}", key, path.display())
            }
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MissingEntry { .. } => None,
        }
    }
}
