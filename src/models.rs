//! Data structures produced while collecting a source list.

use log::warn;

/// Recoverable problem encountered during collection. The affected item is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
  /// A configured VM directory does not exist.
  DirectoryNotFound {
    /// Directory that was expected.
    path: String,
  },
  /// A VM directory's manifest could not be read or lacks its sources list.
  DirectoryFailed {
    /// Directory that was skipped.
    path: String,
    /// Description of the underlying failure.
    reason: String,
  },
  /// A file named by a directory manifest does not exist.
  SourceNotFound {
    /// File that was expected.
    path: String,
  },
  /// One of the fixed extra sources does not exist.
  ExtraSourceNotFound {
    /// File that was expected.
    path: String,
  },
  /// A library manifest does not exist.
  LibraryManifestNotFound {
    /// Manifest that was expected.
    path: String,
  },
  /// A library manifest could not be read.
  LibraryFailed {
    /// Library that was skipped.
    library: String,
    /// Description of the underlying failure.
    reason: String,
  },
  /// A file named by a library manifest does not exist.
  LibrarySourceNotFound {
    /// File that was expected.
    path: String,
  },
}

impl std::fmt::Display for Warning {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::DirectoryNotFound { path } => write!(f, "Directory not found: {path}"),
      Self::DirectoryFailed { path, reason } => {
        write!(f, "Failed to process directory {path}: {reason}")
      }
      Self::SourceNotFound { path } => write!(f, "Source file not found: {path}"),
      Self::ExtraSourceNotFound { path } => write!(f, "Extra source file not found: {path}"),
      Self::LibraryManifestNotFound { path } => write!(f, "Library gni file not found: {path}"),
      Self::LibraryFailed { library, reason } => {
        write!(f, "Failed to process library {library}: {reason}")
      }
      Self::LibrarySourceNotFound { path } => {
        write!(f, "Library source file not found: {path}")
      }
    }
  }
}

/// Ordered result of a collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceList {
  /// Compiled sources in discovery order. Duplicates are kept.
  pub sources: Vec<String>,
  /// Public headers seen along the way. Not part of the generated file.
  pub headers: Vec<String>,
  /// Items that were skipped, in the order they were encountered.
  pub warnings: Vec<Warning>,
}

impl SourceList {
  /// Log `warning` and keep it for the caller.
  pub fn warn(&mut self, warning: Warning) {
    warn!("{warning}");
    self.warnings.push(warning);
  }

  /// Returns `true` when no source was collected.
  pub fn is_empty(&self) -> bool {
    self.sources.is_empty()
  }
}
