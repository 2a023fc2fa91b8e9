//! Resolution of the directories a run operates on.

use std::path::{Path, PathBuf};

use crate::config::SourceListConfig;

const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

/// Directories used by a single run, resolved once from the invocation directory.
///
/// `base` and `sdk` are kept relative to `root` so reported paths read the same
/// as if the tool had been started from inside `root`, e.g. `./runtime/vm/heap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
  root: PathBuf,
  base: PathBuf,
  sdk: PathBuf,
}

impl SourceLayout {
  /// Resolve the effective base and SDK directories for `root`.
  ///
  /// An SDK checkout is recognised by its runtime directory: the runtime becomes the base and
  /// `root` the SDK directory. Otherwise `root` is the base and its parent the SDK directory.
  pub fn resolve(root: &Path, config: &SourceListConfig) -> Self {
    let current = PathBuf::from(CURRENT_DIR);
    let runtime = current.join(&config.runtime_dir_name);

    if root.join(&runtime).is_dir() {
      Self::new(root, runtime, current)
    } else {
      let parent = current.join(PARENT_DIR);
      Self::new(root, current, parent)
    }
  }

  /// Build a layout from explicit parts; `base` and `sdk` are relative to `root`.
  pub fn new(root: impl Into<PathBuf>, base: impl Into<PathBuf>, sdk: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      base: base.into(),
      sdk: sdk.into(),
    }
  }

  /// Invocation directory every relative path is anchored to.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Effective base directory, relative to the root.
  pub fn base(&self) -> &Path {
    &self.base
  }

  /// Top-level SDK directory, relative to the root.
  pub fn sdk(&self) -> &Path {
    &self.sdk
  }

  /// Location of a root-relative path on disk.
  pub fn on_disk(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }

  /// Whether a root-relative path names a regular file.
  pub fn is_file(&self, relative: &Path) -> bool {
    self.on_disk(relative).is_file()
  }

  /// Whether a root-relative path names a directory.
  pub fn is_dir(&self, relative: &Path) -> bool {
    self.on_disk(relative).is_dir()
  }
}

/// Render a root-relative path the way it is written to the source list.
pub fn display_path(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
