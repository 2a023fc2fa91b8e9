//! Serialisation of the collected sources into a CMake list.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path};

use anyhow::{Context, Result, bail};

const CMAKE_SEPARATOR: char = '/';

/// Returned when there is nothing to write; an empty list would break the CMake build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptySourceList;

impl std::fmt::Display for EmptySourceList {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "no source files found")
  }
}

impl std::error::Error for EmptySourceList {}

/// Rewrite paths to use forward slashes when the platform separator differs.
pub fn normalize_separators(paths: &mut [String]) {
  normalize_separators_from(paths, MAIN_SEPARATOR);
}

fn normalize_separators_from(paths: &mut [String], separator: char) {
  if separator == CMAKE_SEPARATOR {
    return;
  }
  for path in paths.iter_mut() {
    *path = path.replace(separator, "/");
  }
}

/// Render `sources` as a `set(SRCS ...)` block, one indented path per line.
pub fn render_source_list(sources: &[String]) -> String {
  format!("set(SRCS \n    {}\n)\n", sources.join("\n    "))
}

/// Write `sources` to `path`, refusing to produce an empty list.
pub fn write_source_list(path: &Path, sources: &[String]) -> Result<()> {
  if sources.is_empty() {
    bail!(EmptySourceList);
  }

  fs::write(path, render_source_list(sources))
    .with_context(|| format!("failed to write {}", path.display()))
}
