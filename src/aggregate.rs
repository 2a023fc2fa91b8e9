//! Sources that do not come from the VM directory manifests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::debug;

use crate::config::SourceListConfig;
use crate::layout::{SourceLayout, display_path};
use crate::manifest::load_default_sources;
use crate::models::{SourceList, Warning};

/// Append the fixed extra sources that exist under the base directory.
pub fn append_extra_files(layout: &SourceLayout, config: &SourceListConfig, list: &mut SourceList) {
  for name in &config.extra_files {
    let path = layout.base().join(name);
    let shown = display_path(&path);
    if layout.is_file(&path) {
      list.sources.push(shown);
    } else {
      list.warn(Warning::ExtraSourceNotFound { path: shown });
    }
  }
}

/// Append the fixed public headers. They are not checked for existence.
pub fn append_extra_headers(layout: &SourceLayout, config: &SourceListConfig, list: &mut SourceList) {
  list.headers.extend(
    config
      .extra_headers
      .iter()
      .map(|name| display_path(&layout.base().join(name))),
  );
}

/// Append the default C++ sources of every configured library manifest.
pub fn append_library_sources(
  layout: &SourceLayout,
  config: &SourceListConfig,
  list: &mut SourceList,
) {
  let library_dir = layout.base().join(&config.library_dir);
  for library in &config.libraries {
    append_library(layout, config, &library_dir, library, list);
  }
}

fn append_library(
  layout: &SourceLayout,
  config: &SourceListConfig,
  library_dir: &Path,
  library: &str,
  list: &mut SourceList,
) {
  let manifest_path = library_dir.join(config.manifest_file_name(library));
  if !layout.is_file(&manifest_path) {
    list.warn(Warning::LibraryManifestNotFound {
      path: display_path(&manifest_path),
    });
    return;
  }

  let sources = match load_default_sources(
    &layout.on_disk(&manifest_path),
    &config.library_list_suffix,
  ) {
    Ok(Some(sources)) => sources,
    Ok(None) => {
      debug!(
        "{} has no `*{}` list",
        display_path(&manifest_path),
        config.library_list_suffix
      );
      return;
    }
    Err(err) => {
      list.warn(Warning::LibraryFailed {
        library: library.to_string(),
        reason: err.to_string(),
      });
      return;
    }
  };

  for source in sources
    .iter()
    .filter(|source| source.ends_with(&config.source_suffix))
  {
    let path = library_dir.join(source);
    let shown = display_path(&path);
    if layout.is_file(&path) {
      list.sources.push(shown);
    } else {
      list.warn(Warning::LibrarySourceNotFound { path: shown });
    }
  }
}

/// Locate the vendored third-party directory, preferring the base over the SDK root.
///
/// Fails when neither candidate is a directory.
pub fn resolve_third_party_dir(layout: &SourceLayout, config: &SourceListConfig) -> Result<PathBuf> {
  let candidates = [
    layout.base().join(&config.third_party_dir),
    layout.sdk().join(&config.third_party_dir),
  ];

  for candidate in &candidates {
    if layout.is_dir(candidate) {
      return Ok(candidate.clone());
    }
  }

  Err(anyhow!(
    "third-party directory not found at {} or {}",
    display_path(&candidates[0]),
    display_path(&candidates[1])
  ))
}

/// Append every source file found directly inside the third-party directory.
pub fn append_third_party_sources(
  layout: &SourceLayout,
  config: &SourceListConfig,
  list: &mut SourceList,
) -> Result<()> {
  let dir = resolve_third_party_dir(layout, config)?;
  let sources = list_sources_in(layout, &dir, &config.source_suffix)?;
  debug!("{} provides {} sources", display_path(&dir), sources.len());
  list.sources.extend(sources);
  Ok(())
}

/// Regular, non-hidden files directly inside `dir` whose name ends with `suffix`, sorted by name.
fn list_sources_in(layout: &SourceLayout, dir: &Path, suffix: &str) -> Result<Vec<String>> {
  let on_disk = layout.on_disk(dir);
  let mut names = Vec::new();

  for entry in fs::read_dir(&on_disk)
    .with_context(|| format!("failed to read {}", on_disk.display()))?
  {
    let entry = entry?;
    // Follows symlinks, so linked sources are listed like regular ones.
    if !entry.path().is_file() {
      continue;
    }

    let file_name = entry.file_name();
    let Some(name) = file_name.to_str() else {
      continue;
    };

    if !name.starts_with('.') && name.ends_with(suffix) {
      names.push(name.to_string());
    }
  }

  names.sort();
  Ok(names
    .into_iter()
    .map(|name| display_path(&dir.join(name)))
    .collect())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
  }

  #[test]
  fn extra_files_are_checked() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "vm/version.cc", "");

    let config = SourceListConfig {
      extra_files: vec!["vm/version.cc".into(), "platform/no_tsan.cc".into()],
      ..SourceListConfig::default()
    };
    let layout = SourceLayout::new(root, ".", "..");
    let mut list = SourceList::default();
    append_extra_files(&layout, &config, &mut list);

    assert_eq!(list.sources, vec!["./vm/version.cc"]);
    assert_eq!(list.warnings, vec![Warning::ExtraSourceNotFound {
      path: "./platform/no_tsan.cc".into()
    }]);
  }

  #[test]
  fn extra_headers_are_appended_unconditionally() {
    let dir = tempdir().unwrap();
    let layout = SourceLayout::new(dir.path(), "./runtime", ".");
    let mut list = SourceList::default();
    append_extra_headers(&layout, &SourceListConfig::default(), &mut list);

    assert_eq!(list.headers, vec!["./runtime/vm/version.h"]);
    assert!(list.warnings.is_empty());
  }

  #[test]
  fn library_sources_come_from_the_default_list() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(
      root,
      "lib/core_sources.gni",
      r#"
      core_runtime_cc_files = [ "array.cc", "array.h", "bool.cc", "gone.cc" ]
      core_runtime_extra_cc_files = [ "never.cc" ]
      "#,
    );
    write(root, "lib/math_sources.gni", r#"math_runtime_dart_files = [ "math.dart" ]"#);
    write(root, "lib/array.cc", "");
    write(root, "lib/array.h", "");
    write(root, "lib/bool.cc", "");
    write(root, "lib/never.cc", "");

    let config = SourceListConfig {
      libraries: vec!["core".into(), "math".into(), "ffi".into()],
      ..SourceListConfig::default()
    };
    let layout = SourceLayout::new(root, ".", "..");
    let mut list = SourceList::default();
    append_library_sources(&layout, &config, &mut list);

    assert_eq!(list.sources, vec!["./lib/array.cc", "./lib/bool.cc"]);
    assert_eq!(list.warnings, vec![
      Warning::LibrarySourceNotFound { path: "./lib/gone.cc".into() },
      Warning::LibraryManifestNotFound { path: "./lib/ffi_sources.gni".into() },
    ]);
  }

  #[test]
  fn third_party_prefers_base_directory() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "runtime/third_party/double-conversion/src/a.cc", "");
    write(root, "third_party/double-conversion/src/b.cc", "");

    let layout = SourceLayout::new(root, "./runtime", ".");
    let resolved = resolve_third_party_dir(&layout, &SourceListConfig::default()).unwrap();
    assert_eq!(display_path(&resolved), "./runtime/third_party/double-conversion/src");
  }

  #[test]
  fn third_party_falls_back_to_sdk_and_lists_sorted_sources() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "third_party/double-conversion/src/strtod.cc", "");
    write(root, "third_party/double-conversion/src/bignum.cc", "");
    write(root, "third_party/double-conversion/src/bignum.h", "");
    write(root, "third_party/double-conversion/src/.hidden.cc", "");
    fs::create_dir_all(root.join("third_party/double-conversion/src/dir.cc")).unwrap();
    fs::create_dir_all(root.join("runtime")).unwrap();

    let layout = SourceLayout::new(root, "./runtime", ".");
    let mut list = SourceList::default();
    append_third_party_sources(&layout, &SourceListConfig::default(), &mut list).unwrap();

    assert_eq!(list.sources, vec![
      "./third_party/double-conversion/src/bignum.cc",
      "./third_party/double-conversion/src/strtod.cc",
    ]);
  }

  #[cfg(unix)]
  #[test]
  fn third_party_listing_follows_symlinks() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "vendor/fast-dtoa.cc", "");
    write(root, "third_party/double-conversion/src/bignum.cc", "");
    std::os::unix::fs::symlink(
      root.join("vendor/fast-dtoa.cc"),
      root.join("third_party/double-conversion/src/fast-dtoa.cc"),
    )
    .unwrap();

    let layout = SourceLayout::new(root, ".", "..");
    let mut list = SourceList::default();
    append_third_party_sources(&layout, &SourceListConfig::default(), &mut list).unwrap();

    assert_eq!(list.sources, vec![
      "./third_party/double-conversion/src/bignum.cc",
      "./third_party/double-conversion/src/fast-dtoa.cc",
    ]);
  }

  #[test]
  fn missing_third_party_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let layout = SourceLayout::new(dir.path(), "./runtime", ".");
    let mut list = SourceList::default();

    let err = append_third_party_sources(&layout, &SourceListConfig::default(), &mut list)
      .unwrap_err();
    assert!(err.to_string().contains("third_party/double-conversion/src"));
    assert!(list.sources.is_empty());
  }
}
