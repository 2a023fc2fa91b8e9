//! Collection of the sources listed by each VM directory's own manifest.

use std::path::Path;

use log::debug;

use crate::config::SourceListConfig;
use crate::layout::{SourceLayout, display_path};
use crate::manifest::load_sources;
use crate::models::{SourceList, Warning};

/// Append the sources of every configured VM directory, in configuration order.
///
/// Problems with one directory or one file are recorded as warnings and never stop the walk.
pub fn collect_directory_sources(
  layout: &SourceLayout,
  config: &SourceListConfig,
  list: &mut SourceList,
) {
  for dir in &config.vm_dirs {
    collect_directory(layout, config, dir, list);
  }
}

fn collect_directory(
  layout: &SourceLayout,
  config: &SourceListConfig,
  dir: &str,
  list: &mut SourceList,
) {
  let path = layout.base().join(dir);
  let shown = display_path(&path);
  if !layout.is_dir(&path) {
    list.warn(Warning::DirectoryNotFound { path: shown });
    return;
  }

  let name = directory_name(&path);
  let manifest_path = path.join(config.manifest_file_name(&name));
  let entries = match load_sources(&layout.on_disk(&manifest_path), &config.sources_key(&name)) {
    Ok(entries) => entries,
    Err(err) => {
      list.warn(Warning::DirectoryFailed {
        path: shown,
        reason: err.to_string(),
      });
      return;
    }
  };
  debug!("{} lists {} entries", display_path(&manifest_path), entries.len());

  for entry in entries {
    let source = path.join(&entry);
    let source_shown = display_path(&source);
    if !layout.is_file(&source) {
      list.warn(Warning::SourceNotFound { path: source_shown });
      continue;
    }

    if entry.ends_with(&config.header_suffix) {
      list.headers.push(source_shown.clone());
    }
    list.sources.push(source_shown);
  }
}

fn directory_name(path: &Path) -> String {
  path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default()
}
