//! Source list orchestrator: directory manifests, fixed extras, libraries and third-party code.

use std::path::Path;

use anyhow::Result;
use log::info;

use crate::aggregate::{
  append_extra_files, append_extra_headers, append_library_sources, append_third_party_sources,
};
use crate::collector::collect_directory_sources;
use crate::config::SourceListConfig;
use crate::layout::SourceLayout;
use crate::models::SourceList;
use crate::writer::{normalize_separators, write_source_list};

/// High-level helper collecting the sources of one SDK checkout.
pub struct SourceListBuilder<'a> {
  layout: &'a SourceLayout,
  config: &'a SourceListConfig,
}

impl<'a> SourceListBuilder<'a> {
  /// Create a builder for the provided layout and configuration.
  pub fn new(layout: &'a SourceLayout, config: &'a SourceListConfig) -> Self {
    Self { layout, config }
  }

  /// Collect every source in order.
  ///
  /// Missing inputs become warnings on the returned list. Only a missing third-party
  /// directory is an error.
  pub fn build(&self) -> Result<SourceList> {
    let mut list = SourceList::default();

    collect_directory_sources(self.layout, self.config, &mut list);
    append_extra_files(self.layout, self.config, &mut list);
    append_extra_headers(self.layout, self.config, &mut list);
    append_library_sources(self.layout, self.config, &mut list);
    append_third_party_sources(self.layout, self.config, &mut list)?;

    Ok(list)
  }

  /// Collect the sources and write them to `output`.
  ///
  /// Fails with [`crate::EmptySourceList`] when nothing was found, in which case no file is
  /// written.
  pub fn build_and_write(&self, output: &Path) -> Result<SourceList> {
    let mut list = self.build()?;
    normalize_separators(&mut list.sources);
    normalize_separators(&mut list.headers);

    write_source_list(output, &list.sources)?;
    info!("Found {} source files", list.sources.len());

    Ok(list)
  }
}
