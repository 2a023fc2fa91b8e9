//! Configuration describing which manifests, directories and files make up a VM build.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name searched for in the invocation directory by [`SourceListConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "srclist.config.json";

/// Discoverable configuration describing the SDK layout and the fixed source lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceListConfig {
    /// Name of the directory that marks the invocation directory as an SDK checkout.
    pub runtime_dir_name: String,
    /// VM subdirectories, relative to the effective base, whose own manifests are read.
    pub vm_dirs: Vec<String>,
    /// Individual sources appended after the directory manifests.
    pub extra_files: Vec<String>,
    /// Public headers appended to the header list without an existence check.
    pub extra_headers: Vec<String>,
    /// Directory, relative to the effective base, holding the library manifests.
    pub library_dir: String,
    /// Libraries whose `<name>_sources.gni` manifest is consulted.
    pub libraries: Vec<String>,
    /// Suffix identifying the default C++ list inside a library manifest.
    pub library_list_suffix: String,
    /// Suffix appended to a directory or library name to form its manifest file name.
    pub manifest_suffix: String,
    /// Suffix appended to a directory name to form its manifest list key.
    pub sources_key_suffix: String,
    /// Suffix of compiled sources.
    pub source_suffix: String,
    /// Suffix marking a manifest entry as a header.
    pub header_suffix: String,
    /// Vendored directory scanned for sources, relative to the base or the SDK root.
    pub third_party_dir: String,
    /// File name of the generated CMake list.
    pub output_file: String,
}

impl Default for SourceListConfig {
    fn default() -> Self {
        Self {
            runtime_dir_name: "runtime".into(),
            vm_dirs: strings(&["vm", "platform", "vm/heap", "vm/ffi", "vm/regexp"]),
            extra_files: strings(&[
                "vm/version.cc",
                "vm/dart_api_impl.cc",
                "vm/native_api_impl.cc",
                "vm/compiler/runtime_api.cc",
                "vm/compiler/jit/compiler.cc",
                "platform/no_tsan.cc",
            ]),
            extra_headers: strings(&["vm/version.h"]),
            library_dir: "lib".into(),
            libraries: strings(&[
                "async",
                "concurrent",
                "core",
                "developer",
                "ffi",
                "isolate",
                "math",
                "typed_data",
                "vmservice",
                "internal",
            ]),
            library_list_suffix: "_cc_files".into(),
            manifest_suffix: "_sources.gni".into(),
            sources_key_suffix: "_sources".into(),
            source_suffix: ".cc".into(),
            header_suffix: "h".into(),
            third_party_dir: "third_party/double-conversion/src".into(),
            output_file: "sourcelist.cmake".into(),
        }
    }
}

impl SourceListConfig {
    /// Load configuration from the provided directory, falling back to the built-in defaults.
    ///
    /// A missing or unparsable file is not an error: the defaults describe a stock SDK checkout.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Read configuration from a file the user asked for explicitly, reporting failures.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Manifest file name for a directory or library called `name`.
    pub fn manifest_file_name(&self, name: &str) -> String {
        format!("{name}{}", self.manifest_suffix)
    }

    /// List key a directory called `name` exposes in its own manifest.
    pub fn sources_key(&self, name: &str) -> String {
        format!("{name}{}", self.sources_key_suffix)
    }

    /// Default output location inside the invocation directory.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_file)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
