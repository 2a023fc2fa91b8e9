#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod aggregate;
pub mod builder;
pub mod collector;
pub mod config;
pub mod layout;
pub mod manifest;
pub mod models;
pub mod writer;

pub use builder::SourceListBuilder;
pub use config::SourceListConfig;
pub use layout::SourceLayout;
pub use manifest::{Manifest, ManifestError};
pub use models::{SourceList, Warning};
pub use writer::EmptySourceList;
