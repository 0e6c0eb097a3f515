//! Reader for CSAR (Cloud Service Archive) packages.
//!
//! `csar-core` takes a package from a local path or a URL, checks that it
//! is a ZIP container, extracts it into an empty directory and resolves
//! its `TOSCA-Metadata/TOSCA.meta` descriptor into a read-only
//! [`CsarReader`].
//!
//! # Examples
//!
//! ```no_run
//! use csar_core::ReaderConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = csar_core::read("pkg.csar", "/tmp/pkg", &ReaderConfig::default())?;
//! println!("CSAR version {}", reader.csar_version());
//! let template = reader.entry_definitions_yaml()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod metadata;
pub mod reader;
pub mod report;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::ReaderConfig;
pub use error::CsarError;
pub use error::MetadataError;
pub use error::Result;
pub use metadata::MetadataResolver;
pub use metadata::PackageMetadata;
pub use metadata::ToscaMetaResolver;
pub use reader::CsarReader;
pub use reader::ReaderBuilder;
pub use reader::read;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use source::SourceLocator;
