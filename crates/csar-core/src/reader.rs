//! The CSAR reader facade.
//!
//! A read runs strictly in sequence: destination check, acquisition,
//! container probe, extraction, metadata resolution. Any failure ends the
//! read; a downloaded temporary file is removed on every exit path because
//! it is owned by the [`AcquiredArchive`] value that goes out of scope.

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::CsarError;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::ReaderConfig;
use crate::Result;
use crate::archive::extract_zip;
use crate::archive::probe_zip;
use crate::metadata::MetadataResolver;
use crate::metadata::PackageMetadata;
use crate::metadata::ToscaMetaResolver;
use crate::source::AcquiredArchive;
use crate::source::SourceLocator;
use crate::source::acquire;
use crate::types::DestDir;

/// Stages of a read operation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    /// Resolving the source to a local file.
    Acquiring,
    /// Probing and extracting the container.
    Extracting,
    /// Running the metadata resolver over the extracted tree.
    ResolvingMetadata,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Acquiring => "acquiring",
            Self::Extracting => "extracting",
            Self::ResolvingMetadata => "resolving-metadata",
        })
    }
}

/// A successfully read and extracted CSAR package.
///
/// Immutable: all accessors are projections of the resolved metadata,
/// except [`entry_definitions_yaml`](Self::entry_definitions_yaml) which
/// re-reads the file on every call. The extraction directory is not
/// removed when the reader is dropped; that is up to the caller.
#[derive(Debug)]
pub struct CsarReader {
    destination: PathBuf,
    metadata: PackageMetadata,
    report: ExtractionReport,
}

impl CsarReader {
    /// Directory the package was extracted into.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// The resolved metadata record.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Statistics from the extraction step.
    pub fn extraction_report(&self) -> &ExtractionReport {
        &self.report
    }

    /// Package author.
    pub fn created_by(&self) -> &str {
        self.metadata.created_by()
    }

    /// CSAR format version.
    pub fn csar_version(&self) -> &str {
        self.metadata.csar_version()
    }

    /// Descriptor format version.
    pub fn meta_file_version(&self) -> &str {
        self.metadata.meta_file_version()
    }

    /// Relative path of the entry service template.
    pub fn entry_definitions(&self) -> &str {
        self.metadata.entry_definitions()
    }

    /// Relative path of the manifest file, if declared.
    pub fn entry_manifest_file(&self) -> Option<&str> {
        self.metadata.entry_manifest_file()
    }

    /// Relative path of the change history file, if declared.
    pub fn entry_history_file(&self) -> Option<&str> {
        self.metadata.entry_history_file()
    }

    /// Relative path of the tests directory, if declared.
    pub fn entry_tests_dir(&self) -> Option<&str> {
        self.metadata.entry_tests_dir()
    }

    /// Relative path of the licenses directory, if declared.
    pub fn entry_licenses_dir(&self) -> Option<&str> {
        self.metadata.entry_licenses_dir()
    }

    /// Relative path of the signing certificate, if declared.
    pub fn entry_certificate_file(&self) -> Option<&str> {
        self.metadata.entry_certificate_file()
    }

    /// Absolute location of the entry service template on disk.
    pub fn entry_definitions_path(&self) -> PathBuf {
        self.destination.join(self.entry_definitions())
    }

    /// Loads the entry service template as YAML.
    ///
    /// Evaluated on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `CsarError::StructuredData` if the file is missing or is not
    /// valid YAML.
    pub fn entry_definitions_yaml(&self) -> Result<serde_yaml::Value> {
        let path = self.entry_definitions_path();
        let text = fs::read_to_string(&path).map_err(|e| CsarError::StructuredData {
            path: path.clone(),
            source: e.into(),
        })?;

        serde_yaml::from_str(&text).map_err(|e| CsarError::StructuredData {
            path,
            source: e.into(),
        })
    }
}

/// Reads a package from `source` into `destination`.
///
/// `source` is a filesystem path or a URL (anything containing `"://"`).
/// `destination` must not exist or must be an empty directory; it is
/// created if needed and is left in place afterwards, whatever the outcome.
///
/// # Errors
///
/// - `CsarError::DestinationNotEmpty` before any other work
/// - `CsarError::InvalidUrl`, `CsarError::Download`, `CsarError::Http` for
///   remote sources
/// - `CsarError::SourceNotFound`, `CsarError::InvalidArchive`
/// - `CsarError::PathTraversal`, `CsarError::SecurityViolation` for unsafe
///   entry names
/// - `CsarError::Metadata` from the descriptor resolver
///
/// # Examples
///
/// ```no_run
/// use csar_core::ReaderConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let reader = csar_core::read("pkg.csar", "/tmp/pkg", &ReaderConfig::default())?;
/// println!("entry definitions: {}", reader.entry_definitions());
/// # Ok(())
/// # }
/// ```
pub fn read(
    source: &str,
    destination: impl AsRef<Path>,
    config: &ReaderConfig,
) -> Result<CsarReader> {
    ReaderBuilder::new()
        .source(source)
        .destination(destination)
        .config(config.clone())
        .read()
}

/// Builder for a read with a custom resolver or progress reporting.
///
/// # Examples
///
/// ```no_run
/// use csar_core::ReaderBuilder;
/// use csar_core::ReaderConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let reader = ReaderBuilder::new()
///     .source("https://example.com/pkg.csar")
///     .destination("/tmp/pkg")
///     .config(ReaderConfig::default().with_verify_certificate(false))
///     .read()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ReaderBuilder<'a> {
    source: Option<String>,
    destination: Option<PathBuf>,
    config: Option<ReaderConfig>,
    resolver: Option<&'a dyn MetadataResolver>,
    progress: Option<&'a mut dyn ProgressCallback>,
}

impl<'a> ReaderBuilder<'a> {
    /// Creates a new `ReaderBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source locator (path or URL).
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the extraction directory.
    #[must_use]
    pub fn destination(mut self, path: impl AsRef<Path>) -> Self {
        self.destination = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the reader configuration.
    #[must_use]
    pub fn config(mut self, config: ReaderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses `resolver` instead of the `TOSCA.meta` resolver.
    #[must_use]
    pub fn resolver(mut self, resolver: &'a dyn MetadataResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Reports download and extraction progress to `progress`.
    #[must_use]
    pub fn progress(mut self, progress: &'a mut dyn ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Executes the read.
    ///
    /// # Errors
    ///
    /// Returns `CsarError::Io` with `InvalidInput` if the source or
    /// destination was not set, otherwise the errors of [`read`].
    pub fn read(self) -> Result<CsarReader> {
        let source = self.source.ok_or_else(|| missing_setting("source"))?;
        let destination = self.destination.ok_or_else(|| missing_setting("destination"))?;
        let config = self.config.unwrap_or_default();
        let resolver = self.resolver.unwrap_or(&ToscaMetaResolver);
        let mut noop = NoopProgress;
        let progress: &mut dyn ProgressCallback = match self.progress {
            Some(progress) => progress,
            None => &mut noop,
        };

        run(&source, &destination, &config, resolver, progress)
    }
}

fn missing_setting(name: &str) -> CsarError {
    CsarError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("{name} not set"),
    ))
}

fn run(
    source: &str,
    destination: &Path,
    config: &ReaderConfig,
    resolver: &dyn MetadataResolver,
    progress: &mut dyn ProgressCallback,
) -> Result<CsarReader> {
    let dest = DestDir::vacant(destination)?;
    let locator = SourceLocator::parse(source);

    if !config.verify_certificate {
        tracing::debug!("certificate verification disabled");
    }

    tracing::debug!(stage = %ReadStage::Acquiring, source = %locator);
    let acquired = acquire(&locator, config, progress)?;

    let (metadata, report) = process(&acquired, &dest, config, resolver, progress)?;
    drop(acquired);

    if config.verify_certificate
        && let Some(cert) = metadata.entry_certificate_file()
    {
        tracing::warn!(
            certificate = cert,
            "package declares a certificate but signature verification is not implemented"
        );
    }

    Ok(CsarReader {
        destination: dest.into_path_buf(),
        metadata,
        report,
    })
}

fn process(
    acquired: &AcquiredArchive,
    dest: &DestDir,
    config: &ReaderConfig,
    resolver: &dyn MetadataResolver,
    progress: &mut dyn ProgressCallback,
) -> Result<(PackageMetadata, ExtractionReport)> {
    let archive = acquired.path();

    tracing::debug!(stage = %ReadStage::Extracting, archive = %archive.display());
    probe_zip(archive)?;
    dest.ensure_created()?;
    tracing::debug!("extracting CSAR contents");
    let report = extract_zip(archive, dest, config, progress)?;
    tracing::debug!(
        files = report.files_extracted,
        bytes = report.bytes_written,
        "CSAR contents successfully extracted"
    );

    tracing::debug!(stage = %ReadStage::ResolvingMetadata);
    let metadata = resolver.resolve(dest.as_path())?;

    Ok((metadata, report))
}
