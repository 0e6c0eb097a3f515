//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::convert_read_error;
use crate::output::OutputFormatter;
use crate::output::ValidationSummary;
use crate::progress::CliProgress;
use anyhow::Result;
use csar_core::ReaderBuilder;
use csar_core::ReaderConfig;
use csar_core::source::expand_home;
use csar_core::types::DestDir;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub fn execute(
    args: &ValidateArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let destination = expand_home(&args.destination);
    // Only clean up directories this run may have populated.
    let removable = !args.keep && DestDir::vacant(&destination).is_ok();

    let outcome = validate(args, &destination, show_progress);

    if removable {
        tracing::debug!(path = %destination.display(), "removing destination");
        if let Err(e) = fs::remove_dir_all(&destination)
            && e.kind() != ErrorKind::NotFound
        {
            formatter.format_warning(&format!(
                "failed to remove '{}': {e}",
                destination.display()
            ));
        }
    }

    formatter.format_validation_result(&outcome?)
}

fn validate(
    args: &ValidateArgs,
    destination: &Path,
    show_progress: bool,
) -> Result<ValidationSummary> {
    let config = ReaderConfig::default().with_verify_certificate(!args.no_verify_cert);
    let builder = ReaderBuilder::new()
        .source(&args.source)
        .destination(destination)
        .config(config);

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new();
        builder.progress(&mut progress).read()
    } else {
        builder.read()
    };
    let reader = result.map_err(|e| convert_read_error(e, &args.source))?;

    let template = reader
        .entry_definitions_yaml()
        .map_err(|e| convert_read_error(e, &args.source))?;
    let tosca_version = template
        .get("tosca_definitions_version")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    tracing::info!(
        source = %args.source,
        csar_version = reader.csar_version(),
        "package is valid"
    );

    Ok(ValidationSummary::new(
        &args.source,
        &reader,
        tosca_version,
        args.keep,
    ))
}
