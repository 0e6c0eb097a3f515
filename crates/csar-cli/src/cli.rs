//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug; RUST_LOG takes precedence)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read and validate a CSAR package
    #[command(alias = "csar-validate")]
    Validate(ValidateArgs),
    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// CSAR file location (local path or URL)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Output directory to extract the CSAR into
    #[arg(short, long, value_name = "DIR")]
    pub destination: PathBuf,

    /// Do not verify the signer's certificate
    #[arg(long)]
    pub no_verify_cert: bool,

    /// Keep the extracted package instead of removing the destination
    #[arg(long)]
    pub keep: bool,
}
