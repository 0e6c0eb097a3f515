//! Shared fixtures for integration tests.
//!
//! The archive builder and HTTP server are the crate's own unit-test
//! helpers, compiled in here so both suites serve identical responses.

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

#[path = "../../src/test_utils.rs"]
mod test_utils;

use std::net::TcpListener;
use std::path::Path;
use std::path::PathBuf;

pub use test_utils::create_test_zip as zip_bytes;
pub use test_utils::serve_once;

/// Builds a descriptor with the four required header fields.
pub fn tosca_meta(created_by: &str, csar_version: &str, meta_version: &str, entry: &str) -> String {
    format!(
        "TOSCA-Meta-File-Version: {meta_version}\n\
         CSAR-Version: {csar_version}\n\
         Created-By: {created_by}\n\
         Entry-Definitions: {entry}\n"
    )
}

/// The `vendor-x` package used by the end-to-end scenarios.
pub fn vendor_package() -> Vec<u8> {
    let meta = tosca_meta("vendor-x", "1.1", "1.0", "Definitions/main.yaml");
    zip_bytes(&[
        ("TOSCA-Metadata/TOSCA.meta", meta.as_bytes()),
        (
            "Definitions/main.yaml",
            b"tosca_definitions_version: tosca_simple_yaml_1_3\nmetadata:\n  template_name: main\n",
        ),
    ])
}

/// Writes `data` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

/// A loopback listener that records whether anyone connected.
pub struct SilentListener {
    listener: TcpListener,
}

impl SilentListener {
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        Self { listener }
    }

    pub fn url(&self) -> String {
        format!("http://{}/pkg.csar", self.listener.local_addr().unwrap())
    }

    /// Returns `true` if a connection is waiting to be accepted.
    pub fn was_contacted(&self) -> bool {
        self.listener.accept().is_ok()
    }
}
