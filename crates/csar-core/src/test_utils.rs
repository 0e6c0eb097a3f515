//! Test helpers: in-memory CSAR archives and a one-shot HTTP server.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::net::TcpListener;
use std::thread;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Descriptor used by [`sample_csar`].
pub const SAMPLE_META: &str = "TOSCA-Meta-File-Version: 1.0\n\
CSAR-Version: 1.1\n\
Created-By: vendor-x\n\
Entry-Definitions: Definitions/main.yaml\n";

/// Entry definitions used by [`sample_csar`].
pub const SAMPLE_DEFINITIONS: &str = "tosca_definitions_version: tosca_simple_yaml_1_2\n\
description: sample package\n\
topology_template:\n  node_templates: {}\n";

/// Creates an in-memory ZIP archive from a list of (path, content) entries.
///
/// Paths ending in `/` become directory entries.
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (path, data) in entries {
        if path.ends_with('/') {
            zip.add_directory(*path, options).unwrap();
        } else {
            zip.start_file(*path, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// A minimal well-formed package with a descriptor and entry definitions.
#[must_use]
pub fn sample_csar() -> Vec<u8> {
    create_test_zip(&[
        ("TOSCA-Metadata/", b""),
        ("TOSCA-Metadata/TOSCA.meta", SAMPLE_META.as_bytes()),
        ("Definitions/", b""),
        ("Definitions/main.yaml", SAMPLE_DEFINITIONS.as_bytes()),
    ])
}

/// Serves a single HTTP response on a loopback port and returns its URL.
///
/// The server thread answers exactly one request and then exits.
#[must_use]
pub fn serve_once(status: u16, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let reason = match status {
            200 => "OK",
            204 => "No Content",
            403 => "Forbidden",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "Status",
        };
        let mut head = format!("HTTP/1.1 {status} {reason}\r\nConnection: close\r\n");
        if status != 204 {
            head.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        head.push_str("\r\n");

        let _ = stream.write_all(head.as_bytes());
        if status != 204 {
            let _ = stream.write_all(&body);
        }
        let _ = stream.flush();
    });

    format!("http://{addr}/pkg.csar")
}
