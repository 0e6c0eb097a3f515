//! Blocking HTTP download of remote packages.

use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::ClientBuilder;
use reqwest::blocking::Response;
use url::Host;
use url::Url;

use crate::CsarError;
use crate::ProgressCallback;
use crate::Result;

/// Parses a remote locator into a URL.
pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| CsarError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Obtain an HTTP client for `url`.
///
/// Proxy settings come from the standard `*_PROXY` environment variables;
/// loopback hosts are always contacted directly.
pub fn get_http_client(url: &Url) -> reqwest::Result<Client> {
    let mut builder = ClientBuilder::new().user_agent(concat!("csar/", env!("CARGO_PKG_VERSION")));

    if is_loopback(url) {
        builder = builder.no_proxy();
    }

    builder.build()
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Issues a GET and accepts only a `200 OK` response.
///
/// Nothing is written anywhere until the status has been checked.
pub fn fetch(client: &Client, url: &Url) -> Result<Response> {
    let response = client.get(url.clone()).send()?;
    let status = response.status();

    if status != StatusCode::OK {
        tracing::debug!(%url, status = status.as_u16(), "download rejected");
        return Err(CsarError::Download {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// Streams a response body into `target` in chunks of `chunk_size` bytes.
///
/// Returns the number of bytes written.
pub fn stream_body<R: Read, W: Write>(
    mut body: R,
    target: &mut W,
    chunk_size: usize,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CsarError::Io(e)),
        };

        target.write_all(&buf[..n])?;
        total += n as u64;
        progress.on_bytes_downloaded(n as u64);
    }

    Ok(total)
}
