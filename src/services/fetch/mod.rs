//! Retrieval of remote resources into local files.
//!
//! Every transport writes into a temporary file next to the destination and
//! only replaces the destination once the whole body has arrived, so a failed
//! transfer never leaves a truncated archive under the destination name.

mod ftp;
mod http;
mod local;

use crate::types::errors::FetchError;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use url::Url;

/// Retrieves the full body of `source` into `dest`, returning the byte count.
pub trait Fetcher {
    fn fetch(&self, source: &Url, dest: &Path) -> Result<u64, FetchError>;
}

/// Fetcher for `ftp://`, `http(s)://` and `file://` sources.
#[derive(Debug, Clone, Default)]
pub struct RemoteFetcher {
    timeout: Option<Duration>,
}

impl RemoteFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Fetcher for RemoteFetcher {
    fn fetch(&self, source: &Url, dest: &Path) -> Result<u64, FetchError> {
        match source.scheme() {
            "ftp" => write_atomically(dest, |file| ftp::retrieve(source, file, self.timeout)),
            "http" | "https" => {
                write_atomically(dest, |file| http::retrieve(source, file, self.timeout))
            }
            "file" => write_atomically(dest, |file| local::retrieve(source, file)),
            scheme => Err(FetchError::UnsupportedScheme {
                uri: source.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }
}

/// Runs `transfer` against a temporary file in `dest`'s directory, then moves
/// it over `dest`. The temporary file is removed if `transfer` fails.
pub fn write_atomically<F>(dest: &Path, transfer: F) -> Result<u64, FetchError>
where
    F: FnOnce(&mut File) -> Result<u64, FetchError>,
{
    let write_err = |error| FetchError::Write {
        path: dest.to_path_buf(),
        error,
    };

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;

    let bytes = transfer(tmp.as_file_mut())?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(dest).map_err(|e| write_err(e.error))?;

    Ok(bytes)
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
