use crate::types::errors::FetchError;
use std::fs::File;
use std::io;
use url::Url;

pub(super) fn retrieve(source: &Url, file: &mut File) -> Result<u64, FetchError> {
    let path = source
        .to_file_path()
        .map_err(|_| FetchError::InvalidSource {
            uri: source.to_string(),
            reason: "not a local file path".to_string(),
        })?;

    let read_err = |error| FetchError::Read {
        uri: source.to_string(),
        error,
    };

    let mut input = File::open(&path).map_err(read_err)?;
    io::copy(&mut input, file).map_err(read_err)
}
