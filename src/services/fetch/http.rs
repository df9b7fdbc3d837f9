use crate::types::errors::FetchError;
use reqwest::blocking::Client;
use std::fs::File;
use std::time::Duration;
use url::Url;

pub(super) fn retrieve(
    source: &Url,
    file: &mut File,
    timeout: Option<Duration>,
) -> Result<u64, FetchError> {
    let http_err = |error| FetchError::Http {
        uri: source.to_string(),
        error,
    };

    let client = Client::builder().timeout(timeout).build().map_err(http_err)?;
    let mut response = client.get(source.clone()).send().map_err(http_err)?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            uri: source.to_string(),
            status: response.status().as_u16(),
        });
    }

    response.copy_to(file).map_err(http_err)
}
