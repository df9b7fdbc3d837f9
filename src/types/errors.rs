use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve a remote resource into its local file.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported scheme '{scheme}' in {uri}")]
    UnsupportedScheme { uri: String, scheme: String },
    #[error("invalid source {uri}: {reason}")]
    InvalidSource { uri: String, reason: String },
    #[error("HTTP request to {uri} failed")]
    Http {
        uri: String,
        #[source]
        error: reqwest::Error,
    },
    #[error("{uri} answered with HTTP {status}")]
    Status { uri: String, status: u16 },
    #[error("FTP transfer of {uri} failed")]
    Ftp {
        uri: String,
        #[source]
        error: suppaftp::FtpError,
    },
    #[error("reading {uri} failed")]
    Read {
        uri: String,
        #[source]
        error: io::Error,
    },
    #[error("writing {} failed", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

/// Failure to locate or unpack a downloaded archive.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid archive pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        error: regex::Error,
    },
    #[error("listing {} failed", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("opening {} failed", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("{} is not a readable zip archive", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        error: zip::result::ZipError,
    },
    #[error("{} contains entry '{entry}' outside the target directory", .path.display())]
    UnsafeEntry { path: PathBuf, entry: String },
    #[error("writing {} failed", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

/// Failure to delete an archive after it was extracted.
#[derive(Debug, Error)]
#[error("deleting {} failed", .path.display())]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub error: io::Error,
}

/// Invalid configuration, detected before anything is fetched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate the tool directory")]
    ToolDir(#[source] io::Error),
    #[error("loading {} failed", .path.display())]
    DotEnv {
        path: PathBuf,
        #[source]
        error: dotenvy::Error,
    },
    #[error("{key}={value} is invalid: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error("invalid resource URI '{uri}'")]
    InvalidUri {
        uri: String,
        #[source]
        error: url::ParseError,
    },
    #[error("invalid destination file name '{file_name}': {reason}")]
    InvalidFileName { file_name: String, reason: String },
}

/// Any failure of a refresh run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("configuration error")]
    Config(#[from] ConfigError),
    #[error("fetching {file_name} failed")]
    Fetch {
        file_name: String,
        #[source]
        error: FetchError,
    },
    #[error("extraction failed")]
    Extraction(#[from] ExtractionError),
    #[error("cleanup failed")]
    Cleanup(#[from] CleanupError),
    #[error("writing progress output failed")]
    Output(#[source] io::Error),
}

pub type RefreshResult<T> = Result<T, RefreshError>;
