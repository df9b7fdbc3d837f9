use crate::types::errors::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Glob matched against the working directory to find archives to unpack.
pub const DEFAULT_ARCHIVE_PATTERN: &str = "spoje*.zip";

/// Parser cache left behind by the timetable loader.
pub const PARSER_CACHE_FILE: &str = "cache.bin";

/// The fixed (source, destination) pairs, fetched in this order.
pub const DEFAULT_RESOURCES: [(&str, &str); 3] = [
    (
        "ftp://ftp.cisjr.cz/netex/NeTEx_VerejnaLinkovaDoprava.zip",
        "spoje_autobusy.zip",
    ),
    (
        "ftp://ftp.cisjr.cz/netex/NeTEx_DrahyCelostatni.zip",
        "spoje_vlaky.zip",
    ),
    (
        "ftp://ftp.cisjr.cz/netex/NeTEx_DrahyMestske.zip",
        "spoje_mhd.zip",
    ),
];

/// A remote resource and the local file it is downloaded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub source: Url,
    pub file_name: String,
}

impl ResourceDescriptor {
    pub fn new(source: &str, file_name: impl Into<String>) -> Result<Self, ConfigError> {
        let file_name = file_name.into();
        validate_file_name(&file_name)?;

        let source = Url::parse(source).map_err(|error| ConfigError::InvalidUri {
            uri: source.to_string(),
            error,
        })?;

        Ok(Self { source, file_name })
    }
}

/// Destination names are written relative to the working directory and must
/// not leave it.
fn validate_file_name(file_name: &str) -> Result<(), ConfigError> {
    let reason = if file_name.is_empty() {
        Some("empty")
    } else if file_name == "." || file_name == ".." {
        Some("not a file name")
    } else if file_name.contains('/') || file_name.contains('\\') {
        Some("contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidFileName {
            file_name: file_name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn default_resources() -> Result<Vec<ResourceDescriptor>, ConfigError> {
    DEFAULT_RESOURCES
        .iter()
        .map(|(source, file_name)| ResourceDescriptor::new(source, *file_name))
        .collect()
}

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Directory archives are downloaded to and unpacked into.
    pub work_dir: PathBuf,
    pub resources: Vec<ResourceDescriptor>,
    pub archive_pattern: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
    /// Remove [`PARSER_CACHE_FILE`] after a successful run.
    pub invalidate_cache: bool,
}

impl RefreshConfig {
    pub fn new(work_dir: impl Into<PathBuf>, resources: Vec<ResourceDescriptor>) -> Self {
        Self {
            work_dir: work_dir.into(),
            resources,
            archive_pattern: DEFAULT_ARCHIVE_PATTERN.to_string(),
            fetch_timeout: None,
            invalidate_cache: false,
        }
    }
}
