//! Fetch-then-extract orchestration.
//!
//! A run downloads every configured resource, then unpacks every archive in
//! the working directory that matches the archive pattern and deletes it.
//! The first failure of any step ends the run; nothing already written is
//! rolled back.

mod state;

pub use state::RunState;

use crate::services::archive::{discover_archives, extract_archive};
use crate::services::config::{tool_dir, RefreshConfig, PARSER_CACHE_FILE};
use crate::services::fetch::{Fetcher, RemoteFetcher};
use crate::types::errors::{CleanupError, RefreshError, RefreshResult};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub const EXTRACTING_MARKER: &str = "extracting";
pub const DONE_MARKER: &str = "done";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub file_name: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutcome {
    pub archive_name: String,
    pub files_extracted: usize,
}

/// What a successful run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched: Vec<FetchOutcome>,
    pub extracted: Vec<ExtractionOutcome>,
    pub cache_invalidated: bool,
}

struct Progress {
    state: RunState,
}

impl Progress {
    fn advance(&mut self, next: RunState) {
        match self.state.advance(next) {
            Some(state) => {
                debug!("Run state: {} -> {}", self.state, state);
                self.state = state;
            }
            None => warn!("Ignoring run state change {} -> {}", self.state, next),
        }
    }

    /// Marks the run failed if `result` is an error and passes it through.
    fn guard<T>(&mut self, result: RefreshResult<T>) -> RefreshResult<T> {
        if result.is_err() && !self.state.is_terminal() {
            self.advance(RunState::Failed);
        }
        result
    }
}

/// Refresh the working directory from the tool's own location with the
/// default resources and environment overrides, reporting progress on stdout.
pub fn run_default() -> RefreshResult<RunReport> {
    let config = RefreshConfig::from_env(tool_dir()?)?;
    let fetcher = RemoteFetcher::new(config.fetch_timeout);
    run(&config, &fetcher, &mut io::stdout())
}

/// Fetch all resources, then extract and delete every matching archive.
///
/// `out` receives the `extracting` and `done` progress markers.
pub fn run<F, W>(config: &RefreshConfig, fetcher: &F, out: &mut W) -> RefreshResult<RunReport>
where
    F: Fetcher + ?Sized,
    W: Write + ?Sized,
{
    run_with_cleanup(config, fetcher, out, &|archive: &Path| fs::remove_file(archive))
}

/// [`run`] with archive deletion routed through `remove`.
fn run_with_cleanup<F, W>(
    config: &RefreshConfig,
    fetcher: &F,
    out: &mut W,
    remove: &dyn Fn(&Path) -> io::Result<()>,
) -> RefreshResult<RunReport>
where
    F: Fetcher + ?Sized,
    W: Write + ?Sized,
{
    let mut progress = Progress {
        state: RunState::Start,
    };
    let mut report = RunReport::default();

    progress.advance(RunState::Fetching);
    for resource in &config.resources {
        let dest = config.work_dir.join(&resource.file_name);
        info!("Fetching {} -> {}", resource.source, dest.display());

        let bytes = progress.guard(fetcher.fetch(&resource.source, &dest).map_err(|error| {
            RefreshError::Fetch {
                file_name: resource.file_name.clone(),
                error,
            }
        }))?;

        info!("Fetched {} ({bytes} bytes)", resource.file_name);
        report.fetched.push(FetchOutcome {
            file_name: resource.file_name.clone(),
            bytes,
        });
    }

    progress.advance(RunState::Extracting);
    progress.guard(emit(out, EXTRACTING_MARKER))?;

    let archives = progress.guard(
        discover_archives(&config.work_dir, &config.archive_pattern).map_err(RefreshError::from),
    )?;
    for archive in archives {
        let outcome = progress.guard(extract_and_remove(&archive, &config.work_dir, remove))?;
        report.extracted.push(outcome);
    }

    if config.invalidate_cache {
        report.cache_invalidated = remove_parser_cache(&config.work_dir);
    }

    progress.advance(RunState::Done);
    // A failed marker write after all work succeeded still fails the run.
    emit(out, DONE_MARKER)?;

    Ok(report)
}

fn extract_and_remove(
    archive: &Path,
    work_dir: &Path,
    remove: &dyn Fn(&Path) -> io::Result<()>,
) -> RefreshResult<ExtractionOutcome> {
    let archive_name = archive
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let files_extracted = extract_archive(archive, work_dir)?;
    info!("Extracted {files_extracted} files from {archive_name}");

    remove(archive).map_err(|error| CleanupError {
        path: archive.to_path_buf(),
        error,
    })?;
    info!("Deleted {archive_name}");

    Ok(ExtractionOutcome {
        archive_name,
        files_extracted,
    })
}

/// Drop the timetable parser cache so the next load re-parses fresh data.
/// A cache that cannot be removed is logged, not fatal.
fn remove_parser_cache(work_dir: &Path) -> bool {
    let cache = work_dir.join(PARSER_CACHE_FILE);
    match fs::remove_file(&cache) {
        Ok(()) => {
            info!("Removed stale parser cache {}", cache.display());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!("Failed to remove parser cache {}: {e}", cache.display());
            false
        }
    }
}

fn emit<W: Write + ?Sized>(out: &mut W, marker: &str) -> RefreshResult<()> {
    writeln!(out, "{marker}")
        .and_then(|_| out.flush())
        .map_err(RefreshError::Output)
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
