//! Discovery and extraction of downloaded timetable archives.

mod discover;
mod extract;

// Re-export public API
pub use discover::{discover_archives, ArchivePattern};
pub use extract::extract_archive;

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
