use crate::types::errors::ExtractionError;
use std::fs;
use std::io;
use std::path::Path;

/// Extract every entry of the zip at `archive_path` into `dest_dir`,
/// overwriting files that already exist. Returns the number of files written.
///
/// Stops at the first failure; files written before it stay in place.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractionError> {
    let file = fs::File::open(archive_path).map_err(|error| ExtractionError::Open {
        path: archive_path.to_path_buf(),
        error,
    })?;
    let corrupt = |error| ExtractionError::Corrupt {
        path: archive_path.to_path_buf(),
        error,
    };
    let mut archive = zip::ZipArchive::new(file).map_err(corrupt)?;

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(corrupt)?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                return Err(ExtractionError::UnsafeEntry {
                    path: archive_path.to_path_buf(),
                    entry: entry.name().to_string(),
                })
            }
        };

        let output_path = dest_dir.join(&entry_path);
        let write_err = |error| ExtractionError::Write {
            path: output_path.clone(),
            error,
        };

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(write_err)?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut outfile = fs::File::create(&output_path).map_err(write_err)?;
        io::copy(&mut entry, &mut outfile).map_err(|error| {
            // A failed CRC check or inflate surfaces as an I/O error on read.
            if error.kind() == io::ErrorKind::InvalidData {
                corrupt(zip::result::ZipError::Io(error))
            } else {
                write_err(error)
            }
        })?;

        log::debug!("Extracted {}", entry_path.display());
        count += 1;
    }

    Ok(count)
}
