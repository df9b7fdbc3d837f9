use crate::types::errors::ExtractionError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Shell-style file name glob: `*` matches any run of characters, `?` a
/// single character, everything else matches literally.
#[derive(Debug, Clone)]
pub struct ArchivePattern {
    regex: Regex,
}

impl ArchivePattern {
    pub fn new(pattern: &str) -> Result<Self, ExtractionError> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        for c in pattern.chars() {
            match c {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                c => source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|error| ExtractionError::Pattern {
            pattern: pattern.to_string(),
            error,
        })?;
        Ok(Self { regex })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

/// Regular files directly inside `dir` whose name matches `pattern`, in
/// lexical order.
pub fn discover_archives(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ExtractionError> {
    let matcher = ArchivePattern::new(pattern)?;
    let scan_err = |error| ExtractionError::Scan {
        dir: dir.to_path_buf(),
        error,
    };

    let mut archives = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        if !entry.file_type().map_err(scan_err)?.is_file() {
            continue;
        }
        let name = entry.file_name();
        match name.to_str() {
            Some(name) if matcher.matches(name) => archives.push(entry.path()),
            _ => {}
        }
    }

    archives.sort();
    Ok(archives)
}
