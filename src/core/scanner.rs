//! Input directory scanning and output path mapping.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while scanning the input directory.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read input directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// List the data tables directly contained in `dir`.
///
/// Keeps entries whose extension matches `data_ext` (ASCII
/// case-insensitive). The order is whatever the file system enumeration
/// yields; callers that need a stable order must sort.
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be read.
pub fn scan_input_dir(dir: &Path, data_ext: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let files = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case(data_ext))
                .unwrap_or(false)
        })
        .collect();

    Ok(files)
}

/// Map an input table path to its output image path.
///
/// The output file keeps the input's name with the extension replaced,
/// joined onto `output_dir`: `tables/KIC123.tbl` becomes
/// `images/KIC123.png`. Base name and case are preserved.
pub fn output_path_for(input: &Path, output_dir: &Path, image_ext: &str) -> PathBuf {
    let name = input.file_name().unwrap_or_default();
    output_dir.join(name).with_extension(image_ext)
}

/// Find inputs whose output names collide on a case-insensitive file system.
///
/// Two tables such as `a.tbl` and `A.tbl` map to `a.png` and `A.png`,
/// which are the same file on case-insensitive file systems. Returns
/// `(kept, colliding)` pairs so callers can warn before one silently
/// overwrites the other.
pub fn find_name_collisions(inputs: &[PathBuf]) -> Vec<(PathBuf, PathBuf)> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::with_capacity(inputs.len());
    let mut collisions = Vec::new();

    for path in inputs {
        let key = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_lowercase();

        if let Some(first) = seen.get(key.as_str()) {
            collisions.push(((*first).clone(), path.clone()));
        } else {
            seen.insert(key, path);
        }
    }

    collisions
}
