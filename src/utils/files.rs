use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ensure required directories exist
pub fn ensure_directories(dirs: &[PathBuf]) -> io::Result<()> {
    for dir in dirs.iter().filter(|dir| !dir.exists()) {
        fs::create_dir_all(dir)?;
        println!("Created directory: {}", dir.display());
    }
    Ok(())
}

/// Count regular files directly inside `dir` whose extension is exactly `extension`.
///
/// The match is case-sensitive, so `jpg` does not count `.JPG` files. A missing
/// directory counts as zero.
pub fn count_files_with_extension(dir: &Path, extension: &str) -> io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext == extension);
        if matches {
            count += 1;
        }
    }
    Ok(count)
}

/// Total number of entries in `dir` and the first `limit` of their names, sorted.
pub fn sample_entries(dir: &Path, limit: usize) -> io::Result<(usize, Vec<String>)> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let total = names.len();
    names.truncate(limit);
    Ok((total, names))
}
