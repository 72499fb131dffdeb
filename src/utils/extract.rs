use crate::error::Result;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Extract every entry of the zip archive at `archive` into `target`.
///
/// Entries already on disk are overwritten. Nothing is cleaned up if the
/// archive turns out to be corrupt halfway through. Returns the entry count.
pub fn extract_archive(archive: &Path, target: &Path) -> Result<usize> {
    fs::create_dir_all(target)?;

    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))?;
    let entries = zip.len();
    zip.extract(target)?;

    Ok(entries)
}
