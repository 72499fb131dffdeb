//! Fetch the challenge archives, unpack them, and optionally drop the zips.

use std::fs;
use std::io::BufRead;

use crate::archives::{ArchiveDescriptor, ARCHIVES};
use crate::error::{Outcome, Result};
use crate::layout::DatasetLayout;
use crate::utils::extract::extract_archive;
use crate::utils::files::ensure_directories;
use crate::utils::http::Fetch;
use crate::utils::prompt::confirm;

const DELETE_QUESTION: &str = "Delete zip files to save space? (y/n): ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub downloaded: usize,
    pub skipped_existing: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquireSummary {
    pub downloads: DownloadStats,
    pub extracted: usize,
    pub removed: usize,
}

fn banner(title: &str) {
    println!("\n{}", "=".repeat(70));
    println!("{}", title);
    println!("{}", "=".repeat(70));
}

/// Download every archive that is not already on disk.
///
/// A failed download is recorded as a warning and the loop moves on.
pub async fn download_missing<F: Fetch>(
    fetcher: &F,
    layout: &DatasetLayout,
    archives: &[ArchiveDescriptor],
) -> Outcome<DownloadStats> {
    let mut stats = DownloadStats::default();
    let mut warnings = Vec::new();

    for archive in archives {
        let name = archive.file_name();
        let destination = archive.local_path(layout);

        if destination.exists() {
            println!("\n{} already exists, skipping...", name);
            stats.skipped_existing += 1;
            continue;
        }

        let url = archive.url();
        println!("\nDownloading {}...", name);
        println!("  From: {}", url);

        match fetcher.fetch(&url, &destination).await {
            Ok(bytes) => {
                println!("  Downloaded successfully ({} bytes)", bytes);
                stats.downloaded += 1;
            }
            Err(e) => {
                log::error!("failed to download {}: {}", name, e);
                warnings.push(format!("download of {} failed: {}", name, e));
            }
        }
    }

    Outcome::with_warnings(stats, warnings)
}

/// Extract every archive present locally into its target directory.
pub fn extract_present(layout: &DatasetLayout, archives: &[ArchiveDescriptor]) -> Outcome<usize> {
    let mut extracted = 0;
    let mut warnings = Vec::new();

    for archive in archives {
        let name = archive.file_name();
        let path = archive.local_path(layout);

        if !path.exists() {
            log::warn!("{} not found, skipping extraction", name);
            warnings.push(format!("{} not found, extraction skipped", name));
            continue;
        }

        let target = archive.extract_dir(layout);
        println!("\nExtracting {}...", name);
        println!("  To: {}", target.display());

        match extract_archive(&path, &target) {
            Ok(entries) => {
                println!("  Extracted successfully ({} entries)", entries);
                extracted += 1;
            }
            Err(e) => {
                log::error!("failed to extract {}: {}", name, e);
                warnings.push(format!("extraction of {} failed: {}", name, e));
            }
        }
    }

    Outcome::with_warnings(extracted, warnings)
}

/// Delete the local archive copies that exist.
pub fn remove_archives(layout: &DatasetLayout, archives: &[ArchiveDescriptor]) -> Outcome<usize> {
    let mut removed = 0;
    let mut warnings = Vec::new();

    for archive in archives {
        let path = archive.local_path(layout);
        if !path.exists() {
            continue;
        }

        let name = archive.file_name();
        match fs::remove_file(&path) {
            Ok(()) => {
                println!("  Removed {}", name);
                removed += 1;
            }
            Err(e) => {
                log::error!("could not remove {}: {}", name, e);
                warnings.push(format!("could not remove {}: {}", name, e));
            }
        }
    }

    Outcome::with_warnings(removed, warnings)
}

/// Run the whole acquisition pass over the fixed archive table.
///
/// `input` supplies the answer to the deletion prompt. Only failing to create
/// the data directories is fatal.
pub async fn acquire<F: Fetch, R: BufRead>(
    fetcher: &F,
    layout: &DatasetLayout,
    input: &mut R,
) -> Result<Outcome<AcquireSummary>> {
    acquire_archives(fetcher, layout, &ARCHIVES, input).await
}

pub async fn acquire_archives<F: Fetch, R: BufRead>(
    fetcher: &F,
    layout: &DatasetLayout,
    archives: &[ArchiveDescriptor],
    input: &mut R,
) -> Result<Outcome<AcquireSummary>> {
    banner("ISIC 2018 Dataset Download");
    ensure_directories(&[layout.images_dir(), layout.labels_dir()])?;

    let mut warnings = Vec::new();

    let downloads = download_missing(fetcher, layout, archives).await;
    warnings.extend_from_slice(downloads.warnings());

    banner("Extracting files...");
    let extracted = extract_present(layout, archives);
    warnings.extend_from_slice(extracted.warnings());

    banner("Cleaning up zip files...");
    let removed = match confirm(DELETE_QUESTION, input) {
        Ok(true) => {
            let removed = remove_archives(layout, archives);
            warnings.extend_from_slice(removed.warnings());
            removed.into_value()
        }
        Ok(false) => 0,
        Err(e) => {
            log::warn!("could not read answer, keeping zip files: {}", e);
            warnings.push(format!("deletion prompt failed: {}", e));
            0
        }
    };

    banner("Download complete!");
    println!("\nImages location: {}", layout.images_dir().display());
    println!("Labels location: {}", layout.labels_dir().display());

    let summary = AcquireSummary {
        downloads: downloads.into_value(),
        extracted: extracted.into_value(),
        removed,
    };
    Ok(Outcome::with_warnings(summary, warnings))
}
