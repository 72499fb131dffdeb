use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal failures. Anything that lets a run continue is a warning on an [`Outcome`].
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("{what} not found at {}", .path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("column '{column}' missing from {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("{}: row {row}, column '{column}': '{value}' is not a number", .path.display())]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("no images found\n{}", empty_manifest_details(.images_dir, .dir_exists, .file_count, .sample))]
    EmptyManifest {
        images_dir: PathBuf,
        dir_exists: bool,
        file_count: usize,
        sample: Vec<String>,
    },

    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PrepError>;

fn empty_manifest_details(
    images_dir: &Path,
    dir_exists: &bool,
    file_count: &usize,
    sample: &[String],
) -> String {
    let mut details = format!(
        "   Checked directory: {}\n   Directory exists: {}",
        images_dir.display(),
        dir_exists
    );
    if *dir_exists {
        details.push_str(&format!("\n   Files in directory: {}", file_count));
        details.push_str(&format!("\n   First few files: {:?}", sample));
    }
    details
}

/// Result of a step that ran to completion, possibly without some optional inputs
/// or with some per-item failures.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Complete(T),
    Degraded { value: T, warnings: Vec<String> },
}

impl<T> Outcome<T> {
    /// `Complete` when `warnings` is empty, `Degraded` otherwise.
    pub fn with_warnings(value: T, warnings: Vec<String>) -> Self {
        if warnings.is_empty() {
            Outcome::Complete(value)
        } else {
            Outcome::Degraded { value, warnings }
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Outcome::Complete(_) => &[],
            Outcome::Degraded { warnings, .. } => warnings,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }
}
