use std::path::PathBuf;

use crate::layout::{DatasetLayout, Split};

const BASE_URL: &str = "https://isic-challenge-data.s3.amazonaws.com/2018";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveContent {
    Images,
    Labels,
}

/// One remote challenge archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveDescriptor {
    pub split: Split,
    pub content: ArchiveContent,
}

pub const ARCHIVES: [ArchiveDescriptor; 5] = [
    ArchiveDescriptor {
        split: Split::Training,
        content: ArchiveContent::Images,
    },
    ArchiveDescriptor {
        split: Split::Training,
        content: ArchiveContent::Labels,
    },
    ArchiveDescriptor {
        split: Split::Validation,
        content: ArchiveContent::Images,
    },
    ArchiveDescriptor {
        split: Split::Validation,
        content: ArchiveContent::Labels,
    },
    ArchiveDescriptor {
        split: Split::Test,
        content: ArchiveContent::Images,
    },
];

impl ArchiveDescriptor {
    /// e.g. `ISIC2018_Task3_Training_Input.zip`
    pub fn file_name(&self) -> String {
        let stem = match self.content {
            ArchiveContent::Images => self.split.input_dir_name(),
            ArchiveContent::Labels => self.split.ground_truth_name(),
        };
        format!("{}.zip", stem)
    }

    pub fn url(&self) -> String {
        format!("{}/{}", BASE_URL, self.file_name())
    }

    /// Where the archive is kept locally.
    pub fn local_path(&self, layout: &DatasetLayout) -> PathBuf {
        layout.raw_dir().join(self.file_name())
    }

    /// Directory the archive contents are extracted into.
    pub fn extract_dir(&self, layout: &DatasetLayout) -> PathBuf {
        match self.content {
            ArchiveContent::Images => layout.images_dir(),
            ArchiveContent::Labels => layout.labels_dir(),
        }
    }
}
