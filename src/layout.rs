use std::fmt;
use std::path::PathBuf;

/// Dataset partitions shipped by the ISIC 2018 Task 3 challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Training,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Training, Split::Validation, Split::Test];

    fn challenge_name(&self) -> &'static str {
        match self {
            Split::Training => "Training",
            Split::Validation => "Validation",
            Split::Test => "Test",
        }
    }

    /// Directory the image archive for this split extracts to.
    pub fn input_dir_name(&self) -> String {
        format!("ISIC2018_Task3_{}_Input", self.challenge_name())
    }

    /// Directory and file stem of the ground truth for this split.
    pub fn ground_truth_name(&self) -> String {
        format!("ISIC2018_Task3_{}_GroundTruth", self.challenge_name())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.challenge_name())
    }
}

/// Every fixed location the utilities read or write, relative to `root`.
///
/// The default root is the empty path, so emitted paths stay relative to the
/// working directory (`data/raw/...`).
#[derive(Debug, Clone, Default)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where archives are downloaded to.
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("data").join("raw")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.raw_dir().join("images")
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.raw_dir().join("labels")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("data").join("processed")
    }

    /// `data/raw/images/<split>_Input`
    pub fn split_images_dir(&self, split: Split) -> PathBuf {
        self.images_dir().join(split.input_dir_name())
    }

    /// `data/raw/labels/<split>_GroundTruth/<split>_GroundTruth.csv`
    pub fn ground_truth_csv(&self, split: Split) -> PathBuf {
        let name = split.ground_truth_name();
        self.labels_dir().join(&name).join(format!("{}.csv", name))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.processed_dir().join("labels_binary.csv")
    }

    pub fn dataset_info_path(&self) -> PathBuf {
        self.processed_dir().join("DATASET_INFO.md")
    }
}
