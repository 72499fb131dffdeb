//! Collapse the seven diagnostic categories into melanoma vs benign and
//! write a manifest of the training images that exist on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Outcome, PrepError, Result};
use crate::ground_truth::{format_count, BinaryDistribution, GroundTruthTable, MELANOMA_COLUMN};
use crate::layout::{DatasetLayout, Split};
use crate::utils::files::sample_entries;

/// Suffixes appended to an image identifier, tried in order.
pub const CANDIDATE_SUFFIXES: [&str; 4] = [".jpg", ".jpeg", ".JPG", ".JPEG"];

/// Every manifest row comes from the training split.
pub const MANIFEST_SPLIT: &str = "train";

const DIAGNOSTIC_SAMPLE: usize = 5;

/// One row of `labels_binary.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRecord {
    pub image_id: String,
    pub image_path: String,
    pub binary_label: u8,
    pub split: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizeSummary {
    pub training_rows: usize,
    pub validation_rows: Option<usize>,
    pub distribution: BinaryDistribution,
    pub manifest_rows: usize,
    pub manifest_path: PathBuf,
    pub dataset_info_path: PathBuf,
}

/// First existing `<dir>/<id><suffix>` over [`CANDIDATE_SUFFIXES`].
pub fn resolve_image_path(images_dir: &Path, image_id: &str) -> Option<PathBuf> {
    CANDIDATE_SUFFIXES
        .iter()
        .map(|suffix| images_dir.join(format!("{}{}", image_id, suffix)))
        .find(|candidate| candidate.is_file())
}

/// Manifest rows for every labelled record whose image resolves, in table order.
///
/// Records without a file are dropped silently. Labels must already be derived.
pub fn build_manifest(table: &GroundTruthTable, images_dir: &Path) -> Vec<ManifestRecord> {
    table
        .records()
        .iter()
        .filter_map(|record| {
            let label = record.binary_label?;
            let path = resolve_image_path(images_dir, &record.id)?;
            Some(ManifestRecord {
                image_id: record.id.clone(),
                image_path: path.to_string_lossy().into_owned(),
                binary_label: label,
                split: MANIFEST_SPLIT,
            })
        })
        .collect()
}

/// Overwrite `path` with the manifest, header included.
pub fn write_manifest(path: &Path, records: &[ManifestRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Fatal error describing what the image directory actually holds.
pub fn empty_manifest_error(images_dir: &Path) -> PrepError {
    let dir_exists = images_dir.is_dir();
    let (file_count, sample) = if dir_exists {
        sample_entries(images_dir, DIAGNOSTIC_SAMPLE).unwrap_or_default()
    } else {
        (0, Vec::new())
    };

    PrepError::EmptyManifest {
        images_dir: images_dir.to_path_buf(),
        dir_exists,
        file_count,
        sample,
    }
}

/// Markdown summary written next to the manifest.
pub fn render_dataset_info(training_samples: usize, distribution: &BinaryDistribution) -> String {
    format!(
        r#"# ISIC 2018 Dataset

## Overview
International Skin Imaging Collaboration (ISIC) 2018 Challenge Dataset for melanoma detection.

## Dataset Statistics
- **Training samples**: {training_samples}
- **Task**: Multi-class classification (7 diagnostic categories)
- **Our use**: Binary classification (Melanoma vs Benign)

## Classes (Original)
1. MEL: Melanoma
2. NV: Melanocytic nevus
3. BCC: Basal cell carcinoma
4. AKIEC: Actinic keratosis / Bowen's disease
5. BKL: Benign keratosis
6. DF: Dermatofibroma
7. VASC: Vascular lesion

## Binary Classification
- **Class 0 (Benign)**: All classes except MEL
- **Class 1 (Melanoma)**: MEL only

## Class Distribution (Binary)
- Benign: {benign} samples
- Melanoma: {melanoma} samples
- **Imbalance ratio**: {ratio}

## Image Properties
- **Format**: JPEG
- **Color**: RGB
- **Size**: Variable

## Files Created
- `data/processed/labels_binary.csv`: Binary labels with file paths
  (columns `image_id`, `image_path`, `binary_label`, `split`)

## Usage
```rust
let mut reader = csv::Reader::from_path("data/processed/labels_binary.csv")?;
for row in reader.records() {{
    let row = row?;
    println!("{{}} -> label {{}}", &row[1], &row[2]);
}}
```

## Citation
Codella N, Gutman D, Celebi ME, et al.
Skin Lesion Analysis Toward Melanoma Detection 2018:
A Challenge Hosted by the International Skin Imaging Collaboration (ISIC).
arXiv:1902.03368, 2019.

## Links
- Challenge website: https://challenge.isic-archive.com/landing/2018/
- Paper: https://arxiv.org/abs/1902.03368
"#,
        training_samples = training_samples,
        benign = distribution.benign,
        melanoma = distribution.melanoma,
        ratio = distribution.ratio_display(),
    )
}

fn print_distribution(title: &str, distribution: &BinaryDistribution) {
    println!("\n{}", title);
    println!("  Benign (0): {}", distribution.benign);
    println!("  Melanoma (1): {}", distribution.melanoma);
    println!("  Ratio: {}", distribution.ratio_display());
}

/// Build `labels_binary.csv` and `DATASET_INFO.md` from the training labels.
///
/// Fails before touching `data/processed` when the training labels are
/// missing, and writes nothing when no training image resolves.
pub fn organize(layout: &DatasetLayout) -> Result<Outcome<OrganizeSummary>> {
    println!("{}", "=".repeat(70));
    println!("ORGANIZING ISIC 2018 DATASET");
    println!("{}", "=".repeat(70));

    let mut warnings = Vec::new();

    println!("\n1. Loading ground truth labels...");
    let train_path = layout.ground_truth_csv(Split::Training);
    if !train_path.exists() {
        return Err(PrepError::MissingInput {
            what: "training labels",
            path: train_path,
        });
    }

    let mut train = GroundTruthTable::load(&train_path)?;
    println!("Training samples: {}", train.len());
    if train.is_empty() {
        log::warn!("{} has a header but no rows", train_path.display());
    }

    let val_path = layout.ground_truth_csv(Split::Validation);
    let mut validation = if val_path.exists() {
        let table = GroundTruthTable::load(&val_path)?;
        println!("Validation samples: {}", table.len());
        Some(table)
    } else {
        println!("Validation labels not found (training labels are enough)");
        warnings.push(format!(
            "validation labels not found at {}",
            val_path.display()
        ));
        None
    };

    println!("\n2. Analyzing label structure...");
    let mut columns = vec![train.id_column().to_string()];
    columns.extend(train.categories().iter().cloned());
    println!("\nColumns: {:?}", columns);

    println!("\nClass distribution:");
    for (category, total) in train.category_totals() {
        println!("  {}: {}", category, format_count(total));
    }

    println!("\n3. Creating binary labels (Melanoma vs Benign)...");
    train.derive_binary_labels(MELANOMA_COLUMN)?;
    let distribution = train.binary_distribution();
    print_distribution("Binary distribution (training):", &distribution);

    if let Some(table) = validation.as_mut() {
        table.derive_binary_labels(MELANOMA_COLUMN)?;
        print_distribution("Binary distribution (validation):", &table.binary_distribution());
    }

    println!("\n4. Creating file path mapping...");
    let images_dir = layout.split_images_dir(Split::Training);
    let manifest = build_manifest(&train, &images_dir);

    if manifest.is_empty() {
        return Err(empty_manifest_error(&images_dir));
    }

    let processed_dir = layout.processed_dir();
    fs::create_dir_all(&processed_dir)?;

    let manifest_path = layout.manifest_path();
    write_manifest(&manifest_path, &manifest)?;

    let on_disk = manifest
        .iter()
        .filter(|record| Path::new(&record.image_path).exists())
        .count();
    println!("Saved binary labels to: {}", manifest_path.display());
    println!("  Total images: {}", manifest.len());
    println!("  Images with existing files: {}", on_disk);
    println!("  Missing images: {}", manifest.len() - on_disk);

    let dropped = train.len() - manifest.len();
    if dropped > 0 {
        log::info!("{} labelled rows had no image on disk", dropped);
    }

    println!("\n5. Creating dataset documentation...");
    let dataset_info_path = layout.dataset_info_path();
    fs::write(
        &dataset_info_path,
        render_dataset_info(train.len(), &distribution),
    )?;
    println!("Created dataset documentation: {}", dataset_info_path.display());

    println!("\n{}", "=".repeat(70));
    println!("DATASET ORGANIZATION COMPLETE");
    println!("{}", "=".repeat(70));
    println!("\nBinary labels saved to: {}", manifest_path.display());
    println!("Documentation saved to: {}", dataset_info_path.display());

    let summary = OrganizeSummary {
        training_rows: train.len(),
        validation_rows: validation.as_ref().map(GroundTruthTable::len),
        distribution,
        manifest_rows: manifest.len(),
        manifest_path,
        dataset_info_path,
    };
    Ok(Outcome::with_warnings(summary, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), b"jpeg").unwrap();
    }

    #[test]
    fn resolves_plain_jpg_first() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "ISIC_0000001.jpg");
        touch(tmp.path(), "ISIC_0000001.jpeg");

        assert_eq!(
            resolve_image_path(tmp.path(), "ISIC_0000001"),
            Some(tmp.path().join("ISIC_0000001.jpg"))
        );
    }

    #[test]
    fn falls_back_to_uppercase_jpeg() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "ISIC_0000001.JPEG");

        assert_eq!(
            resolve_image_path(tmp.path(), "ISIC_0000001"),
            Some(tmp.path().join("ISIC_0000001.JPEG"))
        );
    }

    #[test]
    fn unresolved_identifier_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "ISIC_0000002.png");
        assert_eq!(resolve_image_path(tmp.path(), "ISIC_0000002"), None);
    }

    #[test]
    fn directories_do_not_resolve() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("ISIC_0000003.jpg")).unwrap();
        assert_eq!(resolve_image_path(tmp.path(), "ISIC_0000003"), None);
    }

    #[test]
    fn dataset_info_substitutes_counts() {
        let info = render_dataset_info(
            10015,
            &BinaryDistribution {
                benign: 8902,
                melanoma: 1113,
            },
        );
        assert!(info.contains("- **Training samples**: 10015"));
        assert!(info.contains("- Benign: 8902 samples"));
        assert!(info.contains("- Melanoma: 1113 samples"));
        assert!(info.contains("- **Imbalance ratio**: 8.0:1"));
        assert!(info.contains("## Usage"));
        assert!(info.contains("println!(\"{} -> label {}\", &row[1], &row[2]);"));
    }

    #[test]
    fn empty_manifest_error_samples_directory() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["f.png", "e.png", "d.png", "c.png", "b.png", "a.png"] {
            touch(tmp.path(), name);
        }

        match empty_manifest_error(tmp.path()) {
            PrepError::EmptyManifest {
                dir_exists,
                file_count,
                sample,
                ..
            } => {
                assert!(dir_exists);
                assert_eq!(file_count, 6);
                assert_eq!(sample, vec!["a.png", "b.png", "c.png", "d.png", "e.png"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn manifest_serializes_with_expected_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("labels_binary.csv");
        let records = vec![ManifestRecord {
            image_id: "img1".to_string(),
            image_path: "data/raw/images/img1.jpg".to_string(),
            binary_label: 1,
            split: "train",
        }];

        write_manifest(&path, &records).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "image_id,image_path,binary_label,split\nimg1,data/raw/images/img1.jpg,1,train\n"
        );
    }
}
