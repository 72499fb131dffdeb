use std::fs;
use std::path::Path;

use isic_prep::organize::organize;
use isic_prep::{DatasetLayout, PrepError, Split};

const HEADER: &str = "image,MEL,NV,BCC,AKIEC,BKL,DF,VASC";

fn write_labels(layout: &DatasetLayout, split: Split, rows: &[&str]) {
    let path = layout.ground_truth_csv(split);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    fs::write(path, body).unwrap();
}

fn add_images(layout: &DatasetLayout, names: &[&str]) {
    let dir = layout.split_images_dir(Split::Training);
    fs::create_dir_all(&dir).unwrap();
    for name in names {
        fs::write(dir.join(name), b"\xff\xd8\xff").unwrap();
    }
}

fn manifest_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn keeps_only_rows_with_images() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(tmp.path());
    write_labels(
        &layout,
        Split::Training,
        &[
            "img1,1.0,0.0,0.0,0.0,0.0,0.0,0.0",
            "img2,0.0,1.0,0.0,0.0,0.0,0.0,0.0",
        ],
    );
    add_images(&layout, &["img1.jpg"]);

    let outcome = organize(&layout).unwrap();
    let summary = outcome.value();

    assert_eq!(summary.training_rows, 2);
    assert_eq!(summary.manifest_rows, 1);
    // no validation labels were provided
    assert!(outcome.is_degraded());

    let image_path = layout.split_images_dir(Split::Training).join("img1.jpg");
    assert_eq!(
        manifest_lines(&layout.manifest_path()),
        vec![
            "image_id,image_path,binary_label,split".to_string(),
            format!("img1,{},1,train", image_path.display()),
        ]
    );
    assert!(layout.dataset_info_path().exists());
}

#[test]
fn resolves_uppercase_extension_variant() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(tmp.path());
    write_labels(
        &layout,
        Split::Training,
        &["ISIC_0000001,0.0,0.0,1.0,0.0,0.0,0.0,0.0"],
    );
    add_images(&layout, &["ISIC_0000001.JPEG"]);

    organize(&layout).unwrap();

    let lines = manifest_lines(&layout.manifest_path());
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("ISIC_0000001,"));
    assert!(lines[1].contains("ISIC_0000001.JPEG"));
    assert!(lines[1].ends_with(",0,train"));
}

#[test]
fn missing_training_labels_fail_before_output_dir_exists() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(tmp.path());
    add_images(&layout, &["img1.jpg"]);

    let err = organize(&layout).unwrap_err();

    assert!(matches!(err, PrepError::MissingInput { .. }));
    assert!(err.to_string().contains("ISIC2018_Task3_Training_GroundTruth.csv"));
    assert!(!layout.processed_dir().exists());
}

#[test]
fn no_matching_images_is_fatal_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(tmp.path());
    write_labels(
        &layout,
        Split::Training,
        &["img1,1.0,0.0,0.0,0.0,0.0,0.0,0.0"],
    );
    add_images(&layout, &["img1.png", "other.jpg"]);

    let err = organize(&layout).unwrap_err();

    match &err {
        PrepError::EmptyManifest {
            dir_exists,
            file_count,
            sample,
            ..
        } => {
            assert!(*dir_exists);
            assert_eq!(*file_count, 2);
            assert_eq!(sample, &vec!["img1.png".to_string(), "other.jpg".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!layout.manifest_path().exists());
    assert!(!layout.dataset_info_path().exists());
}

#[test]
fn missing_image_directory_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(tmp.path());
    write_labels(
        &layout,
        Split::Training,
        &["img1,1.0,0.0,0.0,0.0,0.0,0.0,0.0"],
    );

    let err = organize(&layout).unwrap_err();
    assert!(matches!(
        err,
        PrepError::EmptyManifest {
            dir_exists: false,
            ..
        }
    ));
}

#[test]
fn rerun_overwrites_with_identical_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(tmp.path());
    write_labels(
        &layout,
        Split::Training,
        &[
            "img1,1.0,0.0,0.0,0.0,0.0,0.0,0.0",
            "img2,0.0,1.0,0.0,0.0,0.0,0.0,0.0",
            "img3,0.0,0.0,0.0,0.0,1.0,0.0,0.0",
        ],
    );
    write_labels(
        &layout,
        Split::Validation,
        &["img9,1.0,0.0,0.0,0.0,0.0,0.0,0.0"],
    );
    add_images(&layout, &["img1.jpg", "img2.jpeg", "img3.JPG"]);

    let first = organize(&layout).unwrap();
    assert!(!first.is_degraded());
    assert_eq!(first.value().validation_rows, Some(1));
    let first_bytes = fs::read(layout.manifest_path()).unwrap();

    fs::write(layout.manifest_path(), "stale").unwrap();
    organize(&layout).unwrap();
    let second_bytes = fs::read(layout.manifest_path()).unwrap();

    assert_eq!(first_bytes, second_bytes);
    let lines = manifest_lines(&layout.manifest_path());
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().skip(1).all(|line| line.ends_with(",train")));
    assert!(lines.iter().all(|line| !line.contains("img9")));
}

#[test]
fn missing_melanoma_column_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(tmp.path());
    let path = layout.ground_truth_csv(Split::Training);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "image,NV\nimg1,1.0\n").unwrap();
    add_images(&layout, &["img1.jpg"]);

    let err = organize(&layout).unwrap_err();
    assert!(matches!(err, PrepError::MissingColumn { .. }));
    assert!(!layout.processed_dir().exists());
}
