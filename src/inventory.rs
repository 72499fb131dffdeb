//! Best-effort dataset statistics.

use crate::error::{Outcome, Result};
use crate::ground_truth::{format_count, GroundTruthTable};
use crate::layout::{DatasetLayout, Split};
use crate::utils::files::count_files_with_extension;

/// Extension counted in the image directories, matched case-sensitively.
pub const IMAGE_EXTENSION: &str = "jpg";

fn load_optional(layout: &DatasetLayout, split: Split) -> Result<Option<GroundTruthTable>> {
    let path = layout.ground_truth_csv(split);
    if !path.exists() {
        return Ok(None);
    }
    GroundTruthTable::load(&path).map(Some)
}

/// `*.jpg` count for each split directory.
pub fn count_images(layout: &DatasetLayout) -> Result<Vec<(Split, usize)>> {
    let mut images = Vec::with_capacity(Split::ALL.len());
    for split in Split::ALL {
        let count = count_files_with_extension(&layout.split_images_dir(split), IMAGE_EXTENSION)?;
        images.push((split, count));
    }
    Ok(images)
}

/// Training and validation tables, `None` for whichever is missing.
pub fn load_labels(
    layout: &DatasetLayout,
) -> Result<Outcome<(Option<GroundTruthTable>, Option<GroundTruthTable>)>> {
    let mut warnings = Vec::new();
    let training = load_optional(layout, Split::Training)?;
    if training.is_none() {
        warnings.push(format!(
            "training labels not found at {}",
            layout.ground_truth_csv(Split::Training).display()
        ));
    }
    let validation = load_optional(layout, Split::Validation)?;
    if validation.is_none() {
        warnings.push(format!(
            "validation labels not found at {}",
            layout.ground_truth_csv(Split::Validation).display()
        ));
    }
    Ok(Outcome::with_warnings((training, validation), warnings))
}

fn label_line(name: &str, table: Option<&GroundTruthTable>) -> String {
    match table {
        Some(table) => format!("  {:<11} {:>5} labels", format!("{}:", name), table.len()),
        None => format!("  {:<11} NOT FOUND", format!("{}:", name)),
    }
}

fn render_images(images: &[(Split, usize)]) -> String {
    let mut lines = vec!["\nImages:".to_string()];
    for (split, count) in images {
        lines.push(format!("  {:<11} {:>5} images", format!("{}:", split), count));
    }
    let total: usize = images.iter().map(|(_, count)| count).sum();
    lines.push(format!("  {:<11} {:>5} images", "Total:", total));
    lines.join("\n")
}

fn render_labels(
    training: Option<&GroundTruthTable>,
    validation: Option<&GroundTruthTable>,
) -> String {
    let mut lines = vec!["\nLabels:".to_string()];
    lines.push(label_line("Training", training));
    lines.push(label_line("Validation", validation));
    lines.push(format!("  {:<11} {:>5} (no public labels)", "Test:", "N/A"));

    if let Some(table) = training {
        lines.push("\nClass Distribution (Training):".to_string());
        for (category, total) in table.category_totals() {
            lines.push(format!("  {:<6}: {:>4}", category, format_count(total)));
        }
    }

    lines.join("\n")
}

/// The statistics text, images first. A failure ends the text with a single
/// `Could not count files` line, keeping whatever was rendered before it.
pub fn report_text(layout: &DatasetLayout) -> String {
    let mut sections = Vec::new();

    let labels = count_images(layout).and_then(|images| {
        sections.push(render_images(&images));
        load_labels(layout)
    });

    match labels {
        Ok(labels) => {
            for warning in labels.warnings() {
                log::debug!("{}", warning);
            }
            let (training, validation) = labels.value();
            sections.push(render_labels(training.as_ref(), validation.as_ref()));
        }
        Err(e) => {
            log::debug!("inventory failed: {:?}", e);
            sections.push(format!("\nCould not count files: {}", e));
        }
    }

    sections.join("\n")
}

/// Print dataset statistics. Any failure is reported as a single line and
/// swallowed, so callers can always exit cleanly.
pub fn report(layout: &DatasetLayout) {
    println!("\n{}", "=".repeat(70));
    println!("Dataset Statistics");
    println!("{}", "=".repeat(70));
    println!("{}", report_text(layout));
}
