//! Ground truth tables: one image identifier column followed by one one-hot
//! column per diagnostic category.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{PrepError, Result};

/// Category that maps to the positive class of the binary target.
pub const MELANOMA_COLUMN: &str = "MEL";

#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthRecord {
    pub id: String,
    pub category_scores: BTreeMap<String, f64>,
    /// `None` until [`GroundTruthTable::derive_binary_labels`] runs.
    pub binary_label: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct GroundTruthTable {
    path: PathBuf,
    id_column: String,
    categories: Vec<String>,
    records: Vec<GroundTruthRecord>,
}

/// Counts of the binary target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryDistribution {
    pub benign: usize,
    pub melanoma: usize,
}

impl BinaryDistribution {
    /// Benign rows per melanoma row, `None` without any melanoma rows.
    pub fn imbalance_ratio(&self) -> Option<f64> {
        if self.melanoma == 0 {
            None
        } else {
            Some(self.benign as f64 / self.melanoma as f64)
        }
    }

    /// `6.2:1`, or `n/a` when the ratio is undefined.
    pub fn ratio_display(&self) -> String {
        match self.imbalance_ratio() {
            Some(ratio) => format!("{:.1}:1", ratio),
            None => "n/a".to_string(),
        }
    }
}

impl GroundTruthTable {
    /// Load a ground truth CSV. The first header names the identifier column,
    /// every other header is a category code.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let mut columns = headers.iter().map(|h| h.trim().to_string());
        let id_column = columns.next().unwrap_or_default();
        let categories: Vec<String> = columns.collect();

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let line = row
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2);

            let id = row.get(0).unwrap_or("").trim().to_string();
            let mut category_scores = BTreeMap::new();
            for (offset, category) in categories.iter().enumerate() {
                let raw = row.get(offset + 1).unwrap_or("").trim();
                let score = raw.parse::<f64>().map_err(|_| PrepError::InvalidValue {
                    path: path.to_path_buf(),
                    row: line,
                    column: category.clone(),
                    value: raw.to_string(),
                })?;
                category_scores.insert(category.clone(), score);
            }

            records.push(GroundTruthRecord {
                id,
                category_scores,
                binary_label: None,
            });
        }

        log::debug!("loaded {} rows from {}", records.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            id_column,
            categories,
            records,
        })
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Category codes in header order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn records(&self) -> &[GroundTruthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of each category column, in header order.
    pub fn category_totals(&self) -> Vec<(String, f64)> {
        self.categories
            .iter()
            .map(|category| {
                let total = self
                    .records
                    .iter()
                    .filter_map(|record| record.category_scores.get(category))
                    .sum();
                (category.clone(), total)
            })
            .collect()
    }

    /// Set every record's binary label to the integer part of `column`, clamped
    /// to 1 for any non-zero integer.
    pub fn derive_binary_labels(&mut self, column: &str) -> Result<()> {
        if !self.categories.iter().any(|c| c == column) {
            return Err(PrepError::MissingColumn {
                column: column.to_string(),
                path: self.path.clone(),
            });
        }

        for record in &mut self.records {
            let score = record.category_scores.get(column).copied().unwrap_or(0.0);
            record.binary_label = Some(u8::from(score.trunc() != 0.0));
        }
        Ok(())
    }

    /// Counts over records that already carry a binary label.
    pub fn binary_distribution(&self) -> BinaryDistribution {
        let mut distribution = BinaryDistribution::default();
        for label in self.records.iter().filter_map(|r| r.binary_label) {
            if label == 1 {
                distribution.melanoma += 1;
            } else {
                distribution.benign += 1;
            }
        }
        distribution
    }
}

/// Render a column sum, dropping the fraction for whole numbers.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
