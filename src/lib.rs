//! Data preparation for the ISIC 2018 Task 3 skin lesion dataset.
//!
//! The crate backs three binaries:
//! - `isic-download`: fetch and extract the challenge archives
//! - `isic-count`: report image and label counts
//! - `isic-organize`: build the binary melanoma manifest

pub mod acquire;
pub mod archives;
pub mod error;
pub mod ground_truth;
pub mod inventory;
pub mod layout;
pub mod organize;
pub mod utils;

pub use error::{Outcome, PrepError, Result};
pub use layout::{DatasetLayout, Split};
