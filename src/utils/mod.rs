//! Utility modules for ISIC prep
//!
//! This module contains various utility functions organized by functionality:
//! - `files`: Directory management and file counting
//! - `http`: HTTP client utilities
//! - `extract`: Zip archive extraction
//! - `prompt`: Interactive confirmation

pub mod extract;
pub mod files;
pub mod http;
pub mod prompt;
