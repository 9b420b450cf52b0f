//! Directory enumeration and extension filtering.
//!
//! Every entry of the source directory whose name ends with the extension
//! (literal, case-sensitive) contributes its stem. Entry type is not checked:
//! a directory called `cat.png` yields `cat` just like a file would.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::LabelMapError;

/// Line order of the generated label map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrder {
    /// Byte-wise ascending by stem; stable across runs and machines.
    #[default]
    Sorted,
    /// Whatever order the OS returns entries in.
    Directory,
}

/// Stems kept from one directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub stems: Vec<String>,
    /// Matching entries that could not be written as a single UTF-8 line.
    pub skipped: usize,
}

/// Strip `extension` from `name` if `name` ends with it.
pub fn stem_of<'a>(name: &'a str, extension: &str) -> Option<&'a str> {
    name.strip_suffix(extension)
}

/// List `dir` and collect the stem of every entry ending in `extension`.
pub fn scan_stems(dir: &Path, extension: &str, order: EntryOrder) -> Result<ScanOutcome> {
    if extension.is_empty() {
        return Err(LabelMapError::EmptyExtension.into());
    }
    let meta = fs::metadata(dir)
        .with_context(|| format!("failed to read source directory: {}", dir.display()))?;
    if !meta.is_dir() {
        return Err(LabelMapError::NotADirectory(dir.to_path_buf()).into());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to list source directory: {}", dir.display()))?;

    let mut outcome = ScanOutcome::default();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let os_name = entry.file_name();
        let Some(name) = os_name.to_str() else {
            let lossy = os_name.to_string_lossy();
            if lossy.ends_with(extension) {
                tracing::warn!("skipping non-UTF-8 entry name: {}", lossy);
                outcome.skipped += 1;
            }
            continue;
        };
        let Some(stem) = stem_of(name, extension) else {
            continue;
        };
        if stem.contains(['\n', '\r']) {
            tracing::warn!("skipping entry with line break in name: {:?}", name);
            outcome.skipped += 1;
            continue;
        }
        outcome.stems.push(stem.to_string());
    }

    if order == EntryOrder::Sorted {
        outcome.stems.sort();
    }
    tracing::debug!(
        "scanned {}: {} labels, {} skipped",
        dir.display(),
        outcome.stems.len(),
        outcome.skipped
    );
    Ok(outcome)
}
