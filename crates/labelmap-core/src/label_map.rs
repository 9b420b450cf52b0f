//! The generated label map file: one stem per line, newline-terminated.
//!
//! Writes go to `<path>.part` first and are renamed over the destination, so
//! a reader never sees a half-written map and old content is always replaced.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix of the temporary file used before the atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Replace `path` with this map. Missing parent directories are created.
    ///
    /// A symlinked `path` is written through: its target gets the new content
    /// and the link stays in place.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let target = resolve_target(path)?;
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }

        let temp_path = temp_path_for(&target);
        let result = self
            .write_temp(&temp_path)
            .and_then(|()| {
                fs::rename(&temp_path, &target).with_context(|| {
                    format!(
                        "failed to rename {} to {}",
                        temp_path.display(),
                        target.display()
                    )
                })
            });
        if let Err(e) = result {
            if let Err(rm) = fs::remove_file(&temp_path) {
                if rm.kind() != io::ErrorKind::NotFound {
                    tracing::warn!("failed to remove {}: {}", temp_path.display(), rm);
                }
            }
            return Err(e);
        }
        tracing::info!("wrote {} labels to {}", self.labels.len(), target.display());
        Ok(())
    }

    fn write_temp(&self, temp_path: &Path) -> Result<()> {
        let file = File::create(temp_path)
            .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
        let mut w = BufWriter::new(file);
        for label in &self.labels {
            w.write_all(label.as_bytes())?;
            w.write_all(b"\n")?;
        }
        let file = w
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("failed to flush {}", temp_path.display()))?;
        file.sync_all().context("label map sync failed")?;
        Ok(())
    }

    /// Load a map written by `write_to`.
    pub fn read_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read label map: {}", path.display()))?;
        Ok(Self {
            labels: data.lines().map(str::to_string).collect(),
        })
    }
}

/// Follow a symlink at `path` to the file it names; other paths pass through.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {}
        _ => return Ok(path.to_path_buf()),
    }
    if let Ok(real) = fs::canonicalize(path) {
        return Ok(real);
    }
    // Dangling link: create the file it points at.
    let link = fs::read_link(path)
        .with_context(|| format!("failed to read symlink: {}", path.display()))?;
    Ok(match path.parent() {
        Some(parent) if link.is_relative() => parent.join(link),
        _ => link,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}
