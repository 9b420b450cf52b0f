//! Domain errors. I/O failures travel as `anyhow` with context instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelMapError {
    /// An empty suffix would keep every entry unchanged.
    #[error("extension must not be empty")]
    EmptyExtension,

    /// Digest width outside the SHA-2 family.
    #[error("unsupported digest width {0}; expected one of 224, 256, 384, 512")]
    UnsupportedBits(u16),

    #[error("source path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
