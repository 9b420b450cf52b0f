//! Checksum command: SHA-2 digest of any file.

use anyhow::Result;
use labelmap_core::checksum::{self, ShaBits};
use std::io::Write;
use std::path::Path;

/// Compute and print the digest of the given file.
pub fn run_checksum<W: Write>(path: &Path, bits: ShaBits, out: &mut W) -> Result<()> {
    let digest = checksum::digest_path(path, bits)?;
    writeln!(out, "{}", checksum::shasum_line(&digest, path))?;
    Ok(())
}
