//! SHA-2 digests of generated files, printed in `shasum` line format.
//!
//! Digests are computed in-process; `external` covers the case where an
//! OS checksum tool is configured instead.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::LabelMapError;

const BUF_SIZE: usize = 64 * 1024;

/// Digest width, as passed to `shasum -a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum ShaBits {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl ShaBits {
    pub fn bits(self) -> u16 {
        match self {
            ShaBits::Sha224 => 224,
            ShaBits::Sha256 => 256,
            ShaBits::Sha384 => 384,
            ShaBits::Sha512 => 512,
        }
    }
}

impl TryFrom<u16> for ShaBits {
    type Error = LabelMapError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            224 => Ok(ShaBits::Sha224),
            256 => Ok(ShaBits::Sha256),
            384 => Ok(ShaBits::Sha384),
            512 => Ok(ShaBits::Sha512),
            other => Err(LabelMapError::UnsupportedBits(other)),
        }
    }
}

impl From<ShaBits> for u16 {
    fn from(bits: ShaBits) -> Self {
        bits.bits()
    }
}

impl FromStr for ShaBits {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let n: u16 = s
            .trim()
            .parse()
            .with_context(|| format!("invalid digest width: {s:?}"))?;
        Ok(ShaBits::try_from(n)?)
    }
}

impl fmt::Display for ShaBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Compute the digest of a file and return it as lowercase hex.
pub fn digest_path(path: &Path, bits: ShaBits) -> Result<String> {
    match bits {
        ShaBits::Sha224 => hash_file::<Sha224>(path),
        ShaBits::Sha256 => hash_file::<Sha256>(path),
        ShaBits::Sha384 => hash_file::<Sha384>(path),
        ShaBits::Sha512 => hash_file::<Sha512>(path),
    }
}

/// Chunked reads keep memory bounded regardless of file size.
fn hash_file<D: Digest>(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Format a digest the way `shasum` prints it: hex, two spaces, path.
pub fn shasum_line(hex_digest: &str, path: &Path) -> String {
    format!("{}  {}", hex_digest, path.display())
}
