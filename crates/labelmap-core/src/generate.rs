//! Label map generation: scan, write, announce, checksum.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use crate::checksum::{self, ShaBits};
use crate::config::LabelMapConfig;
use crate::external;
use crate::label_map::LabelMap;
use crate::scan::{self, EntryOrder};

/// Inputs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
    pub extension: String,
    pub order: EntryOrder,
    pub bits: ShaBits,
    /// When set, this tool prints the checksum instead of the built-in digest.
    pub checksum_tool: Option<String>,
}

impl From<&LabelMapConfig> for GenerateOptions {
    fn from(cfg: &LabelMapConfig) -> Self {
        Self {
            source_dir: cfg.source_dir.clone(),
            output_path: cfg.output_path.clone(),
            extension: cfg.extension.clone(),
            order: if cfg.sort {
                EntryOrder::Sorted
            } else {
                EntryOrder::Directory
            },
            bits: cfg.digest_bits.unwrap_or_default(),
            checksum_tool: cfg.checksum_tool.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub labels: usize,
    pub skipped: usize,
    /// Hex digest when computed in-process; `None` when an external tool printed it.
    pub digest: Option<String>,
}

/// Build the label map and print the announcement and checksum lines to `out`.
///
/// Output of an external checksum tool goes to the process stdout, not `out`.
pub async fn generate<W: Write>(opts: &GenerateOptions, out: &mut W) -> Result<GenerateReport> {
    let scanned = scan::scan_stems(&opts.source_dir, &opts.extension, opts.order)?;
    let skipped = scanned.skipped;
    let map = LabelMap::new(scanned.stems);
    map.write_to(&opts.output_path)?;

    writeln!(out, "{} {}", opts.output_path.display(), opts.bits)?;

    let mut digest = None;
    let mut external_done = false;
    if let Some(tool) = opts.checksum_tool.as_deref() {
        out.flush()?;
        match external::run_checksum_tool(tool, opts.bits, &opts.output_path).await {
            Ok(_) => external_done = true,
            Err(e) => tracing::warn!("{:#}; using built-in digest", e),
        }
    }
    if !external_done {
        let hex = checksum::digest_path(&opts.output_path, opts.bits)?;
        writeln!(out, "{}", checksum::shasum_line(&hex, &opts.output_path))?;
        digest = Some(hex);
    }

    Ok(GenerateReport {
        output_path: opts.output_path.clone(),
        labels: map.len(),
        skipped,
        digest,
    })
}
