//! `labelmap generate` – write the label map and print its checksum.

use anyhow::Result;
use labelmap_core::checksum::ShaBits;
use labelmap_core::config::LabelMapConfig;
use labelmap_core::generate::{generate, GenerateOptions};
use labelmap_core::scan::EntryOrder;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::ScanArgs;

/// Config values with command-line overrides applied.
pub fn generate_options(
    cfg: &LabelMapConfig,
    scan: &ScanArgs,
    output: Option<PathBuf>,
    bits: Option<ShaBits>,
    checksum_tool: Option<String>,
) -> GenerateOptions {
    let mut opts = GenerateOptions::from(cfg);
    if let Some(dir) = &scan.source_dir {
        opts.source_dir = dir.clone();
    }
    if let Some(ext) = &scan.extension {
        opts.extension = ext.clone();
    }
    if scan.unsorted {
        opts.order = EntryOrder::Directory;
    }
    if let Some(path) = output {
        opts.output_path = path;
    }
    if let Some(bits) = bits {
        opts.bits = bits;
    }
    if checksum_tool.is_some() {
        opts.checksum_tool = checksum_tool;
    }
    opts
}

pub async fn run_generate(
    cfg: &LabelMapConfig,
    scan: &ScanArgs,
    output: Option<PathBuf>,
    bits: Option<ShaBits>,
    checksum_tool: Option<String>,
) -> Result<()> {
    let opts = generate_options(cfg, scan, output, bits, checksum_tool);
    tracing::info!(
        "generating {} from {} (extension {:?})",
        opts.output_path.display(),
        opts.source_dir.display(),
        opts.extension
    );
    let mut stdout = io::stdout();
    let report = generate(&opts, &mut stdout).await?;
    stdout.flush()?;
    if report.skipped > 0 {
        tracing::warn!(
            "{} matching entries skipped (names not representable as one line)",
            report.skipped
        );
    }
    tracing::info!(
        "label map {} done: {} labels",
        report.output_path.display(),
        report.labels
    );
    Ok(())
}
