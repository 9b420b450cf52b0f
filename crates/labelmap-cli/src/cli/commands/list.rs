//! `labelmap list` – print the labels without writing the map.

use anyhow::Result;
use labelmap_core::config::LabelMapConfig;
use labelmap_core::scan;
use std::io::Write;

use super::generate_options;
use crate::cli::ScanArgs;

pub fn run_list<W: Write>(cfg: &LabelMapConfig, scan_args: &ScanArgs, out: &mut W) -> Result<()> {
    let opts = generate_options(cfg, scan_args, None, None, None);
    let scanned = scan::scan_stems(&opts.source_dir, &opts.extension, opts.order)?;
    for stem in &scanned.stems {
        writeln!(out, "{stem}")?;
    }
    Ok(())
}
