//! Run an OS checksum tool (e.g. `shasum`) against the generated file.
//!
//! The tool inherits stdout/stderr, so its line prints directly. Its exit
//! status is returned for logging only.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::checksum::ShaBits;

/// Spawn `<tool> -a <bits> <path>` and wait for it.
///
/// Fails only when the tool cannot be started; a non-zero exit is reported
/// through the returned status.
pub async fn run_checksum_tool(tool: &str, bits: ShaBits, path: &Path) -> Result<ExitStatus> {
    tracing::debug!("running {} -a {} {}", tool, bits, path.display());
    let status = Command::new(tool)
        .arg("-a")
        .arg(bits.to_string())
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("failed to run checksum tool {tool:?}"))?;
    if !status.success() {
        tracing::warn!("checksum tool {} exited with {}", tool, status);
    }
    Ok(status)
}
