//! CLI for labelmap.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use labelmap_core::checksum::ShaBits;
use labelmap_core::config::{self, LabelMapConfig};
use std::io;
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_completions, run_generate, run_list, run_man};

/// Top-level CLI for labelmap.
#[derive(Debug, Parser)]
#[command(name = "labelmap")]
#[command(about = "labelmap: build a classifier label map from an image directory", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/labelmap/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Source directory selection shared by `generate` and `list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Directory to read image names from (overrides config).
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Suffix that marks an image, e.g. ".png" (overrides config).
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Keep the directory listing order instead of sorting labels.
    #[arg(long)]
    pub unsorted: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Write the label map, then print its name and checksum.
    Generate {
        #[command(flatten)]
        scan: ScanArgs,

        /// Label map file to write (overrides config).
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Digest width: 224, 256, 384 or 512 (overrides config).
        #[arg(long, value_name = "N")]
        bits: Option<ShaBits>,

        /// Run this tool (e.g. shasum) as `<tool> -a <bits> <file>` for the checksum.
        #[arg(long, value_name = "TOOL")]
        checksum_tool: Option<String>,
    },

    /// Print the labels that would be written, one per line.
    List {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Compute the SHA-2 digest of a file (shasum output format).
    Checksum {
        /// Path to the file.
        path: PathBuf,

        /// Digest width: 224, 256, 384 or 512.
        #[arg(long, default_value = "256", value_name = "N")]
        bits: ShaBits,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

fn load_config(explicit: Option<&Path>) -> Result<LabelMapConfig> {
    let cfg = match explicit {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Generate {
                scan,
                output,
                bits,
                checksum_tool,
            } => {
                let cfg = load_config(cli.config.as_deref())?;
                run_generate(&cfg, &scan, output, bits, checksum_tool).await?;
            }
            CliCommand::List { scan } => {
                let cfg = load_config(cli.config.as_deref())?;
                run_list(&cfg, &scan, &mut io::stdout())?;
            }
            CliCommand::Checksum { path, bits } => run_checksum(&path, bits, &mut io::stdout())?,
            CliCommand::Completions { shell } => run_completions(shell, Cli::command())?,
            CliCommand::Man => run_man(Cli::command())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
