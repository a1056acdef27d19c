// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch nucleus/whole-cell matching over directories of segmentation masks.
//!
//! Point it at a directory of label masks and it pairs each sample's nucleus
//! mask with its whole-cell mask, runs the region matcher, and writes one
//! `{sample}_QUANT.tsv` shape report per sample.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod inputs;
mod pipeline;
mod report;

use pipeline::Config;

#[derive(Parser)]
#[command(
    name = "cytomatch",
    version,
    about = "Match nucleus masks to whole-cell masks and export shape reports",
    long_about = "Pairs each sample's nucleus segmentation mask with its whole-cell mask,\n\
                  matches nuclei to cells (exact containment first, then best overlap),\n\
                  and writes one {sample}_QUANT.tsv shape report per sample.\n\n\
                  Samples whose nucleus mask is missing fall back to whole-cell-only\n\
                  detections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only process masks whose file names contain this substring.
    #[arg(long, global = true)]
    image_filter: Option<String>,

    /// Scale factor between mask pixels and full-resolution coordinates.
    #[arg(long, global = true, default_value_t = 1.0)]
    downsample: f64,

    /// File name suffix identifying nucleus masks.
    #[arg(long, global = true, default_value = "_NucleusMask.tiff")]
    nucleus_suffix: String,

    /// File name suffix identifying whole-cell masks.
    #[arg(long, global = true, default_value = "_WholeCellMask.tiff")]
    whole_cell_suffix: String,

    /// Enable debug logging (RUST_LOG overrides this).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Conventional workspace layout: masks and reports under one root.
    Workspace {
        /// Root directory of the workspace.
        #[arg(long)]
        workspace_path: PathBuf,

        /// Name of the folder containing segmentation masks.
        #[arg(long, default_value = "SEGMASKS")]
        segmasks_subdir: String,

        /// Name of the folder for the TSV reports.
        #[arg(long, default_value = "REPORTS")]
        reports_subdir: String,
    },
    /// Explicit mask and report directories.
    Explicit {
        /// Directory containing segmentation masks.
        #[arg(long)]
        segmasks_path: PathBuf,

        /// Output directory for the TSV reports.
        #[arg(long)]
        reports_path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(false)
        .init();

    let (masks_dir, reports_dir) = match &cli.command {
        Commands::Workspace {
            workspace_path,
            segmasks_subdir,
            reports_subdir,
        } => (
            workspace_path.join(segmasks_subdir),
            workspace_path.join(reports_subdir),
        ),
        Commands::Explicit {
            segmasks_path,
            reports_path,
        } => (segmasks_path.clone(), reports_path.clone()),
    };

    let config = Config {
        masks_dir,
        reports_dir,
        image_filter: cli.image_filter,
        downsample: cli.downsample,
        nucleus_suffix: cli.nucleus_suffix,
        whole_cell_suffix: cli.whole_cell_suffix,
    };
    pipeline::run(&config).context("pipeline failed")
}
