// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-sample batch pipeline: masks in, reports out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use rayon::prelude::*;
use tracing::info;

use cytomatch_core::{CellObject, Plane, assemble_cells, assemble_whole_cells};
use cytomatch_mask::regions_from_path;

use crate::inputs::{SamplePair, list_mask_files, pair_samples};
use crate::report::write_report;

/// Resolved pipeline settings, independent of how the CLI located them.
#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) masks_dir: PathBuf,
    pub(crate) reports_dir: PathBuf,
    pub(crate) image_filter: Option<String>,
    pub(crate) downsample: f64,
    pub(crate) nucleus_suffix: String,
    pub(crate) whole_cell_suffix: String,
}

/// Discover mask pairs under `masks_dir` and process every sample.
///
/// Samples are independent, so they run in parallel; each gets its own
/// matcher state and its own report file.
pub(crate) fn run(config: &Config) -> Result<()> {
    let filter = config.image_filter.as_deref();
    info!("discovering mask files in {}", config.masks_dir.display());
    let whole_cell_files = list_mask_files(&config.masks_dir, &config.whole_cell_suffix, filter)?;
    let nucleus_files = list_mask_files(&config.masks_dir, &config.nucleus_suffix, filter)?;

    let pairs = pair_samples(&whole_cell_files, &nucleus_files, &config.whole_cell_suffix);
    if pairs.is_empty() {
        info!("no whole-cell masks found; nothing to do");
        return Ok(());
    }
    info!("processing {} samples", pairs.len());

    fs::create_dir_all(&config.reports_dir)
        .with_context(|| format!("creating {}", config.reports_dir.display()))?;

    pairs
        .par_iter()
        .try_for_each(|pair| {
            process_sample(pair, config).with_context(|| format!("sample {}", pair.sample))
        })?;

    info!("done; reports in {}", config.reports_dir.display());
    Ok(())
}

fn process_sample(pair: &SamplePair, config: &Config) -> Result<()> {
    let plane = Plane::default();
    let cells = regions_from_path(&pair.whole_cell_mask, config.downsample, plane)
        .with_context(|| format!("reading {}", pair.whole_cell_mask.display()))?;

    let objects: Vec<CellObject> = match &pair.nucleus_mask {
        Some(nucleus_mask) => {
            let nuclei = regions_from_path(nucleus_mask, config.downsample, plane)
                .with_context(|| format!("reading {}", nucleus_mask.display()))?;
            assemble_cells(nuclei, cells)
        }
        None => assemble_whole_cells(cells),
    };
    info!("{}: {} cell objects", pair.sample, objects.len());

    let report_path = config.reports_dir.join(format!("{}_QUANT.tsv", pair.sample));
    write_report(&report_path, &pair.sample, &objects)
}
