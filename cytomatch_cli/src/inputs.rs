// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mask file discovery and per-sample pairing.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::warn;
use walkdir::WalkDir;

/// One sample's masks: the whole-cell mask drives processing, the nucleus
/// mask is optional.
#[derive(Clone, Debug)]
pub(crate) struct SamplePair {
    pub(crate) sample: String,
    pub(crate) whole_cell_mask: PathBuf,
    pub(crate) nucleus_mask: Option<PathBuf>,
}

/// Recursively list files under `dir` whose names end with `suffix`
/// (case-insensitive), optionally requiring a substring match on `filter`.
///
/// Results come back sorted so runs are deterministic regardless of
/// directory iteration order.
pub(crate) fn list_mask_files(
    dir: &Path,
    suffix: &str,
    filter: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        if !name.ends_with(&suffix.to_ascii_lowercase()) {
            continue;
        }
        if let Some(filter) = filter
            && !name.contains(&filter.to_ascii_lowercase())
        {
            continue;
        }
        files.push(entry.into_path());
    }
    files.sort();
    Ok(files)
}

/// Pair every whole-cell mask with its sample's nucleus mask.
///
/// The sample name is the whole-cell file name with `whole_cell_suffix`
/// stripped; a nucleus mask belongs to the sample when its file name starts
/// with `{sample}_`. Nucleus masks that match no sample are reported and
/// ignored.
pub(crate) fn pair_samples(
    whole_cell_files: &[PathBuf],
    nucleus_files: &[PathBuf],
    whole_cell_suffix: &str,
) -> Vec<SamplePair> {
    let pairs: Vec<SamplePair> = whole_cell_files
        .iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy();
            let sample = strip_suffix_ignore_case(&name, whole_cell_suffix)?.to_owned();
            let prefix = format!("{sample}_").to_ascii_lowercase();
            let nucleus_mask = nucleus_files
                .iter()
                .find(|f| {
                    f.file_name()
                        .is_some_and(|n| n.to_string_lossy().to_ascii_lowercase().starts_with(&prefix))
                })
                .cloned();
            if nucleus_mask.is_none() {
                warn!("no nucleus mask for sample {sample}; using whole-cell outlines only");
            }
            Some(SamplePair {
                sample,
                whole_cell_mask: path.clone(),
                nucleus_mask,
            })
        })
        .collect();

    for nucleus in nucleus_files {
        let claimed = pairs
            .iter()
            .any(|p| p.nucleus_mask.as_deref() == Some(nucleus.as_path()));
        if !claimed {
            warn!(
                "nucleus mask {} matches no whole-cell mask; skipping it",
                nucleus.display()
            );
        }
    }
    pairs
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    if name.len() < suffix.len() {
        return None;
    }
    let (head, tail) = name.split_at(name.len() - suffix.len());
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
