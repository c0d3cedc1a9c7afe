//! Batch cleaning of downloaded filing trees.

use crate::pipeline::FilingCleaner;
use fc_core::error::{FcError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Name the retrieval client gives each raw archive.
pub const SUBMISSION_FILE_NAME: &str = "full-submission.txt";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchStatus {
    Cleaned {
        output: PathBuf,
        original_size: usize,
        cleaned_size: usize,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub input: PathBuf,
    #[serde(flatten)]
    pub status: BatchStatus,
}

impl BatchEntry {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, BatchStatus::Failed { .. })
    }
}

/// Raw archives below `root`, sorted by path.
///
/// Prefers files named [`SUBMISSION_FILE_NAME`]; when there are none, any
/// other `.txt` file that is not itself a cleaned output (`output_name` or
/// `*.<output_name>`).
pub fn discover(root: &Path, output_name: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(FcError::InputNotFound { path: root.to_path_buf() });
    }
    if !root.is_dir() {
        return Err(FcError::InvalidInput(format!("{} is not a directory", root.display())));
    }

    let files: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    let named: Vec<PathBuf> = files
        .iter()
        .filter(|p| p.file_name().is_some_and(|n| n == SUBMISSION_FILE_NAME))
        .cloned()
        .collect();
    if !named.is_empty() {
        return Ok(named);
    }

    let derived_suffix = format!(".{output_name}");
    Ok(files
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n != output_name && !n.ends_with(&derived_suffix))
        })
        .collect())
}

/// Pair each input with its output path. A directory holding a single
/// input gets `output_name`; when it holds several, each input gets
/// `<stem>.<output_name>` so no two inputs share an output.
pub fn plan_outputs(inputs: Vec<PathBuf>, output_name: &str) -> Vec<(PathBuf, PathBuf)> {
    let mut per_dir: HashMap<PathBuf, usize> = HashMap::new();
    for input in &inputs {
        *per_dir.entry(parent_of(input)).or_default() += 1;
    }

    inputs
        .into_iter()
        .map(|input| {
            let output = if per_dir.get(&parent_of(&input)).copied().unwrap_or(0) > 1 {
                let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
                input.with_file_name(format!("{stem}.{output_name}"))
            } else {
                input.with_file_name(output_name)
            };
            (input, output)
        })
        .collect()
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Clean every archive below `root` into a sibling output file chosen by
/// [`plan_outputs`]. A failing archive is recorded and the batch continues.
pub fn clean_tree(cleaner: &FilingCleaner, root: &Path) -> Result<Vec<BatchEntry>> {
    let output_name = cleaner.config.report.default_output_name.clone();
    let jobs = plan_outputs(discover(root, &output_name)?, &output_name);
    info!(root = %root.display(), files = jobs.len(), "cleaning filing tree");

    let entries = jobs
        .into_iter()
        .map(|(input, output)| {
            let status = match cleaner.clean_file(&input, Some(&output)) {
                Ok(cleaned) => BatchStatus::Cleaned {
                    output: cleaned.output,
                    original_size: cleaned.report.original_size,
                    cleaned_size: cleaned.report.cleaned_size,
                },
                Err(e) => {
                    warn!(input = %input.display(), error = %e, "cleaning failed");
                    BatchStatus::Failed { error: e.to_string() }
                }
            };
            BatchEntry { input, status }
        })
        .collect();
    Ok(entries)
}
