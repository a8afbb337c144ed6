//! # Batch Runner
//!
//! Runs the icon pipeline over many logos at once. Each image is an independent job on the
//! rayon pool; a failing image is recorded in the summary and never stops the others.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::IconConfig;
use crate::error::{IconError, IconResult, Stage};
use crate::generate_icon;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Expand glob patterns, plain files and directories into a sorted, de-duplicated list
/// of image paths. Directories contribute their PNG/JPEG files (not recursively).
pub fn expand_inputs<S: AsRef<str>>(patterns: &[S]) -> IconResult<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let as_path = Path::new(pattern);

        if as_path.is_dir() {
            let entries = std::fs::read_dir(as_path)
                .map_err(|e| IconError::io("read directory", e).with_path(as_path))?;
            found.extend(
                entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file() && is_image(path)),
            );
            continue;
        }
        if as_path.is_file() {
            found.insert(as_path.to_path_buf());
            continue;
        }

        let paths = glob::glob(pattern)
            .map_err(|e| IconError::config("input pattern", pattern, e.to_string()))?;
        let before = found.len();
        found.extend(paths.filter_map(Result::ok).filter(|path| path.is_file()));
        if found.len() == before {
            warn!(pattern, "pattern matched no files");
        }
    }

    Ok(found.into_iter().collect())
}

/// Output path for `input` inside `out_dir`: same stem, `.png` extension.
pub fn output_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "icon".to_string());
    out_dir.join(format!("{}.png", stem))
}

/// Output paths for `inputs`, one per input and all distinct.
///
/// The first input with a given stem gets `<stem>.png`. Later inputs sharing that stem
/// (`brand.png` and `brand.jpg`) get the source extension appended, `<stem>-<ext>.png`,
/// and a numeric suffix if that is taken too.
pub fn plan_outputs(inputs: &[PathBuf], out_dir: &Path) -> Vec<PathBuf> {
    let mut taken: HashSet<PathBuf> = HashSet::with_capacity(inputs.len());
    let mut outputs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let mut candidate = output_path_for(input, out_dir);
        if taken.contains(&candidate) {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "icon".to_string());
            let ext = input
                .extension()
                .map(|e| e.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();
            let base = if ext.is_empty() {
                stem
            } else {
                format!("{}-{}", stem, ext)
            };
            candidate = out_dir.join(format!("{}.png", base));
            let mut n = 2;
            while taken.contains(&candidate) {
                candidate = out_dir.join(format!("{}-{}.png", base, n));
                n += 1;
            }
            warn!(
                input = %input.display(),
                output = %candidate.display(),
                "output name clashes with an earlier input"
            );
        }
        taken.insert(candidate.clone());
        outputs.push(candidate);
    }

    outputs
}

/// Outcome of one image.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Ok {
        output: PathBuf,
        symbol_width: u32,
        symbol_height: u32,
    },
    Failed {
        stage: Stage,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub input: PathBuf,
    #[serde(flatten)]
    pub status: ItemStatus,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, ItemStatus::Ok { .. })
    }
}

/// Per-batch report, serializable as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<BatchItem>,
}

impl BatchSummary {
    fn from_items(items: Vec<BatchItem>) -> Self {
        let succeeded = items.iter().filter(|item| item.is_ok()).count();
        Self {
            total: items.len(),
            succeeded,
            failed: items.len() - succeeded,
            items,
        }
    }

    pub fn to_json(&self) -> IconResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| IconError::asset("write batch report", e.to_string()))
    }
}

/// Generate an icon for every input into `out_dir`, in parallel.
///
/// Items come back in input order regardless of completion order.
pub fn run_batch(inputs: &[PathBuf], out_dir: &Path, config: &IconConfig) -> IconResult<BatchSummary> {
    config.validate()?;
    std::fs::create_dir_all(out_dir)
        .map_err(|e| IconError::io("create output directory", e).with_path(out_dir))?;

    let outputs = plan_outputs(inputs, out_dir);
    let items: Vec<BatchItem> = inputs
        .par_iter()
        .zip(outputs)
        .map(|(input, output)| {
            let status = match generate_icon(input, &output, config, None) {
                Ok(run) => ItemStatus::Ok {
                    output,
                    symbol_width: run.symbol.width(),
                    symbol_height: run.symbol.height(),
                },
                Err(err) => {
                    warn!(input = %input.display(), "{}", err.report());
                    ItemStatus::Failed {
                        stage: err.stage(),
                        message: err.to_string(),
                    }
                }
            };
            BatchItem {
                input: input.clone(),
                status,
            }
        })
        .collect();

    let summary = BatchSummary::from_items(items);
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_keeps_stem_and_switches_to_png() {
        let out = output_path_for(Path::new("logos/brand.jpg"), Path::new("icons"));
        assert_eq!(out, Path::new("icons").join("brand.png"));
    }

    #[test]
    fn clashing_stems_get_distinct_outputs() {
        let out = Path::new("icons");
        let inputs: Vec<PathBuf> = ["a/brand.png", "a/brand.jpg", "b/brand.jpg", "a/other.png"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(
            plan_outputs(&inputs, out),
            vec![
                out.join("brand.png"),
                out.join("brand-jpg.png"),
                out.join("brand-jpg-2.png"),
                out.join("other.png"),
            ]
        );
    }

    #[test]
    fn image_extension_check_is_case_insensitive() {
        assert!(is_image(Path::new("a.PNG")));
        assert!(is_image(Path::new("a.jpeg")));
        assert!(!is_image(Path::new("a.svg")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn expands_directories_files_and_globs() {
        let dir = tempfile::tempdir().unwrap();
        let logos = dir.path().join("logos");
        std::fs::create_dir(&logos).unwrap();
        for name in ["b.png", "a.jpg", "notes.txt"] {
            std::fs::write(logos.join(name), b"x").unwrap();
        }
        let single = dir.path().join("single.png");
        std::fs::write(&single, b"x").unwrap();

        let pattern = format!("{}/*.png", dir.path().display());
        let inputs = expand_inputs(&[
            logos.display().to_string(),
            single.display().to_string(),
            pattern,
        ])
        .unwrap();

        assert_eq!(inputs, vec![logos.join("a.jpg"), logos.join("b.png"), single]);
    }

    #[test]
    fn summary_counts_failures() {
        let summary = BatchSummary::from_items(vec![
            BatchItem {
                input: "a.png".into(),
                status: ItemStatus::Ok {
                    output: "out/a.png".into(),
                    symbol_width: 1,
                    symbol_height: 1,
                },
            },
            BatchItem {
                input: "b.png".into(),
                status: ItemStatus::Failed {
                    stage: Stage::Scan,
                    message: "image has no visible content".into(),
                },
            },
        ]);
        assert_eq!((summary.total, summary.succeeded, summary.failed), (2, 1, 1));

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["items"][1]["status"], "failed");
        assert_eq!(json["items"][1]["stage"], "scan");
        assert_eq!(json["items"][0]["input"], "a.png");
    }
}
