//! Pipeline-to-script usage matrix
//!
//! Correlates pipeline/configuration files with analyzed scripts: a pipeline
//! file "uses" a script when the script's file stem appears anywhere in the
//! pipeline's content (case-insensitive substring, no state machine). Output
//! is a CSV matrix with one row per pipeline file and one column per script.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Usage matrix: `rows[i].used[j]` says whether pipeline `i` mentions
/// script `j`.
#[derive(Debug, Clone)]
pub struct UsageMatrix {
    /// Script names, in the caller's order (typically analysis order).
    pub scripts: Vec<String>,
    pub rows: Vec<UsageRow>,
}

/// One pipeline file's usage flags.
#[derive(Debug, Clone)]
pub struct UsageRow {
    pub pipeline: String,
    pub used: Vec<bool>,
}

/// Build the usage matrix for a directory of pipeline files.
///
/// Pipeline files are `.yaml`/`.yml` under `pipeline_dir` (recursive), in
/// sorted order. Unreadable pipeline files are skipped with a warning, the
/// matrix is built from the rest.
pub fn build_matrix(pipeline_dir: &Path, script_names: &[String]) -> Result<UsageMatrix> {
    let needles: Vec<String> = script_names
        .iter()
        .map(|name| script_stem(name).to_ascii_lowercase())
        .collect();

    let mut rows = Vec::new();
    for path in collect_pipeline_files(pipeline_dir)? {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content.to_ascii_lowercase(),
            Err(e) => {
                eprintln!("warning: could not read pipeline file {}: {}", path.display(), e);
                continue;
            }
        };
        rows.push(UsageRow {
            pipeline: path.display().to_string(),
            used: needles.iter().map(|n| content.contains(n.as_str())).collect(),
        });
    }

    Ok(UsageMatrix {
        scripts: script_names.to_vec(),
        rows,
    })
}

/// Render the matrix as CSV. First column is the pipeline file, remaining
/// columns are scripts, cells are `yes`/`no`.
pub fn render_csv(matrix: &UsageMatrix) -> String {
    let mut output = String::new();

    output.push_str("pipeline");
    for script in &matrix.scripts {
        output.push(',');
        output.push_str(&csv_field(script));
    }
    output.push('\n');

    for row in &matrix.rows {
        output.push_str(&csv_field(&row.pipeline));
        for used in &row.used {
            output.push(',');
            output.push_str(if *used { "yes" } else { "no" });
        }
        output.push('\n');
    }

    output
}

/// Quote a CSV field when it contains a delimiter or quote.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// The script name matched in pipeline content: file stem without extension.
fn script_stem(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(base)
}

/// Recursively collect `.yaml`/`.yml` files under a directory, sorted.
pub fn collect_pipeline_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_pipeline_files_recursive(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_pipeline_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry_result?;
        let path = entry.path();
        let metadata = std::fs::symlink_metadata(&path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;

        if metadata.is_symlink() {
            continue;
        }

        if metadata.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    continue;
                }
            }
            collect_pipeline_files_recursive(&path, files)?;
        } else if metadata.is_file() {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
                    files.push(path);
                }
            }
        }
    }

    Ok(())
}
