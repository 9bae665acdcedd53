//! Scriptflow core library - structural analysis for PowerShell-style scripts

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Analysis is strictly per-file; the call graph is intra-file only
// - The known-name set is complete before any block is classified
// - Output stays in source order (strictly increasing start lines)
// - Structural irregularities never error; output is best-effort
// - Identical input yields byte-for-byte identical output

pub mod callgraph;
pub mod classify;
pub mod config;
pub mod extract;
pub mod html;
pub mod report;
pub mod source;
pub mod usage;

pub use callgraph::CallGraph;
pub use config::ResolvedConfig;
pub use report::{render_json, render_text, FunctionSummary, ScriptReport};

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Analyze one file's decoded lines. This is the pure core: a name pre-pass
/// plus block delimiting, then independent classification of each block.
///
/// Blocks are classified in parallel; `collect` restores source order, which
/// is the external contract.
pub fn analyze_lines(lines: &[String]) -> Vec<FunctionSummary> {
    let extraction = extract::collect_functions(lines);
    extraction
        .blocks
        .par_iter()
        .map(|block| classify::classify_block(block, &extraction.names))
        .collect()
}

/// Read, decode, and analyze a single script file.
pub fn analyze_file(path: &Path) -> Result<ScriptReport> {
    let lines = source::read_lines(path)?;
    Ok(ScriptReport {
        file: path.display().to_string(),
        functions: analyze_lines(&lines),
    })
}

/// Analyze an explicit list of script files.
///
/// `on_file` runs before each file (progress reporting hook). Files that
/// fail to read or decode are skipped with a warning; the rest of the run
/// proceeds (a bad file must not poison the report).
pub fn analyze_files(
    script_files: &[PathBuf],
    mut on_file: impl FnMut(&Path),
) -> Vec<ScriptReport> {
    let mut reports = Vec::new();
    let mut skipped_files: usize = 0;
    for file_path in script_files {
        on_file(file_path);
        match analyze_file(file_path) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("warning: skipping file {}: {}", file_path.display(), e);
                skipped_files += 1;
            }
        }
    }
    if skipped_files > 0 {
        eprintln!("Skipped {} file(s) due to read errors", skipped_files);
    }

    reports
}

/// Analyze a file or directory of scripts with optional configuration.
pub fn analyze(path: &Path, resolved_config: Option<&ResolvedConfig>) -> Result<Vec<ScriptReport>> {
    let script_files = collect_script_files(path, resolved_config)?;
    Ok(analyze_files(&script_files, |_| {}))
}

/// Check if a file is a supported script file
fn is_supported_script_file(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    lower.ends_with(".ps1") || lower.ends_with(".psm1")
}

/// Collect all supported script files from a path (file or directory)
///
/// Supported extensions: `.ps1`, `.psm1` (case-insensitive). Results are
/// sorted for deterministic order and filtered through the config's
/// include/exclude globs when a config is given.
pub fn collect_script_files(
    path: &Path,
    resolved_config: Option<&ResolvedConfig>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            if is_supported_script_file(filename) {
                files.push(path.to_path_buf());
            }
        }
    } else if path.is_dir() {
        collect_script_files_recursive(path, &mut files)?;
    }

    if let Some(config) = resolved_config {
        files.retain(|f| config.should_include(f));
    }

    // Sort files for deterministic order
    files.sort();

    Ok(files)
}

/// Returns true for directory names that should not be traversed
fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.') || name == "node_modules" || name == "bin" || name == "obj"
}

/// Recursively collect supported script files from a directory
fn collect_script_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
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
                if is_skipped_dir(name) {
                    continue;
                }
            }
            collect_script_files_recursive(&path, files)?;
        } else if metadata.is_file() {
            if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
                if is_supported_script_file(filename) {
                    files.push(path);
                }
            }
        }
    }

    Ok(())
}
