//! Scriptflow CLI - structural analysis for PowerShell scripts

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use scriptflow_core::{collect_script_files, config, html, render_json, render_text, usage};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scriptflow")]
#[command(about = "Structural analysis for PowerShell scripts: function summaries, call graphs, and reports")]
#[command(version = env!("SCRIPTFLOW_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze script files (.ps1, .psm1)
    Analyze {
        /// Path to a script file or directory
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Output file path (default: stdout; HTML defaults to scriptflow-report.html)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Build a CSV matrix of which pipeline files mention which scripts
    Usage {
        /// Path to the scripts file or directory
        scripts: PathBuf,

        /// Path to the pipeline/configuration files directory
        pipelines: PathBuf,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running analysis
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config: config_path,
        } => run_analyze(path, format, output, config_path),
        Commands::Usage {
            scripts,
            pipelines,
            output,
        } => run_usage(&scripts, &pipelines, output),
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => run_config_validate(path.as_deref()),
            ConfigAction::Show { path } => run_config_show(path.as_deref()),
        },
    }
}

fn run_analyze(
    path: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let normalized_path = normalize_path(path)?;

    let project_root = if normalized_path.is_dir() {
        normalized_path.clone()
    } else {
        normalized_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| normalized_path.clone())
    };
    let resolved_config = config::load_and_resolve(&project_root, config_path.as_deref())
        .context("failed to load configuration")?;

    if let Some(config_path) = &resolved_config.config_path {
        eprintln!("Using config: {}", config_path.display());
    }

    let script_files = collect_script_files(&normalized_path, Some(&resolved_config))?;

    let progress = if script_files.len() > 1 {
        let pb = ProgressBar::new(script_files.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    let reports = scriptflow_core::analyze_files(&script_files, |file| {
        if let Some(pb) = &progress {
            pb.set_message(
                file.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string(),
            );
            pb.inc(1);
        }
    });
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match format {
        OutputFormat::Text => write_output(output.as_deref(), &render_text(&reports)),
        OutputFormat::Json => write_output(output.as_deref(), &render_json(&reports)),
        OutputFormat::Html => {
            let rendered = html::render_html(&reports, &resolved_config.report_title);
            let out_path =
                output.unwrap_or_else(|| PathBuf::from("scriptflow-report.html"));
            std::fs::write(&out_path, rendered)
                .with_context(|| format!("Failed to write report: {}", out_path.display()))?;
            eprintln!("Report written to {}", out_path.display());
            Ok(())
        }
    }
}

fn run_usage(scripts: &Path, pipelines: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let scripts = normalize_path(scripts.to_path_buf())?;
    let pipelines = normalize_path(pipelines.to_path_buf())?;

    let script_files = collect_script_files(&scripts, None)?;
    let script_names: Vec<String> = script_files
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let matrix = usage::build_matrix(&pipelines, &script_names)?;
    write_output(output.as_deref(), &usage::render_csv(&matrix))
}

fn run_config_validate(path: Option<&Path>) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&root, path)?;
    match &resolved.config_path {
        Some(path) => println!("Config is valid: {}", path.display()),
        None => println!("No config file found; defaults are in effect"),
    }
    Ok(())
}

fn run_config_show(path: Option<&Path>) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&root, path)?;
    match &resolved.config_path {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, defaults)"),
    }
    println!("Report title: {}", resolved.report_title);
    println!(
        "Include patterns: {}",
        if resolved.include.is_some() {
            "custom"
        } else {
            "all supported scripts"
        }
    );
    Ok(())
}

/// Make a path absolute and require that it exists.
fn normalize_path(path: PathBuf) -> anyhow::Result<PathBuf> {
    let normalized = if path.is_relative() {
        std::env::current_dir()?.join(&path)
    } else {
        path
    };
    if !normalized.exists() {
        anyhow::bail!("Path does not exist: {}", normalized.display());
    }
    Ok(normalized)
}

/// Write to the given file, or stdout when no output path is set.
fn write_output(output: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("Failed to write output: {}", path.display())),
        None => {
            print!("{}", contents);
            Ok(())
        }
    }
}
