// Copyright 2025 Lars Brubaker
// Command-line overlap check for Wavefront OBJ meshes.

mod obj;
mod shells;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use uv_overlap::{CheckOptions, OverlapChecker, ShellMerge, DEFAULT_TOLERANCE};

use crate::obj::ObjMesh;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MergeMode {
    /// Check each overlapping pair of shells separately
    Pairwise,
    /// Check each chain of overlapping shells as one set
    Connected,
}

impl From<MergeMode> for ShellMerge {
    fn from(mode: MergeMode) -> Self {
        match mode {
            MergeMode::Pairwise => ShellMerge::Pairwise,
            MergeMode::Connected => ShellMerge::Connected,
        }
    }
}

#[derive(Parser)]
#[command(name = "uv-overlap")]
#[command(about = "Find overlapping UVs in a Wavefront OBJ mesh", long_about = None)]
struct Args {
    /// OBJ file to check
    path: PathBuf,

    /// Object name used in reported components (default: file stem)
    #[arg(long)]
    object: Option<String>,

    /// How shells with overlapping bounds are grouped
    #[arg(long, value_enum, default_value = "pairwise")]
    merge: MergeMode,

    /// Endpoint tolerance in UV units
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Log timings and summary
    #[arg(short, long)]
    verbose: bool,

    /// Print only the number of overlapping UVs
    #[arg(long)]
    count: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let mesh = ObjMesh::parse(&text).with_context(|| format!("parsing {}", args.path.display()))?;
    let layout = shells::to_layout(&mesh);

    let options = CheckOptions::default()
        .with_tolerance(args.tolerance)
        .with_merge(args.merge.into());
    let report = OverlapChecker::new(options).check(&layout)?;

    if args.count {
        println!("{}", report.len());
        return Ok(());
    }
    let object = match args.object {
        Some(name) => name,
        None => args
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string()),
    };
    for path in report.component_paths(&object) {
        println!("{path}");
    }
    Ok(())
}
