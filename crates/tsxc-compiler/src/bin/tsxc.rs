//! tsxc CLI
//!
//! Compile serialized TSX units into Rust modules.
//!
//! Usage: `tsxc <unit.json>... [--out-dir DIR] [--namespace NS] [--parallel]`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use tsxc_compiler::{
    compile_units, index_source, init_logging, load_units, persist, write_if_changed, Config,
    WriteOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "tsxc")]
#[command(about = "Compile typed TSX syntax trees (JSON) into Rust modules")]
struct Args {
    /// Serialized units to compile
    #[arg(required = true)]
    units: Vec<PathBuf>,

    /// Configuration file (default: nearest tsxc.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for generated modules
    #[arg(long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Rust path the generated modules live under
    #[arg(long)]
    namespace: Option<String>,

    /// Name of the runtime crate imported by generated code
    #[arg(long = "runtime-crate")]
    runtime_crate: Option<String>,

    /// Omit `//# line` markers
    #[arg(long = "no-line-markers")]
    no_line_markers: bool,

    /// Compile units in parallel
    #[arg(long)]
    parallel: bool,

    /// Write a source map next to each module
    #[arg(long = "source-map")]
    source_map: bool,

    /// Also write `mod.rs`, which includes every generated module
    #[arg(long)]
    index: bool,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("reading the working directory")?;
            Config::discover(&cwd)?
        }
    };
    if let Some(dir) = &args.out_dir {
        config.out_dir = dir.clone();
    }
    if let Some(ns) = &args.namespace {
        config.compile.namespace = ns.clone();
    }
    if let Some(name) = &args.runtime_crate {
        config.compile.runtime_crate = name.clone();
    }
    if args.no_line_markers {
        config.compile.line_markers = false;
    }
    config.parallel |= args.parallel;
    config.source_maps |= args.source_map;
    Ok(config)
}

/// `Ok(false)` when any unit failed to load or compile.
fn run(args: &Args) -> Result<bool> {
    let config = load_config(args)?;

    let (modules, load_errors) = load_units(&args.units);

    let report = compile_units(&modules, &config);
    for d in &report.diagnostics {
        error!("{d}");
    }

    let mut written = 0;
    for output in &report.outputs {
        if persist(output, config.source_maps)? == WriteOutcome::Written {
            written += 1;
        }
    }
    if args.index {
        write_if_changed(&config.out_dir.join("mod.rs"), &index_source(&report.outputs))?;
    }

    info!(
        compiled = report.outputs.len(),
        written,
        failed = report.diagnostics.len() + load_errors.len(),
        "build finished"
    );
    Ok(report.is_success() && load_errors.is_empty())
}
