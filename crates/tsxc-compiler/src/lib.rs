//! tsxc compiler: orchestrates the build pipeline.
//!
//! ```text
//! JSON units → load → codegen (per unit, optionally parallel) → write-if-changed → .rs
//! ```
//!
//! The front end (parser and type checker) serializes each unit's typed
//! syntax tree as JSON. This crate loads those units, compiles them with
//! [`tsxc_codegen`], reports failed units as [`Diagnostic`]s and writes the
//! generated modules. The `tsxc` binary wraps it as a command-line tool.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod persist;
pub mod pipeline;

pub use config::{find_config, Config, CONFIG_FILE};
pub use diagnostic::Diagnostic;
pub use error::{PipelineError, PipelineResult};
pub use persist::{persist, write_if_changed, WriteOutcome};
pub use pipeline::{
    compile_unit, compile_unit_with, compile_units, component_tables, compute_hash, index_source,
    load_unit, load_units, BuildReport, UnitOutput,
};

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for the command-line tool.
///
/// `RUST_LOG` overrides the default filter (`info` for tsxc crates, `warn`
/// for everything else).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tsxc=info,tsxc_compiler=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
