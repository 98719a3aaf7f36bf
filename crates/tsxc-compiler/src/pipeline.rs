//! Build pipeline: serialized units in, generated modules out.
//!
//! ```text
//! units.json → load_unit → compile_unit → persist → <out_dir>/<module>.rs
//! ```
//!
//! Units compile independently. A unit that fails to load or compile is
//! reported on its own; its siblings still compile. Units of one batch see
//! each other's component tables, so calls to imported components know which
//! props are optional.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use tsxc_codegen::{compile_linked, module_name, ComponentTable, SourceMap};
use tsxc_types::ast::Module;
use tsxc_types::EmbeddedFacts;

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::error::{PipelineError, PipelineResult};

/// The generated module for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOutput {
    /// Source unit the module was compiled from.
    pub file_name: String,
    pub module_name: String,
    /// Where the module is written: `<out_dir>/<module_name>.rs`.
    pub path: PathBuf,
    pub code: String,
    /// Hex SHA-256 of `code`.
    pub hash: String,
    pub source_map: SourceMap,
}

/// Outcome of compiling a batch of units, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub outputs: Vec<UnitOutput>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All diagnostics, one block per failed unit.
    pub fn format_diagnostics(&self) -> String {
        let mut out = String::new();
        for d in &self.diagnostics {
            out.push_str(&d.to_string());
            out.push('\n');
        }
        out
    }
}

/// Read a unit serialized as JSON by the front end.
pub fn load_unit(path: &Path) -> PipelineResult<Module> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| PipelineError::json(path, e))
}

/// Read every unit. Units that cannot be read are logged and returned as
/// errors next to the ones that loaded.
pub fn load_units(paths: &[PathBuf]) -> (Vec<Module>, Vec<PipelineError>) {
    let mut modules = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();
    for path in paths {
        match load_unit(path) {
            Ok(module) => modules.push(module),
            Err(e) => {
                error!("failed to load unit: {e}");
                errors.push(e);
            }
        }
    }
    (modules, errors)
}

/// Compile one unit on its own.
pub fn compile_unit(module: &Module, config: &Config) -> Result<UnitOutput, Diagnostic> {
    compile_unit_with(module, config, &HashMap::new())
}

/// Compile one unit against the component tables of the units it may import,
/// keyed by module name.
pub fn compile_unit_with(
    module: &Module,
    config: &Config,
    siblings: &HashMap<String, ComponentTable>,
) -> Result<UnitOutput, Diagnostic> {
    let compiled = compile_linked(module, &EmbeddedFacts, &config.compile, siblings)
        .map_err(|e| Diagnostic::new(e, module.source.as_deref()))?;
    debug!(file = %module.file_name, module = %compiled.module_name, "compiled unit");
    Ok(UnitOutput {
        file_name: module.file_name.clone(),
        path: config.out_dir.join(format!("{}.rs", compiled.module_name)),
        hash: compute_hash(&compiled.code),
        module_name: compiled.module_name,
        code: compiled.code,
        source_map: compiled.source_map,
    })
}

/// Component tables of a batch, keyed by module name.
pub fn component_tables(modules: &[Module]) -> HashMap<String, ComponentTable> {
    modules
        .iter()
        .map(|m| (module_name(&m.file_name), ComponentTable::from_module(m)))
        .collect()
}

/// Compile every unit; on the rayon pool when `config.parallel` is set.
pub fn compile_units(modules: &[Module], config: &Config) -> BuildReport {
    let siblings = component_tables(modules);
    let results: Vec<Result<UnitOutput, Diagnostic>> = if config.parallel {
        modules
            .par_iter()
            .map(|m| compile_unit_with(m, config, &siblings))
            .collect()
    } else {
        modules
            .iter()
            .map(|m| compile_unit_with(m, config, &siblings))
            .collect()
    };

    let mut report = BuildReport::default();
    let mut seen = HashSet::new();
    for result in results {
        match result {
            Ok(output) => {
                if !seen.insert(output.module_name.clone()) {
                    warn!(
                        file = %output.file_name,
                        module = %output.module_name,
                        "module name already generated by another unit; output will be overwritten"
                    );
                }
                report.outputs.push(output);
            }
            Err(diagnostic) => report.diagnostics.push(diagnostic),
        }
    }
    report
}

/// Source of an index file that pulls every generated module into the
/// including crate with `include!`.
pub fn index_source(outputs: &[UnitOutput]) -> String {
    let mut names: Vec<&str> = outputs.iter().map(|o| o.module_name.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    let mut out = String::from("// @generated by tsxc. Do not edit.\n");
    for name in names {
        out.push_str(&format!("include!(\"{name}.rs\");\n"));
    }
    out
}

pub fn compute_hash(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}
