//! Build configuration, read from `tsxc.json`.
//!
//! ```json
//! {
//!   "namespace": "crate::views",
//!   "runtime_crate": "tsxc_runtime",
//!   "line_markers": true,
//!   "out_dir": "src/views",
//!   "parallel": true,
//!   "source_maps": false
//! }
//! ```
//!
//! Every key is optional. Relative `out_dir` values are resolved against the
//! directory holding the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tsxc_codegen::CompileOptions;

use crate::error::{PipelineError, PipelineResult};

/// File name searched for by [`Config::discover`].
pub const CONFIG_FILE: &str = "tsxc.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub compile: CompileOptions,
    /// Directory generated modules are written to.
    pub out_dir: PathBuf,
    /// Compile units on the rayon thread pool.
    pub parallel: bool,
    /// Write a `<module>.rs.map.json` sidecar next to each module.
    pub source_maps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compile: CompileOptions::default(),
            out_dir: PathBuf::from("generated"),
            parallel: false,
            source_maps: false,
        }
    }
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: &Path) -> PipelineResult<Config> {
        let text = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let mut config: Config = serde_json::from_str(&text).map_err(|e| PipelineError::json(path, e))?;
        if config.compile.namespace.trim().is_empty() {
            return Err(PipelineError::Config {
                path: path.to_path_buf(),
                message: "`namespace` must not be empty".to_string(),
            });
        }
        if config.out_dir.is_relative() {
            if let Some(dir) = path.parent() {
                config.out_dir = dir.join(&config.out_dir);
            }
        }
        Ok(config)
    }

    /// Load the nearest `tsxc.json` at or above `start`, or the defaults when
    /// there is none.
    pub fn discover(start: &Path) -> PipelineResult<Config> {
        match find_config(start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using config");
                Config::load(&path)
            }
            None => Ok(Config::default()),
        }
    }
}

/// Search `start` and its ancestors for [`CONFIG_FILE`].
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.compile.runtime_crate, "tsxc_runtime");
    }

    #[test]
    fn compile_options_are_flattened() {
        let config: Config = serde_json::from_str(
            r#"{ "namespace": "crate::views", "line_markers": false, "parallel": true }"#,
        )
        .unwrap();
        assert_eq!(config.compile.namespace, "crate::views");
        assert!(!config.compile.line_markers);
        assert!(config.parallel);
        assert!(!config.source_maps);
    }
}
