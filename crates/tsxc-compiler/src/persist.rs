//! Write-if-changed persistence for generated files.
//!
//! A file is rewritten only when its bytes would change, so build tools that
//! watch the output directory see no churn from no-op rebuilds.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::UnitOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Write `contents` to `path` unless the file already holds exactly those
/// bytes. An unreadable existing file counts as absent.
pub fn write_if_changed(path: &Path, contents: &str) -> PipelineResult<WriteOutcome> {
    if let Ok(existing) = fs::read(path) {
        if existing == contents.as_bytes() {
            debug!(path = %path.display(), "unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    }
    fs::write(path, contents).map_err(|e| PipelineError::io(path, e))?;
    info!(path = %path.display(), "wrote");
    Ok(WriteOutcome::Written)
}

/// Write a unit's module, and its source map as `<module>.rs.map.json` when
/// `source_maps` is set. The outcome is that of the module file.
pub fn persist(output: &UnitOutput, source_maps: bool) -> PipelineResult<WriteOutcome> {
    let outcome = write_if_changed(&output.path, &output.code)?;
    if source_maps {
        let mut map_path = output.path.clone().into_os_string();
        map_path.push(".map.json");
        let map_path = Path::new(&map_path);
        let json = serde_json::to_string_pretty(&output.source_map)
            .map_err(|e| PipelineError::json(map_path, e))?;
        write_if_changed(map_path, &json)?;
    }
    Ok(outcome)
}
