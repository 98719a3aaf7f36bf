//! Source mapping: generated Rust line → TSX source location.
//!
//! Each entry maps the first generated line of an emitted item (function,
//! record, string enum) to its originating source span. Statement-level
//! positions are carried by the `//# line` markers inside function bodies.

use serde::{Deserialize, Serialize};
use tsxc_types::Span;

/// A complete source map for one generated file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMap {
    /// Source file the entries point into.
    pub file: String,
    pub entries: Vec<SourceMapEntry>,
}

/// A single source map entry: one emitted item → one source region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMapEntry {
    /// 1-based line in the generated file where the item starts.
    pub generated_line: u32,
    /// Item name as declared in source.
    pub name: String,
    pub kind: ItemKind,
    /// Source span (1-based line/column).
    pub span: Span,
}

/// Classification of an emitted item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A top-level function (usually a component).
    Function,
    /// A record struct generated from an object type alias.
    Record,
    /// A string enum generated from a string-literal union alias.
    StringEnum,
}

impl SourceMap {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            entries: Vec::new(),
        }
    }

    /// Push a new entry.
    pub fn push(&mut self, generated_line: u32, name: impl Into<String>, kind: ItemKind, span: Span) {
        self.entries.push(SourceMapEntry {
            generated_line,
            name: name.into(),
            kind,
            span,
        });
    }

    /// The item a generated line belongs to: the last entry starting at or
    /// before `line`.
    pub fn find_by_generated_line(&self, line: u32) -> Option<&SourceMapEntry> {
        self.entries
            .iter()
            .filter(|e| e.generated_line <= line)
            .max_by_key(|e| e.generated_line)
    }

    /// Serialize to pretty JSON for the `.map.json` sidecar.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialize from JSON.
    pub fn from_json(data: &str) -> Option<Self> {
        serde_json::from_str(data).ok()
    }
}
