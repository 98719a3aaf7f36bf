use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// A language construct the compiler does not translate.
    Construct,
    /// Markup used where it cannot be compiled.
    Markup,
    /// A type declaration or reference with no Rust representation.
    TypeShape,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construct => write!(f, "construct"),
            Self::Markup => write!(f, "markup"),
            Self::TypeShape => write!(f, "type shape"),
        }
    }
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Construct errors (E100–E199) ──
    pub const UNSUPPORTED_CONSTRUCT: Self = Self(100);
    pub const UNSUPPORTED_OPERATOR: Self = Self(101);
    pub const DESTRUCTURING: Self = Self(102);
    pub const MULTIPLE_DECLARATORS: Self = Self(103);
    pub const MISSING_INITIALIZER: Self = Self(104);
    pub const REF_TYPE: Self = Self(105);
    pub const OPERATOR_OVERLOAD: Self = Self(106);
    pub const MISSING_ANNOTATION: Self = Self(107);
    pub const UNSUPPORTED_MODULE_MEMBER: Self = Self(108);
    pub const UNSUPPORTED_IMPORT: Self = Self(109);

    // ── Markup errors (E200–E299) ──
    pub const MARKUP_NOT_ALLOWED_HERE: Self = Self(200);
    pub const VOID_ELEMENT_CHILDREN: Self = Self(201);
    pub const SPREAD_ATTRIBUTE: Self = Self(202);
    pub const INVALID_PROP_NAME: Self = Self(203);

    // ── Type shape errors (E300–E399) ──
    pub const UNSUPPORTED_TYPE_SHAPE: Self = Self(300);
    pub const MIXED_LITERAL_UNION: Self = Self(301);
    pub const UNSUPPORTED_UNION: Self = Self(302);
    pub const MISSING_PROPERTY_TYPE: Self = Self(303);
    pub const QUOTED_PROPERTY_NAME: Self = Self(304);
    pub const MUTABLE_PROPERTY: Self = Self(305);
    pub const NUMBER_TYPE: Self = Self(306);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Markup,
            300..=399 => ErrorCategory::TypeShape,
            _ => ErrorCategory::Construct,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// The compile error raised by every stage of the code generator.
///
/// Carries the position and kind of the offending syntax node. The first
/// error aborts compilation of the enclosing unit; no partial output is
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{file}:{span}: {code} [{category}] {message}")]
pub struct TranspileError {
    /// Source file name; filled in by the module driver.
    #[serde(default)]
    pub file: String,
    pub code: ErrorCode,
    pub category: ErrorCategory,
    /// Kind of the offending syntax node (e.g. `"binary"`, `"element"`).
    pub node: String,
    /// Human-readable error message.
    pub message: String,
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl TranspileError {
    /// Create a new error for a node.
    pub fn new(code: ErrorCode, node: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            file: String::new(),
            code,
            category: code.category(),
            node: node.into(),
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attribute the error to a source file, keeping an already-set name.
    pub fn in_file(mut self, file: &str) -> Self {
        if self.file.is_empty() {
            self.file = file.to_string();
        }
        self
    }
}
