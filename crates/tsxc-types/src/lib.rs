//! Shared types for the tsxc compiler.
//!
//! This crate defines the syntax tree handed over by the parser/type-checker
//! collaborator, source spans, the static type facts consulted by the code
//! generator, and the single compile error type.

mod error;
mod oracle;
mod span;
pub mod ast;
pub mod builder;

pub use error::{ErrorCategory, ErrorCode, TranspileError};
pub use oracle::{EmbeddedFacts, TypeFacts, TypeOracle};
pub use span::{SourceFile, Span};

/// Result type used throughout the tsxc compiler.
pub type Result<T> = std::result::Result<T, TranspileError>;
