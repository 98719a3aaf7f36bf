//! Codegen error types.

use tsxc_types::{ErrorCode, Span};

/// Every codegen failure is a [`tsxc_types::TranspileError`].
pub type CodegenError = tsxc_types::TranspileError;

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// A construct the compiler does not translate.
pub(crate) fn unsupported(node: &str, what: impl std::fmt::Display, span: Span) -> CodegenError {
    CodegenError::new(
        ErrorCode::UNSUPPORTED_CONSTRUCT,
        node,
        format!("Unsupported construct: {what}."),
        span,
    )
}
