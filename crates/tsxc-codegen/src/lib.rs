//! tsxc code generator: compiles a typed TSX syntax tree to Rust source.
//!
//! # Architecture
//!
//! Compilation of one unit is a pure function from the syntax tree (plus a
//! [`TypeOracle`](tsxc_types::TypeOracle)) to text:
//!
//! - [`compiler`] drives one unit: imports, type aliases, functions.
//! - [`types`] emits records and string enums and maps type references.
//! - [`stmt`] emits function bodies.
//! - [`expr`] emits expressions and hands embedded markup to [`markup`].
//!
//! ## Rendering modes
//!
//! Every expression is compiled under a [`RenderMode`]. Markup compiled
//! `Deferred` becomes an `Element` closure; markup compiled `Immediate`
//! splices append calls into the writer chain that is already open; markup
//! under `Forbidden` (attribute values) is an error.
//!
//! ## Output
//!
//! One file per unit, a `pub mod` that imports the runtime prelude:
//!
//! ```text
//! // @generated by tsxc from Greeting.tsx. Do not edit.
//! pub mod greeting {
//!     #![allow(non_snake_case, ...)]
//!     use tsxc_runtime::prelude::*;
//!
//!     pub fn Greeting(props: GreetingProps) -> Element { ... }
//! }
//! ```

pub mod captures;
pub mod code_writer;
pub mod compiler;
pub mod context;
pub mod error;
pub mod expr;
pub mod markup;
pub mod source_map;
pub mod stmt;
pub mod text;
pub mod types;

pub use compiler::{compile, compile_linked, compile_module, module_name, CompiledModule};
pub use context::{CompileOptions, ComponentTable, Context, RenderMode};
pub use error::{CodegenError, CodegenResult};
pub use source_map::{ItemKind, SourceMap};
