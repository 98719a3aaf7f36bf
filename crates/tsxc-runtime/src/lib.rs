//! Runtime for code generated by tsxc.
//!
//! Generated components write HTML through a [`Writer`]. Markup values are
//! [`Element`] closures that run only when written; component children are
//! passed as [`Node`] values. Logical operators over non-boolean operands go
//! through [`and`] / [`or`], which reproduce JavaScript's short-circuit
//! results, and conditions on non-boolean values go through [`is_truthy`].
//!
//! Generated modules import everything through [`prelude`].

mod escape;
mod node;
mod render;
mod string_enum;
mod truthy;
mod value;
mod writer;

pub use escape::{attr, escape_html};
pub use node::{Element, Literal, Node, NodeIter};
pub use render::{render, render_document, render_task, render_to, task, Task};
pub use truthy::{is_truthy, Truthy};
pub use value::{and, display, or, ToValue, Value};
pub use writer::{Render, Writer};

/// Everything generated code refers to by bare name.
pub mod prelude {
    pub use crate::{
        and, attr, display, escape_html, is_truthy, or, render, render_document, render_task, render_to,
        string_enum, task, Element, Literal, Node, Render, Task, ToValue, Truthy, Value, Writer,
    };
}
