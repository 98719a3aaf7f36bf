//! Static type facts and the type-query seam.
//!
//! The code generator asks a [`TypeOracle`] about an expression only at a few
//! decision points: truthiness tests, logical operators, `??`, string
//! concatenation and nullable returns. The default [`EmbeddedFacts`] oracle reads the facts the checker
//! embedded in the syntax tree and falls back to syntactic inference.

use crate::ast::{BinOp, Expr, ExprKind, UnaryOp};
use serde::{Deserialize, Serialize};

/// What the type checker knows about one expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeFacts {
    /// Static type is `boolean`.
    pub is_boolean: bool,
    /// Static type is the literal `true` or `false`.
    pub is_boolean_literal: bool,
    /// Name of the alias the type was declared through, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_name: Option<String>,
    /// Printed arms when the type is a union.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub union_arms: Vec<String>,
    /// Type admits `null` / `undefined`.
    pub is_nullable: bool,
    /// Static type is `string`.
    pub is_string: bool,
}

impl TypeFacts {
    pub fn boolean() -> Self {
        Self {
            is_boolean: true,
            ..Self::default()
        }
    }

    pub fn boolean_literal() -> Self {
        Self {
            is_boolean_literal: true,
            ..Self::default()
        }
    }

    pub fn nullable() -> Self {
        Self {
            is_nullable: true,
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self {
            is_string: true,
            ..Self::default()
        }
    }

    /// Whether a value of this type can be tested without the truthy helper.
    ///
    /// A union counts when every arm is `true`, `false` or `boolean`.
    pub fn is_booleanish(&self) -> bool {
        self.is_boolean
            || self.is_boolean_literal
            || (!self.union_arms.is_empty()
                && self
                    .union_arms
                    .iter()
                    .all(|arm| matches!(arm.as_str(), "true" | "false" | "boolean")))
    }
}

/// Type query consulted by the code generator.
pub trait TypeOracle {
    fn type_of(&self, expr: &Expr) -> TypeFacts;

    fn is_boolean(&self, expr: &Expr) -> bool {
        self.type_of(expr).is_booleanish()
    }

    fn is_nullable(&self, expr: &Expr) -> bool {
        self.type_of(expr).is_nullable
    }

    fn is_string(&self, expr: &Expr) -> bool {
        self.type_of(expr).is_string
    }
}

/// Oracle backed by facts embedded in the syntax tree.
///
/// Expressions without embedded facts are classified syntactically: boolean
/// literals, `!`, comparisons and `&&`/`||` over booleans are boolean;
/// `null`/`undefined` are nullable; string literals, templates and `+` with a
/// string operand are strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedFacts;

impl TypeOracle for EmbeddedFacts {
    fn type_of(&self, expr: &Expr) -> TypeFacts {
        if let Some(facts) = &expr.facts {
            return facts.clone();
        }
        match &expr.kind {
            ExprKind::Bool { .. } => TypeFacts::boolean_literal(),
            ExprKind::Null | ExprKind::Undefined => TypeFacts::nullable(),
            ExprKind::String { .. } | ExprKind::Template { .. } => TypeFacts::string(),
            ExprKind::Binary {
                left,
                op: BinOp::Add,
                right,
            } if self.is_string(left) || self.is_string(right) => TypeFacts::string(),
            ExprKind::Paren { inner } => self.type_of(inner),
            ExprKind::Unary {
                op: UnaryOp::Not, ..
            } => TypeFacts::boolean(),
            ExprKind::Binary { op, .. } if op.is_comparison() => TypeFacts::boolean(),
            ExprKind::Binary {
                left,
                op: BinOp::And | BinOp::Or,
                right,
            } if self.is_boolean(left) && self.is_boolean(right) => TypeFacts::boolean(),
            ExprKind::Conditional {
                when_true,
                when_false,
                ..
            } if self.is_boolean(when_true) && self.is_boolean(when_false) => TypeFacts::boolean(),
            _ => TypeFacts::default(),
        }
    }
}
