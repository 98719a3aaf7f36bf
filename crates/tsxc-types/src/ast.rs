//! Syntax tree handed over by the parser/type-checker collaborator.
//!
//! Every node carries a [`Span`] for error reporting. The tree is read-only
//! input to the code generator and is exchanged as JSON: most enums are
//! internally tagged with a `"kind"` field, operators serialize as their
//! source token (`"&&"`, `"==="`, ...).
//! Large recursive types are boxed to keep enum sizes reasonable.

use crate::{Span, TypeFacts};
use serde::{Deserialize, Serialize};

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// One compilation unit (a single `.tsx` file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// File name as written in diagnostics and line markers, e.g. `Layout.tsx`.
    pub file_name: String,
    pub items: Vec<Item>,
    /// Original source text, used only for diagnostic context lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub span: Span,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Import(ImportDecl),
    TypeAlias(TypeAliasDecl),
    Function(FunctionDecl),
    /// Any other top-level statement; never compiled.
    Statement { statement: Stmt },
}

impl Item {
    pub fn span(&self) -> Span {
        match self {
            Item::Import(i) => i.span,
            Item::TypeAlias(t) => t.span,
            Item::Function(f) => f.span,
            Item::Statement { statement } => statement.span(),
        }
    }
}

/// `import * as T from "./M"`, `import { a, b } from "./M"`, `import D from "./M"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Ident>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<ImportBindings>,
    /// Module specifier, e.g. `"./Layout"`.
    pub source: String,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportBindings {
    /// `* as T`
    Namespace { alias: Ident },
    /// `{ a, b }`
    Named { names: Vec<Ident> },
}

/// `type Name = ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub name: Ident,
    #[serde(default)]
    pub exported: bool,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default)]
    pub span: Span,
}

/// `[export] [async] function name(params): ret { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Ident>,
    #[serde(default)]
    pub exported: bool,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Block>,
    #[serde(default)]
    pub span: Span,
}

/// A function or arrow parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: Binding,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeNode>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub rest: bool,
    #[serde(default)]
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Identifiers & Bindings
// ══════════════════════════════════════════════════════════════════════════════

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Binding target of a declaration or parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    Identifier(Ident),
    /// `{ a, b }` destructuring
    ObjectPattern {
        #[serde(default)]
        span: Span,
    },
    /// `[a, b]` destructuring
    ArrayPattern {
        #[serde(default)]
        span: Span,
    },
}

impl Binding {
    pub fn span(&self) -> Span {
        match self {
            Binding::Identifier(id) => id.span,
            Binding::ObjectPattern { span } | Binding::ArrayPattern { span } => *span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// `{ stmts }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Block(Block),
    If(IfStmt),
    For(ForStmt),
    Variable(VarDecl),
    Return(ReturnStmt),
    Expr(ExprStmt),
    Function(FunctionDecl),
    /// `while`, `switch`, `try`, `throw`, `class`, ... (never compiled)
    Other {
        construct: String,
        #[serde(default)]
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(b) => b.span,
            Stmt::If(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Variable(v) => v.span,
            Stmt::Return(r) => r.span,
            Stmt::Expr(e) => e.span,
            Stmt::Function(f) => f.span,
            Stmt::Other { span, .. } => *span,
        }
    }

    /// Node kind name used in diagnostics and source maps.
    pub fn kind_name(&self) -> &str {
        match self {
            Stmt::Block(_) => "block",
            Stmt::If(_) => "if",
            Stmt::For(_) => "for",
            Stmt::Variable(_) => "variable",
            Stmt::Return(_) => "return",
            Stmt::Expr(_) => "expression_statement",
            Stmt::Function(_) => "function",
            Stmt::Other { construct, .. } => construct,
        }
    }
}

/// `if (cond) then [else otherwise]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_branch: Option<Box<Stmt>>,
    #[serde(default)]
    pub span: Span,
}

/// `for (init; cond; incr) body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<ForInit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForInit {
    Variable(VarDecl),
    Expr(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
    Const,
    Let,
    Var,
}

/// `const x: T = init, ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    #[serde(rename = "declaration_kind")]
    pub kind: VarKind,
    pub declarations: Vec<VarDeclarator>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub name: Binding,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// `return [value]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// An expression evaluated for its side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub expr: Expr,
    #[serde(default)]
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression with its span and the checker's type facts, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<TypeFacts>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            facts: None,
        }
    }

    /// Attach type facts from the checker.
    pub fn with_facts(mut self, facts: TypeFacts) -> Self {
        self.facts = Some(facts);
        self
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr {
        match &self.kind {
            ExprKind::Paren { inner } => inner.unparenthesized(),
            _ => self,
        }
    }

    /// Node kind name used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            ExprKind::Number { .. } => "number",
            ExprKind::String { .. } => "string",
            ExprKind::Bool { .. } => "boolean",
            ExprKind::Null => "null",
            ExprKind::Undefined => "undefined",
            ExprKind::Identifier { .. } => "identifier",
            ExprKind::Array { .. } => "array",
            ExprKind::Template { .. } => "template",
            ExprKind::Unary { .. } => "unary",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Conditional { .. } => "conditional",
            ExprKind::Property { .. } => "property",
            ExprKind::Index { .. } => "index",
            ExprKind::Call { .. } => "call",
            ExprKind::New { .. } => "new",
            ExprKind::Await { .. } => "await",
            ExprKind::Paren { .. } => "paren",
            ExprKind::Arrow { .. } => "arrow",
            ExprKind::Markup { markup } => markup.kind_name(),
            ExprKind::Other { construct } => construct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprKind {
    /// Numeric literal as written (`42`, `1.5`, `0xff`).
    Number { text: String },
    /// String literal, already unescaped.
    String { value: String },
    Bool { value: bool },
    Null,
    Undefined,
    Identifier { name: String },
    Array { elements: Vec<Expr> },
    /// `` `a${x}b` ``: `quasis.len() == expressions.len() + 1`
    Template {
        quasis: Vec<String>,
        expressions: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        /// `false` for postfix `x++` / `x--`
        #[serde(default = "default_true")]
        prefix: bool,
    },
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    /// `object.name` or `object?.name`
    Property {
        object: Box<Expr>,
        name: Ident,
        #[serde(default)]
        optional: bool,
    },
    /// `object[index]`
    Index { object: Box<Expr>, index: Box<Expr> },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    New { callee: Box<Expr>, args: Vec<Expr> },
    Await { operand: Box<Expr> },
    Paren { inner: Box<Expr> },
    /// `(params) => body`
    Arrow {
        params: Vec<Param>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        return_type: Option<TypeNode>,
        body: ArrowBody,
        #[serde(default)]
        is_async: bool,
    },
    /// Embedded markup: element or fragment.
    Markup { markup: Markup },
    /// Object literals, `this`, spread, regex, class expressions, ... (never compiled)
    Other { construct: String },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "-")]
    Neg,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::BitNot => "~",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
            UnaryOp::Typeof => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    // ── Arithmetic ──
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Rem,
    #[serde(rename = "**")]
    Exp,

    // ── Comparison ──
    #[serde(rename = "==")]
    LooseEq,
    #[serde(rename = "!=")]
    LooseNotEq,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNotEq,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEq,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEq,

    // ── Logical ──
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "??")]
    Nullish,

    // ── Bitwise ──
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = ">>>")]
    UShr,

    // ── Assignment ──
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    RemAssign,
    #[serde(rename = "&=")]
    BitAndAssign,
    #[serde(rename = "|=")]
    BitOrAssign,
    #[serde(rename = "^=")]
    BitXorAssign,
    #[serde(rename = "<<=")]
    ShlAssign,
    #[serde(rename = ">>=")]
    ShrAssign,
    #[serde(rename = "**=")]
    ExpAssign,
    #[serde(rename = ">>>=")]
    UShrAssign,
    #[serde(rename = "&&=")]
    AndAssign,
    #[serde(rename = "||=")]
    OrAssign,
    #[serde(rename = "??=")]
    NullishAssign,

    // ── Other ──
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

impl BinOp {
    /// Source token of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Exp => "**",
            BinOp::LooseEq => "==",
            BinOp::LooseNotEq => "!=",
            BinOp::StrictEq => "===",
            BinOp::StrictNotEq => "!==",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Nullish => "??",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::UShr => ">>>",
            BinOp::Assign => "=",
            BinOp::AddAssign => "+=",
            BinOp::SubAssign => "-=",
            BinOp::MulAssign => "*=",
            BinOp::DivAssign => "/=",
            BinOp::RemAssign => "%=",
            BinOp::BitAndAssign => "&=",
            BinOp::BitOrAssign => "|=",
            BinOp::BitXorAssign => "^=",
            BinOp::ShlAssign => "<<=",
            BinOp::ShrAssign => ">>=",
            BinOp::ExpAssign => "**=",
            BinOp::UShrAssign => ">>>=",
            BinOp::AndAssign => "&&=",
            BinOp::OrAssign => "||=",
            BinOp::NullishAssign => "??=",
            BinOp::Comma => ",",
            BinOp::In => "in",
            BinOp::Instanceof => "instanceof",
        }
    }

    /// Whether the operator always yields a boolean.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::LooseEq
                | BinOp::LooseNotEq
                | BinOp::StrictEq
                | BinOp::StrictNotEq
                | BinOp::Less
                | BinOp::LessEq
                | BinOp::Greater
                | BinOp::GreaterEq
        )
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Markup
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Markup {
    /// `<tag attrs>children</tag>` or `<tag attrs/>`
    Element {
        tag: String,
        #[serde(default)]
        attributes: Vec<Attribute>,
        #[serde(default)]
        children: Vec<MarkupChild>,
        #[serde(default)]
        span: Span,
    },
    /// `<>children</>`
    Fragment {
        #[serde(default)]
        children: Vec<MarkupChild>,
        #[serde(default)]
        span: Span,
    },
}

impl Markup {
    pub fn span(&self) -> Span {
        match self {
            Markup::Element { span, .. } | Markup::Fragment { span, .. } => *span,
        }
    }

    pub fn children(&self) -> &[MarkupChild] {
        match self {
            Markup::Element { children, .. } | Markup::Fragment { children, .. } => children,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Markup::Element { .. } => "element",
            Markup::Fragment { .. } => "fragment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkupChild {
    /// Raw text between tags, exactly as written.
    Text {
        text: String,
        #[serde(default)]
        span: Span,
    },
    /// `{expr}`; an empty `{}` or comment-only hole has no expression.
    Expression {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expr: Option<Expr>,
        #[serde(default)]
        span: Span,
    },
    Markup { markup: Markup },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribute {
    /// `name`, `name="text"` or `name={expr}`
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<AttrValue>,
        #[serde(default)]
        span: Span,
    },
    /// `{...expr}`
    Spread {
        expr: Expr,
        #[serde(default)]
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttrValue {
    String { value: String },
    Expression { expr: Expr },
}

// ══════════════════════════════════════════════════════════════════════════════
// Type Nodes
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    #[serde(flatten)]
    pub kind: TypeKind,
    #[serde(default)]
    pub span: Span,
}

impl TypeNode {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            TypeKind::Boolean => "boolean",
            TypeKind::String => "string",
            TypeKind::Number => "number",
            TypeKind::Void => "void",
            TypeKind::Null => "null",
            TypeKind::Undefined => "undefined",
            TypeKind::Any => "any",
            TypeKind::Literal { .. } => "literal_type",
            TypeKind::Reference { .. } => "type_reference",
            TypeKind::Array { .. } => "array_type",
            TypeKind::Union { .. } => "union_type",
            TypeKind::Paren { .. } => "parenthesized_type",
            TypeKind::Object { .. } => "object_type",
            TypeKind::Function { .. } => "function_type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Boolean,
    String,
    Number,
    Void,
    Null,
    Undefined,
    Any,
    /// `"x"`, `1`, `true`
    Literal { literal: LiteralType },
    /// `Name`, `T.Name`, `Name<A, B>`
    Reference {
        name: String,
        #[serde(default)]
        args: Vec<TypeNode>,
    },
    /// `T[]`
    Array { element: Box<TypeNode> },
    Union { arms: Vec<TypeNode> },
    Paren { inner: Box<TypeNode> },
    /// `{ readonly a: T; b?: U }`
    Object { members: Vec<TypeMember> },
    /// `(a: A) => R`
    Function {
        params: Vec<Param>,
        ret: Box<TypeNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LiteralType {
    String { value: String },
    Number { text: String },
    Bool { value: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeMember {
    Property(PropertySignature),
    Method {
        name: String,
        #[serde(default)]
        span: Span,
    },
    Index {
        #[serde(default)]
        span: Span,
    },
    Call {
        #[serde(default)]
        span: Span,
    },
}

impl TypeMember {
    pub fn span(&self) -> Span {
        match self {
            TypeMember::Property(p) => p.span,
            TypeMember::Method { span, .. } | TypeMember::Index { span } | TypeMember::Call { span } => {
                *span
            }
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeMember::Property(_) => "property_signature",
            TypeMember::Method { .. } => "method_signature",
            TypeMember::Index { .. } => "index_signature",
            TypeMember::Call { .. } => "call_signature",
        }
    }
}

/// `readonly name?: T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySignature {
    pub name: PropertyName,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeNode>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyName {
    Identifier { name: String },
    /// `"quoted-name"`
    String { value: String },
    Numeric { text: String },
    /// `[expr]`
    Computed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn binary_expression_from_json() {
        let expr: Expr = serde_json::from_value(json!({
            "kind": "binary",
            "left": { "kind": "identifier", "name": "x", "span": { "line": 1, "column": 1 } },
            "op": "&&",
            "right": { "kind": "number", "text": "0" },
            "span": { "line": 1, "column": 1, "end_line": 1, "end_column": 7 }
        }))
        .unwrap();
        match &expr.kind {
            ExprKind::Binary { left, op, right } => {
                assert_eq!(*op, BinOp::And);
                assert_eq!(left.kind, ExprKind::Identifier { name: "x".into() });
                assert_eq!(right.kind, ExprKind::Number { text: "0".into() });
            }
            other => panic!("expected binary, got {other:?}"),
        }
        assert_eq!(expr.span, Span::new(1, 1, 1, 7));
        assert!(expr.facts.is_none());
    }

    #[test]
    fn markup_expression_from_json() {
        let expr: Expr = serde_json::from_value(json!({
            "kind": "markup",
            "markup": {
                "type": "element",
                "tag": "div",
                "attributes": [
                    { "kind": "named", "name": "id", "value": { "kind": "string", "value": "main" } },
                    { "kind": "named", "name": "hidden" }
                ],
                "children": [
                    { "kind": "text", "text": "Hi " },
                    { "kind": "expression", "expr": { "kind": "identifier", "name": "name" } },
                    { "kind": "expression" }
                ],
                "span": { "line": 2, "column": 5 }
            }
        }))
        .unwrap();
        let ExprKind::Markup { markup } = &expr.kind else {
            panic!("expected markup");
        };
        assert_eq!(markup.kind_name(), "element");
        assert_eq!(markup.children().len(), 3);
        assert_eq!(markup.span(), Span::new(2, 5, 0, 0));
    }

    #[test]
    fn postfix_flag_defaults_to_prefix() {
        let expr: Expr = serde_json::from_value(json!({
            "kind": "unary", "op": "++", "operand": { "kind": "identifier", "name": "i" }
        }))
        .unwrap();
        assert!(matches!(expr.kind, ExprKind::Unary { op: UnaryOp::Increment, prefix: true, .. }));
    }

    #[test]
    fn type_alias_item_from_json() {
        let item: Item = serde_json::from_value(json!({
            "kind": "type_alias",
            "name": { "name": "Status" },
            "exported": true,
            "type": {
                "kind": "union",
                "arms": [
                    { "kind": "literal", "literal": { "kind": "string", "value": "loggedIn" } },
                    { "kind": "literal", "literal": { "kind": "string", "value": "hi2sss" } }
                ]
            }
        }))
        .unwrap();
        let Item::TypeAlias(alias) = item else {
            panic!("expected type alias");
        };
        assert_eq!(alias.name.name, "Status");
        assert!(matches!(&alias.ty.kind, TypeKind::Union { arms } if arms.len() == 2));
    }

    #[test]
    fn statement_kind_names() {
        let stmt: Stmt = serde_json::from_value(json!({
            "kind": "other", "construct": "while", "span": { "line": 9, "column": 3 }
        }))
        .unwrap();
        assert_eq!(stmt.kind_name(), "while");
        assert_eq!(stmt.span(), Span::new(9, 3, 0, 0));
    }

    #[test]
    fn unparenthesized_strips_nesting() {
        let inner = Expr::new(ExprKind::Identifier { name: "a".into() }, Span::default());
        let wrapped = Expr::new(
            ExprKind::Paren {
                inner: Box::new(Expr::new(
                    ExprKind::Paren {
                        inner: Box::new(inner.clone()),
                    },
                    Span::default(),
                )),
            },
            Span::default(),
        );
        assert_eq!(wrapped.unparenthesized(), &inner);
    }

    #[test]
    fn operator_tokens_round_trip() {
        for op in [BinOp::StrictNotEq, BinOp::Nullish, BinOp::UShrAssign, BinOp::Comma] {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
    }
}
