//! Terse constructors for syntax trees.
//!
//! Used by tests across the workspace to build units without going through
//! JSON. All nodes get a synthesized span unless placed with [`at_line`].

use crate::ast::*;
use crate::{Span, TypeFacts};

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::default())
}

pub fn ident(name: &str) -> Expr {
    expr(ExprKind::Identifier { name: name.into() })
}

pub fn num(text: &str) -> Expr {
    expr(ExprKind::Number { text: text.into() })
}

pub fn string(value: &str) -> Expr {
    expr(ExprKind::String {
        value: value.into(),
    })
}

pub fn boolean(value: bool) -> Expr {
    expr(ExprKind::Bool { value })
}

pub fn null() -> Expr {
    expr(ExprKind::Null)
}

pub fn undefined() -> Expr {
    expr(ExprKind::Undefined)
}

/// Identifier the checker typed as `boolean`.
pub fn bool_ident(name: &str) -> Expr {
    ident(name).with_facts(TypeFacts::boolean())
}

/// Identifier the checker typed as nullable.
pub fn nullable_ident(name: &str) -> Expr {
    ident(name).with_facts(TypeFacts::nullable())
}

/// `object.name` where the checker typed the property as `string`.
pub fn string_prop(object: Expr, name: &str) -> Expr {
    prop(object, name).with_facts(TypeFacts::string())
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: Box::new(operand),
        prefix: true,
    })
}

pub fn postfix(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: Box::new(operand),
        prefix: false,
    })
}

pub fn not(operand: Expr) -> Expr {
    unary(UnaryOp::Not, operand)
}

pub fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

pub fn cond(condition: Expr, when_true: Expr, when_false: Expr) -> Expr {
    expr(ExprKind::Conditional {
        condition: Box::new(condition),
        when_true: Box::new(when_true),
        when_false: Box::new(when_false),
    })
}

pub fn paren(inner: Expr) -> Expr {
    expr(ExprKind::Paren {
        inner: Box::new(inner),
    })
}

pub fn prop(object: Expr, name: &str) -> Expr {
    expr(ExprKind::Property {
        object: Box::new(object),
        name: Ident::new(name, Span::default()),
        optional: false,
    })
}

/// `object?.name`
pub fn opt_prop(object: Expr, name: &str) -> Expr {
    expr(ExprKind::Property {
        object: Box::new(object),
        name: Ident::new(name, Span::default()),
        optional: true,
    })
}

pub fn index(object: Expr, idx: Expr) -> Expr {
    expr(ExprKind::Index {
        object: Box::new(object),
        index: Box::new(idx),
    })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(callee),
        args,
    })
}

pub fn new_expr(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::New {
        callee: Box::new(callee),
        args,
    })
}

pub fn await_expr(operand: Expr) -> Expr {
    expr(ExprKind::Await {
        operand: Box::new(operand),
    })
}

pub fn array(elements: Vec<Expr>) -> Expr {
    expr(ExprKind::Array { elements })
}

pub fn template(quasis: &[&str], expressions: Vec<Expr>) -> Expr {
    expr(ExprKind::Template {
        quasis: quasis.iter().map(|q| q.to_string()).collect(),
        expressions,
    })
}

/// `(params) => body`
pub fn arrow(params: Vec<Param>, body: Expr) -> Expr {
    expr(ExprKind::Arrow {
        params,
        return_type: None,
        body: ArrowBody::Expr(Box::new(body)),
        is_async: false,
    })
}

/// `(params) => { stmts }`
pub fn arrow_block(params: Vec<Param>, statements: Vec<Stmt>) -> Expr {
    expr(ExprKind::Arrow {
        params,
        return_type: None,
        body: ArrowBody::Block(block(statements)),
        is_async: false,
    })
}

pub fn other_expr(construct: &str) -> Expr {
    expr(ExprKind::Other {
        construct: construct.into(),
    })
}

// ══════════════════════════════════════════════════════════════════════════════
// Markup
// ══════════════════════════════════════════════════════════════════════════════

/// Wrap markup as an expression.
pub fn markup(markup: Markup) -> Expr {
    expr(ExprKind::Markup { markup })
}

pub fn element(tag: &str, attributes: Vec<Attribute>, children: Vec<MarkupChild>) -> Markup {
    Markup::Element {
        tag: tag.into(),
        attributes,
        children,
        span: Span::default(),
    }
}

pub fn fragment(children: Vec<MarkupChild>) -> Markup {
    Markup::Fragment {
        children,
        span: Span::default(),
    }
}

pub fn text(text: &str) -> MarkupChild {
    MarkupChild::Text {
        text: text.into(),
        span: Span::default(),
    }
}

/// `{expr}`
pub fn hole(expr: Expr) -> MarkupChild {
    MarkupChild::Expression {
        expr: Some(expr),
        span: Span::default(),
    }
}

/// `{}`
pub fn empty_hole() -> MarkupChild {
    MarkupChild::Expression {
        expr: None,
        span: Span::default(),
    }
}

/// Nested markup child.
pub fn child(markup: Markup) -> MarkupChild {
    MarkupChild::Markup { markup }
}

/// `name="value"`
pub fn attr_str(name: &str, value: &str) -> Attribute {
    Attribute::Named {
        name: name.into(),
        value: Some(AttrValue::String {
            value: value.into(),
        }),
        span: Span::default(),
    }
}

/// `name={expr}`
pub fn attr_expr(name: &str, expr: Expr) -> Attribute {
    Attribute::Named {
        name: name.into(),
        value: Some(AttrValue::Expression { expr }),
        span: Span::default(),
    }
}

/// `name` with no initializer
pub fn attr_flag(name: &str) -> Attribute {
    Attribute::Named {
        name: name.into(),
        value: None,
        span: Span::default(),
    }
}

/// `{...expr}`
pub fn spread(expr: Expr) -> Attribute {
    Attribute::Spread {
        expr,
        span: Span::default(),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Types
// ══════════════════════════════════════════════════════════════════════════════

fn ty(kind: TypeKind) -> TypeNode {
    TypeNode::new(kind, Span::default())
}

pub fn ty_ref(name: &str) -> TypeNode {
    ty(TypeKind::Reference {
        name: name.into(),
        args: vec![],
    })
}

pub fn ty_generic(name: &str, args: Vec<TypeNode>) -> TypeNode {
    ty(TypeKind::Reference {
        name: name.into(),
        args,
    })
}

pub fn ty_string() -> TypeNode {
    ty(TypeKind::String)
}

pub fn ty_boolean() -> TypeNode {
    ty(TypeKind::Boolean)
}

pub fn ty_number() -> TypeNode {
    ty(TypeKind::Number)
}

pub fn ty_void() -> TypeNode {
    ty(TypeKind::Void)
}

pub fn ty_null() -> TypeNode {
    ty(TypeKind::Null)
}

pub fn ty_undefined() -> TypeNode {
    ty(TypeKind::Undefined)
}

pub fn ty_any() -> TypeNode {
    ty(TypeKind::Any)
}

pub fn ty_array(element: TypeNode) -> TypeNode {
    ty(TypeKind::Array {
        element: Box::new(element),
    })
}

pub fn ty_union(arms: Vec<TypeNode>) -> TypeNode {
    ty(TypeKind::Union { arms })
}

pub fn ty_paren(inner: TypeNode) -> TypeNode {
    ty(TypeKind::Paren {
        inner: Box::new(inner),
    })
}

/// `"value"` as a type
pub fn ty_str_lit(value: &str) -> TypeNode {
    ty(TypeKind::Literal {
        literal: LiteralType::String {
            value: value.into(),
        },
    })
}

pub fn ty_bool_lit(value: bool) -> TypeNode {
    ty(TypeKind::Literal {
        literal: LiteralType::Bool { value },
    })
}

pub fn ty_num_lit(text: &str) -> TypeNode {
    ty(TypeKind::Literal {
        literal: LiteralType::Number { text: text.into() },
    })
}

pub fn ty_object(members: Vec<TypeMember>) -> TypeNode {
    ty(TypeKind::Object { members })
}

pub fn ty_function(params: Vec<Param>, ret: TypeNode) -> TypeNode {
    ty(TypeKind::Function {
        params,
        ret: Box::new(ret),
    })
}

/// `readonly name: T`
pub fn readonly_prop(name: &str, ty: TypeNode) -> TypeMember {
    TypeMember::Property(PropertySignature {
        name: PropertyName::Identifier { name: name.into() },
        optional: false,
        readonly: true,
        ty: Some(ty),
        span: Span::default(),
    })
}

/// `readonly name?: T`
pub fn optional_prop(name: &str, ty: TypeNode) -> TypeMember {
    TypeMember::Property(PropertySignature {
        name: PropertyName::Identifier { name: name.into() },
        optional: true,
        readonly: true,
        ty: Some(ty),
        span: Span::default(),
    })
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

pub fn block(statements: Vec<Stmt>) -> Block {
    Block {
        statements,
        span: Span::default(),
    }
}

pub fn block_stmt(statements: Vec<Stmt>) -> Stmt {
    Stmt::Block(block(statements))
}

pub fn ret(value: Expr) -> Stmt {
    Stmt::Return(ReturnStmt {
        value: Some(value),
        span: Span::default(),
    })
}

pub fn ret_void() -> Stmt {
    Stmt::Return(ReturnStmt {
        value: None,
        span: Span::default(),
    })
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(ExprStmt {
        expr,
        span: Span::default(),
    })
}

fn var(kind: VarKind, name: &str, ty: Option<TypeNode>, init: Expr) -> VarDecl {
    VarDecl {
        kind,
        declarations: vec![VarDeclarator {
            name: Binding::Identifier(Ident::new(name, Span::default())),
            ty,
            init: Some(init),
            span: Span::default(),
        }],
        span: Span::default(),
    }
}

/// `const name = init`
pub fn const_decl(name: &str, init: Expr) -> Stmt {
    Stmt::Variable(var(VarKind::Const, name, None, init))
}

/// `let name: T = init`
pub fn let_decl(name: &str, ty: Option<TypeNode>, init: Expr) -> Stmt {
    Stmt::Variable(var(VarKind::Let, name, ty, init))
}

pub fn if_stmt(condition: Expr, then_branch: Vec<Stmt>, else_branch: Option<Stmt>) -> Stmt {
    Stmt::If(IfStmt {
        condition,
        then_branch: Box::new(block_stmt(then_branch)),
        else_branch: else_branch.map(Box::new),
        span: Span::default(),
    })
}

/// `for (let name = start; condition; increment) { body }`
pub fn for_stmt(
    name: &str,
    start: Expr,
    condition: Option<Expr>,
    increment: Option<Expr>,
    body: Vec<Stmt>,
) -> Stmt {
    Stmt::For(ForStmt {
        init: Some(ForInit::Variable(var(VarKind::Let, name, None, start))),
        condition,
        increment,
        body: Box::new(block_stmt(body)),
        span: Span::default(),
    })
}

pub fn other_stmt(construct: &str) -> Stmt {
    Stmt::Other {
        construct: construct.into(),
        span: Span::default(),
    }
}

/// Place a statement on a source line.
pub fn at_line(mut stmt: Stmt, line: u32) -> Stmt {
    let span = Span::new(line, 1, line, 1);
    match &mut stmt {
        Stmt::Block(b) => b.span = span,
        Stmt::If(s) => s.span = span,
        Stmt::For(s) => s.span = span,
        Stmt::Variable(v) => v.span = span,
        Stmt::Return(r) => r.span = span,
        Stmt::Expr(e) => e.span = span,
        Stmt::Function(f) => f.span = span,
        Stmt::Other { span: s, .. } => *s = span,
    }
    stmt
}

// ══════════════════════════════════════════════════════════════════════════════
// Declarations
// ══════════════════════════════════════════════════════════════════════════════

pub fn param(name: &str, ty: TypeNode) -> Param {
    Param {
        name: Binding::Identifier(Ident::new(name, Span::default())),
        ty: Some(ty),
        optional: false,
        rest: false,
        span: Span::default(),
    }
}

/// Non-exported `function name(params): ret { body }`
pub fn func(name: &str, params: Vec<Param>, ret: TypeNode, body: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl {
        name: Some(Ident::new(name, Span::default())),
        exported: false,
        is_async: false,
        params,
        return_type: Some(ret),
        body: Some(block(body)),
        span: Span::default(),
    }
}

/// `export function ...`
pub fn export(mut f: FunctionDecl) -> FunctionDecl {
    f.exported = true;
    f
}

pub fn function_item(f: FunctionDecl) -> Item {
    Item::Function(f)
}

/// `export type name = ty`
pub fn type_alias(name: &str, ty: TypeNode) -> Item {
    Item::TypeAlias(TypeAliasDecl {
        name: Ident::new(name, Span::default()),
        exported: true,
        ty,
        span: Span::default(),
    })
}

/// `import * as alias from "source"`
pub fn import_ns(alias: &str, source: &str) -> Item {
    Item::Import(ImportDecl {
        default: None,
        bindings: Some(ImportBindings::Namespace {
            alias: Ident::new(alias, Span::default()),
        }),
        source: source.into(),
        span: Span::default(),
    })
}

/// `import { names } from "source"`
pub fn import_named(names: &[&str], source: &str) -> Item {
    Item::Import(ImportDecl {
        default: None,
        bindings: Some(ImportBindings::Named {
            names: names
                .iter()
                .map(|n| Ident::new(*n, Span::default()))
                .collect(),
        }),
        source: source.into(),
        span: Span::default(),
    })
}

pub fn module(file_name: &str, items: Vec<Item>) -> Module {
    Module {
        file_name: file_name.into(),
        items,
        source: None,
        span: Span::default(),
    }
}
