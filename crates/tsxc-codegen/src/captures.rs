//! Free-variable analysis for generated closures.
//!
//! `Element` closures are `Fn`, so a closure created inside another closure
//! cannot move the outer closure's captures. Such closures are emitted after
//! a block of `let x = x.clone();` lines for every variable they read.
//!
//! A closure at function level moves its captures, unless the variable is
//! shared: read more than once in the function, or read inside a loop. Shared
//! captures are cloned as well.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tsxc_types::ast::*;

use crate::context::Context;
use crate::text::{indent_tail, rust_ident};

#[derive(Default)]
struct Collector {
    /// Variable → number of reads.
    used: BTreeMap<String, usize>,
    bound: HashSet<String>,
    /// Variables read inside a loop.
    looped: BTreeSet<String>,
    loop_depth: usize,
}

impl Collector {
    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Identifier { name } => {
                *self.used.entry(name.clone()).or_default() += 1;
                if self.loop_depth > 0 {
                    self.looped.insert(name.clone());
                }
            }
            ExprKind::Array { elements } => elements.iter().for_each(|e| self.expr(e)),
            ExprKind::Template { expressions, .. } => expressions.iter().for_each(|e| self.expr(e)),
            ExprKind::Unary { operand, .. } => self.expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.expr(left);
                self.expr(right);
            }
            ExprKind::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.expr(condition);
                self.expr(when_true);
                self.expr(when_false);
            }
            ExprKind::Property { object, .. } => self.expr(object),
            ExprKind::Index { object, index } => {
                self.expr(object);
                self.expr(index);
            }
            ExprKind::Call { callee, args } => {
                // Bare callees are function items.
                if !matches!(callee.kind, ExprKind::Identifier { .. }) {
                    self.expr(callee);
                }
                args.iter().for_each(|a| self.expr(a));
            }
            ExprKind::New { args, .. } => args.iter().for_each(|a| self.expr(a)),
            ExprKind::Await { operand } => self.expr(operand),
            ExprKind::Paren { inner } => self.expr(inner),
            ExprKind::Arrow { params, body, .. } => {
                for p in params {
                    if let Binding::Identifier(id) = &p.name {
                        self.bound.insert(id.name.clone());
                    }
                }
                match body {
                    ArrowBody::Expr(e) => self.expr(e),
                    ArrowBody::Block(b) => b.statements.iter().for_each(|s| self.stmt(s)),
                }
            }
            ExprKind::Markup { markup } => self.markup(markup),
            ExprKind::Number { .. }
            | ExprKind::String { .. }
            | ExprKind::Bool { .. }
            | ExprKind::Null
            | ExprKind::Undefined
            | ExprKind::Other { .. } => {}
        }
    }

    fn markup(&mut self, markup: &Markup) {
        if let Markup::Element { attributes, .. } = markup {
            for attr in attributes {
                match attr {
                    Attribute::Named {
                        value: Some(AttrValue::Expression { expr }),
                        ..
                    } => self.expr(expr),
                    Attribute::Spread { expr, .. } => self.expr(expr),
                    Attribute::Named { .. } => {}
                }
            }
        }
        for child in markup.children() {
            match child {
                MarkupChild::Expression { expr: Some(e), .. } => self.expr(e),
                MarkupChild::Markup { markup } => self.markup(markup),
                MarkupChild::Expression { expr: None, .. } | MarkupChild::Text { .. } => {}
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(b) => b.statements.iter().for_each(|s| self.stmt(s)),
            Stmt::If(s) => {
                self.expr(&s.condition);
                self.stmt(&s.then_branch);
                if let Some(e) = &s.else_branch {
                    self.stmt(e);
                }
            }
            Stmt::For(s) => {
                self.loop_depth += 1;
                match &s.init {
                    Some(ForInit::Variable(v)) => self.var(v),
                    Some(ForInit::Expr(e)) => self.expr(e),
                    None => {}
                }
                if let Some(c) = &s.condition {
                    self.expr(c);
                }
                if let Some(i) = &s.increment {
                    self.expr(i);
                }
                self.stmt(&s.body);
                self.loop_depth -= 1;
            }
            Stmt::Variable(v) => self.var(v),
            Stmt::Return(r) => {
                if let Some(v) = &r.value {
                    self.expr(v);
                }
            }
            Stmt::Expr(e) => self.expr(&e.expr),
            Stmt::Function(f) => {
                if let Some(name) = &f.name {
                    self.bound.insert(name.name.clone());
                }
            }
            Stmt::Other { .. } => {}
        }
    }

    fn var(&mut self, decl: &VarDecl) {
        for d in &decl.declarations {
            if let Binding::Identifier(id) = &d.name {
                self.bound.insert(id.name.clone());
            }
            if let Some(init) = &d.init {
                self.expr(init);
            }
        }
    }

    fn finish(self, ctx: &Context) -> Vec<String> {
        let Collector { used, bound, .. } = self;
        used.into_keys()
            .filter(|name| !bound.contains(name) && !ctx.is_alias(name))
            .collect()
    }
}

/// Variables of a function body that a function-level closure must clone
/// rather than move.
pub(crate) fn shared_captures(statements: &[Stmt]) -> BTreeSet<String> {
    let mut c = Collector::default();
    statements.iter().for_each(|s| c.stmt(s));
    let Collector { used, looped, .. } = c;
    used.into_iter()
        .filter(|(_, reads)| *reads > 1)
        .map(|(name, _)| name)
        .chain(looped)
        .collect()
}

/// Variables read by `markup`, in sorted order.
pub(crate) fn markup_captures(markup: &Markup, ctx: &Context) -> Vec<String> {
    let mut c = Collector::default();
    c.markup(markup);
    c.finish(ctx)
}

/// Variables read by an arrow function, excluding its own parameters.
pub(crate) fn expr_captures(expr: &Expr, ctx: &Context) -> Vec<String> {
    let mut c = Collector::default();
    c.expr(expr);
    c.finish(ctx)
}

/// Prefix `closure` with clones of the captures it may not move: all of them
/// inside another closure, the shared ones at function level.
pub(crate) fn with_captures(closure: String, captures: &[String], ctx: &Context) -> String {
    let cloned: Vec<&String> = captures
        .iter()
        .filter(|name| ctx.in_closure || ctx.shared.contains(*name))
        .collect();
    if cloned.is_empty() {
        return closure;
    }
    let mut out = String::from("{\n");
    for name in cloned {
        let ident = rust_ident(name);
        out.push_str(&format!("    let {ident} = {ident}.clone();\n"));
    }
    out.push_str("    ");
    out.push_str(&indent_tail(&closure, 4));
    out.push_str("\n}");
    out
}
