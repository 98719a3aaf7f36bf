//! Expression compiler.
//!
//! Every expression is compiled under a [`RenderMode`]; operands of a
//! non-markup node are compiled under [`RenderMode::for_operands`]. Embedded
//! markup is handed to [`crate::markup`].

use tsxc_types::ast::*;
use tsxc_types::ErrorCode;

use crate::captures::{expr_captures, with_captures};
use crate::code_writer::CodeWriter;
use crate::context::{Context, RenderMode};
use crate::error::{unsupported, CodegenError, CodegenResult};
use crate::markup::compile_markup;
use crate::stmt::emit_stmt;
use crate::text::{format_literal, indent_tail, rust_ident, rust_string};
use crate::types::compile_type;

/// Compile an expression to Rust text.
pub fn compile_expr(expr: &Expr, mode: RenderMode, ctx: &Context) -> CodegenResult<String> {
    let inner = mode.for_operands();
    match &expr.kind {
        ExprKind::Number { text } => Ok(number_literal(text)),
        ExprKind::String { value } => Ok(rust_string(value)),
        ExprKind::Bool { value } => Ok(value.to_string()),
        ExprKind::Null | ExprKind::Undefined => Ok("None".to_string()),
        ExprKind::Identifier { name } => Ok(rust_ident(name)),
        ExprKind::Array { elements } => {
            let items = elements
                .iter()
                .map(|e| compile_expr(e, inner, ctx))
                .collect::<CodegenResult<Vec<_>>>()?;
            Ok(list("vec![", &items, "]"))
        }
        ExprKind::Template { quasis, expressions } => {
            let mut fmt = Format::default();
            fmt.template(quasis, expressions, inner, ctx)?;
            Ok(fmt.finish())
        }
        ExprKind::Unary {
            op,
            operand,
            prefix,
        } => compile_unary(expr, *op, operand, *prefix, inner, ctx),
        ExprKind::Binary { left, op, right } => compile_binary(expr, left, *op, right, inner, ctx),
        ExprKind::Conditional {
            condition,
            when_true,
            when_false,
        } => compile_conditional(condition, when_true, when_false, inner, ctx),
        ExprKind::Property {
            object,
            name,
            optional,
        } => {
            if *optional {
                let object = operand(object, inner, ctx)?;
                return Ok(format!(
                    "{object}.as_ref().map(|it| it.{}.clone())",
                    rust_ident(&name.name)
                ));
            }
            if let ExprKind::Identifier { name: alias } = &object.kind {
                if ctx.is_alias(alias) {
                    return Ok(format!("{}::{}", rust_ident(alias), rust_ident(&name.name)));
                }
            }
            Ok(format!("{}.{}", operand(object, inner, ctx)?, rust_ident(&name.name)))
        }
        ExprKind::Index { object, index } => {
            let object = operand(object, inner, ctx)?;
            let idx = compile_expr(index, inner, ctx)?;
            Ok(match &index.kind {
                ExprKind::Number { .. } => format!("{object}[{idx}]"),
                _ if is_atomic(index) => format!("{object}[{idx} as usize]"),
                _ => format!("{object}[({idx}) as usize]"),
            })
        }
        ExprKind::Call { callee, args } => compile_call(callee, args, inner, ctx),
        ExprKind::New { callee, args } => {
            let path = compile_expr(callee, RenderMode::Forbidden, ctx)?;
            Ok(format!("{path}::new({})", arguments(args, inner, ctx)?))
        }
        ExprKind::Await { operand: awaited } => {
            Ok(format!("{}.await", operand(awaited, inner, ctx)?))
        }
        ExprKind::Paren { inner: wrapped } => Ok(format!("({})", compile_expr(wrapped, mode, ctx)?)),
        ExprKind::Arrow {
            params,
            return_type,
            body,
            is_async,
        } => compile_arrow(expr, params, return_type.as_ref(), body, *is_async, ctx),
        ExprKind::Markup { markup } => compile_markup(markup, mode, ctx),
        ExprKind::Other { construct } => Err(unsupported(construct, construct, expr.span)),
    }
}

/// Compile a condition: statically boolean expressions are used directly,
/// anything else goes through `is_truthy`.
pub fn compile_test(expr: &Expr, mode: RenderMode, ctx: &Context) -> CodegenResult<String> {
    let code = compile_expr(expr, mode, ctx)?;
    if ctx.oracle.is_boolean(expr) {
        Ok(match expr.kind {
            ExprKind::Conditional { .. } | ExprKind::Arrow { .. } => format!("({code})"),
            _ => code,
        })
    } else {
        Ok(format!("is_truthy({})", borrowed(expr, &code)))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Classification
// ══════════════════════════════════════════════════════════════════════════════

/// Whether the compiled form can be used as an operand without parentheses.
pub(crate) fn is_atomic(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Number { text } => !text.starts_with('-'),
        ExprKind::String { .. }
        | ExprKind::Bool { .. }
        | ExprKind::Null
        | ExprKind::Undefined
        | ExprKind::Identifier { .. }
        | ExprKind::Array { .. }
        | ExprKind::Template { .. }
        | ExprKind::Property { .. }
        | ExprKind::Index { .. }
        | ExprKind::Call { .. }
        | ExprKind::New { .. }
        | ExprKind::Await { .. }
        | ExprKind::Paren { .. }
        | ExprKind::Markup { .. } => true,
        ExprKind::Unary { .. }
        | ExprKind::Binary { .. }
        | ExprKind::Conditional { .. }
        | ExprKind::Arrow { .. }
        | ExprKind::Other { .. } => false,
    }
}

/// Whether the expression names existing storage, which must be cloned to
/// be passed by value.
pub(crate) fn is_place(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Identifier { .. } | ExprKind::Index { .. } => true,
        ExprKind::Property { optional, .. } => !optional,
        ExprKind::Paren { inner } => is_place(inner),
        _ => false,
    }
}

/// `&x`, or `&(x)` when `x` is not atomic.
pub(crate) fn borrowed(expr: &Expr, code: &str) -> String {
    if is_atomic(expr) {
        format!("&{code}")
    } else {
        format!("&({code})")
    }
}

/// Conversion of a compiled value into a props field: places are cloned.
pub(crate) fn into_value(expr: &Expr, code: &str) -> String {
    if is_place(expr) {
        format!("{code}.clone().into()")
    } else if is_atomic(expr) {
        format!("{code}.into()")
    } else {
        format!("({code}).into()")
    }
}

fn operand(expr: &Expr, mode: RenderMode, ctx: &Context) -> CodegenResult<String> {
    let code = compile_expr(expr, mode, ctx)?;
    Ok(if is_atomic(expr) { code } else { format!("({code})") })
}

/// Operand of a binary operator: nested operators are parenthesized.
fn binary_operand(expr: &Expr, mode: RenderMode, ctx: &Context) -> CodegenResult<String> {
    let code = compile_expr(expr, mode, ctx)?;
    Ok(match expr.kind {
        ExprKind::Binary { .. } | ExprKind::Conditional { .. } | ExprKind::Arrow { .. } => {
            format!("({code})")
        }
        _ => code,
    })
}

fn is_null(expr: &Expr) -> bool {
    matches!(expr.unparenthesized().kind, ExprKind::Null | ExprKind::Undefined)
}

// ══════════════════════════════════════════════════════════════════════════════
// Literals
// ══════════════════════════════════════════════════════════════════════════════

/// `.5` → `0.5`, `5.` → `5.0`, `10n` → `10`
fn number_literal(text: &str) -> String {
    let text = text.strip_suffix('n').unwrap_or(text);
    let mut out = text.to_string();
    if out.starts_with('.') {
        out.insert(0, '0');
    }
    if out.ends_with('.') {
        out.push('0');
    }
    out
}

/// Join items on one line, or one per line when any of them spans lines.
pub(crate) fn list(open: &str, items: &[String], close: &str) -> String {
    if items.iter().any(|i| i.contains('\n')) {
        let mut out = format!("{open}\n");
        for item in items {
            out.push_str(&format!("    {},\n", indent_tail(item, 4)));
        }
        out.push_str(close);
        out
    } else {
        format!("{open}{}{close}", items.join(", "))
    }
}

/// Builder for a `format!` call.
///
/// Holes go through the runtime's `display`, which formats any operand the
/// way JavaScript stringifies it and only borrows it.
#[derive(Default)]
struct Format {
    fmt: String,
    args: Vec<String>,
}

impl Format {
    fn literal(&mut self, text: &str) {
        self.fmt.push_str(&format_literal(text));
    }

    fn hole(&mut self, expr: &Expr, mode: RenderMode, ctx: &Context) -> CodegenResult<()> {
        let code = compile_expr(expr, mode, ctx)?;
        self.fmt.push_str("{}");
        self.args.push(match expr.kind {
            ExprKind::Number { .. } => code,
            _ => format!("display({})", borrowed(expr, &code)),
        });
        Ok(())
    }

    fn template(
        &mut self,
        quasis: &[String],
        expressions: &[Expr],
        mode: RenderMode,
        ctx: &Context,
    ) -> CodegenResult<()> {
        for (i, quasi) in quasis.iter().enumerate() {
            self.literal(quasi);
            if let Some(e) = expressions.get(i) {
                self.hole(e, mode, ctx)?;
            }
        }
        Ok(())
    }

    /// One leaf of a string concatenation.
    fn part(&mut self, expr: &Expr, mode: RenderMode, ctx: &Context) -> CodegenResult<()> {
        match &expr.kind {
            ExprKind::String { value } => self.literal(value),
            ExprKind::Template {
                quasis,
                expressions,
            } => self.template(quasis, expressions, mode, ctx)?,
            ExprKind::Binary {
                left,
                op: BinOp::Add,
                right,
            } if is_string_concat(expr, ctx) => {
                self.part(left, mode, ctx)?;
                self.part(right, mode, ctx)?;
            }
            ExprKind::Paren { inner } if is_string_concat(inner, ctx) => self.part(inner, mode, ctx)?,
            _ => self.hole(expr, mode, ctx)?,
        }
        Ok(())
    }

    fn finish(self) -> String {
        let mut items = vec![format!("\"{}\"", self.fmt)];
        items.extend(self.args);
        list("format!(", &items, ")")
    }
}

/// `a + b` where either side is statically a string.
fn is_string_concat(expr: &Expr, ctx: &Context) -> bool {
    match &expr.kind {
        ExprKind::Binary {
            left,
            op: BinOp::Add,
            right,
        } => ctx.oracle.is_string(left) || ctx.oracle.is_string(right),
        _ => false,
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

fn unsupported_operator(node: &Expr, op: &str) -> CodegenError {
    CodegenError::new(
        ErrorCode::UNSUPPORTED_OPERATOR,
        node.kind_name(),
        format!("Unsupported operator `{op}`."),
        node.span,
    )
}

fn compile_unary(
    node: &Expr,
    op: UnaryOp,
    operand_expr: &Expr,
    prefix: bool,
    mode: RenderMode,
    ctx: &Context,
) -> CodegenResult<String> {
    match op {
        UnaryOp::Not if ctx.oracle.is_boolean(operand_expr) => {
            Ok(format!("!{}", binary_operand(operand_expr, mode, ctx)?))
        }
        UnaryOp::Not => {
            let code = compile_expr(operand_expr, mode, ctx)?;
            Ok(format!("!is_truthy({})", borrowed(operand_expr, &code)))
        }
        UnaryOp::Neg => Ok(format!("-{}", binary_operand(operand_expr, mode, ctx)?)),
        UnaryOp::BitNot => Ok(format!("!{}", binary_operand(operand_expr, mode, ctx)?)),
        UnaryOp::Increment | UnaryOp::Decrement => {
            let target = compile_expr(operand_expr, mode, ctx)?;
            let step = if op == UnaryOp::Increment { "+=" } else { "-=" };
            Ok(if prefix {
                format!("{{ {target} {step} 1; {target} }}")
            } else {
                format!("{{ let prev = {target}; {target} {step} 1; prev }}")
            })
        }
        UnaryOp::Plus | UnaryOp::Typeof | UnaryOp::Void | UnaryOp::Delete => {
            Err(unsupported_operator(node, op.as_str()))
        }
    }
}

fn compile_binary(
    node: &Expr,
    left: &Expr,
    op: BinOp,
    right: &Expr,
    mode: RenderMode,
    ctx: &Context,
) -> CodegenResult<String> {
    match op {
        BinOp::Exp
        | BinOp::UShr
        | BinOp::ExpAssign
        | BinOp::UShrAssign
        | BinOp::AndAssign
        | BinOp::OrAssign
        | BinOp::NullishAssign
        | BinOp::Comma
        | BinOp::In
        | BinOp::Instanceof => Err(unsupported_operator(node, op.as_str())),

        BinOp::And | BinOp::Or => {
            if ctx.oracle.is_boolean(left) && ctx.oracle.is_boolean(right) {
                return Ok(format!(
                    "{} {} {}",
                    binary_operand(left, mode, ctx)?,
                    op.as_str(),
                    binary_operand(right, mode, ctx)?
                ));
            }
            let lhs = compile_expr(left, mode, ctx)?;
            let rhs = compile_expr(right, mode, ctx)?;
            let rhs = if is_place(right) { format!("&{rhs}") } else { rhs };
            let helper = if op == BinOp::And { "and" } else { "or" };
            let call = format!("{helper}({}, || {rhs})", borrowed(left, &lhs));
            Ok(call)
        }

        BinOp::Nullish => {
            let lhs = operand(left, mode, ctx)?;
            let rhs = compile_expr(right, mode, ctx)?;
            let rhs = if is_atomic(right) {
                format!("{rhs}.into()")
            } else {
                format!("({rhs}).into()")
            };
            Ok(format!("{lhs}.clone().unwrap_or_else(|| {rhs})"))
        }

        BinOp::Add if is_string_concat(node, ctx) => {
            let mut fmt = Format::default();
            fmt.part(node, mode, ctx)?;
            Ok(fmt.finish())
        }

        _ => {
            let token = match op {
                BinOp::StrictEq | BinOp::LooseEq => "==",
                BinOp::StrictNotEq | BinOp::LooseNotEq => "!=",
                other => other.as_str(),
            };
            Ok(format!(
                "{} {token} {}",
                binary_operand(left, mode, ctx)?,
                binary_operand(right, mode, ctx)?
            ))
        }
    }
}

fn compile_conditional(
    condition: &Expr,
    when_true: &Expr,
    when_false: &Expr,
    mode: RenderMode,
    ctx: &Context,
) -> CodegenResult<String> {
    let test = compile_test(condition, mode, ctx)?;
    let mut yes = compile_expr(when_true, mode, ctx)?;
    let mut no = compile_expr(when_false, mode, ctx)?;
    // `c ? <b/> : null` yields an `Option`.
    match (is_null(when_true), is_null(when_false)) {
        (true, false) => no = format!("Some({no})"),
        (false, true) => yes = format!("Some({yes})"),
        _ => {}
    }
    if yes.contains('\n') || no.contains('\n') {
        Ok(format!(
            "if {test} {{\n    {}\n}} else {{\n    {}\n}}",
            indent_tail(&yes, 4),
            indent_tail(&no, 4)
        ))
    } else {
        Ok(format!("if {test} {{ {yes} }} else {{ {no} }}"))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Calls & Functions
// ══════════════════════════════════════════════════════════════════════════════

/// Call arguments; fields and elements are cloned so they are not moved out.
fn arguments(args: &[Expr], mode: RenderMode, ctx: &Context) -> CodegenResult<String> {
    let items = args
        .iter()
        .map(|a| {
            let code = compile_expr(a, mode, ctx)?;
            Ok(match a.unparenthesized().kind {
                ExprKind::Property { optional: false, .. } | ExprKind::Index { .. } => {
                    format!("{code}.clone()")
                }
                _ => code,
            })
        })
        .collect::<CodegenResult<Vec<_>>>()?;
    Ok(list("", &items, ""))
}

fn compile_call(callee: &Expr, args: &[Expr], mode: RenderMode, ctx: &Context) -> CodegenResult<String> {
    let args = arguments(args, mode, ctx)?;
    if let ExprKind::Property {
        object,
        name,
        optional: true,
    } = &callee.kind
    {
        let object = operand(object, mode, ctx)?;
        return Ok(format!(
            "{object}.as_ref().map(|it| it.{}({args}))",
            rust_ident(&name.name)
        ));
    }
    Ok(format!("{}({args})", operand(callee, mode, ctx)?))
}

fn arrow_params(params: &[Param]) -> CodegenResult<Vec<String>> {
    params
        .iter()
        .map(|p| {
            let Binding::Identifier(id) = &p.name else {
                return Err(CodegenError::new(
                    ErrorCode::DESTRUCTURING,
                    "parameter",
                    "Destructuring parameters are not supported.",
                    p.span,
                ));
            };
            if p.rest {
                return Err(unsupported("parameter", "rest parameter", p.span));
            }
            let name = rust_ident(&id.name);
            Ok(match &p.ty {
                Some(ty) => format!("{name}: {}", compile_type(ty)?),
                None => name,
            })
        })
        .collect()
}

fn compile_arrow(
    node: &Expr,
    params: &[Param],
    return_type: Option<&TypeNode>,
    body: &ArrowBody,
    is_async: bool,
    ctx: &Context,
) -> CodegenResult<String> {
    if is_async {
        return Err(unsupported("arrow", "async arrow function", node.span));
    }
    let params = arrow_params(params)?.join(", ");
    let inner = ctx.in_function(false).nested();

    let closure = match body {
        ArrowBody::Expr(e) => {
            format!("move |{params}| {}", compile_expr(e, RenderMode::Deferred, &inner)?)
        }
        ArrowBody::Block(block) => {
            let ret = match return_type {
                Some(ty) => format!(" -> {}", compile_type(ty)?),
                None => String::new(),
            };
            let mut out = CodeWriter::new();
            out.line(&format!("move |{params}|{ret} {{"));
            out.indented(|out| {
                block
                    .statements
                    .iter()
                    .try_for_each(|s| emit_stmt(s, &inner, out))
            })?;
            out.line("}");
            out.finish().trim_end().to_string()
        }
    };
    Ok(with_captures(closure, &expr_captures(node, ctx), ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CompileOptions, ComponentTable};
    use std::collections::HashSet;
    use tsxc_types::builder::*;
    use tsxc_types::EmbeddedFacts;

    fn compile_with(e: &Expr, aliases: &[&str]) -> CodegenResult<String> {
        let oracle = EmbeddedFacts;
        let table = ComponentTable::new();
        let aliases: HashSet<String> = aliases.iter().map(|a| a.to_string()).collect();
        let options = CompileOptions::default();
        let ctx = Context::new(&oracle, "A.tsx", &table, &aliases, &options);
        compile_expr(e, RenderMode::Deferred, &ctx)
    }

    fn compile(e: Expr) -> String {
        compile_with(&e, &[]).unwrap()
    }

    fn error(e: Expr) -> ErrorCode {
        compile_with(&e, &[]).unwrap_err().code
    }

    #[test]
    fn literals() {
        assert_eq!(compile(num(".5")), "0.5");
        assert_eq!(compile(num("5.")), "5.0");
        assert_eq!(compile(num("10n")), "10");
        assert_eq!(compile(num("0xff")), "0xff");
        assert_eq!(compile(string("it's \"x\"")), r#""it's \"x\"""#);
        assert_eq!(compile(null()), "None");
        assert_eq!(compile(undefined()), "None");
        assert_eq!(compile(ident("type")), "r#type");
        assert_eq!(compile(array(vec![num("1"), num("2")])), "vec![1, 2]");
    }

    #[test]
    fn non_boolean_logic_uses_helpers() {
        assert_eq!(compile(binary(ident("x"), BinOp::And, ident("z"))), "and(&x, || &z)");
        assert_eq!(
            compile(binary(prop(ident("props"), "name"), BinOp::Or, string("anon"))),
            "or(&props.name, || \"anon\")"
        );
        assert_eq!(
            compile(binary(binary(ident("a"), BinOp::Add, num("1")), BinOp::And, num("0"))),
            "and(&(a + 1), || 0)"
        );
    }

    #[test]
    fn boolean_logic_is_native() {
        assert_eq!(
            compile(binary(bool_ident("a"), BinOp::And, bool_ident("b"))),
            "a && b"
        );
        assert_eq!(
            compile(binary(
                binary(ident("x"), BinOp::StrictEq, num("1")),
                BinOp::Or,
                boolean(false)
            )),
            "(x == 1) || false"
        );
    }

    #[test]
    fn negation() {
        assert_eq!(compile(not(ident("items"))), "!is_truthy(&items)");
        assert_eq!(compile(not(bool_ident("open"))), "!open");
        assert_eq!(
            compile(not(binary(ident("a"), BinOp::StrictNotEq, ident("b")))),
            "!(a != b)"
        );
    }

    #[test]
    fn templates_and_concatenation() {
        assert_eq!(
            compile(template(&["Hello, ", "! {ok}"], vec![ident("name")])),
            r#"format!("Hello, {}! {{ok}}", display(&name))"#
        );
        assert_eq!(
            compile(binary(
                binary(string("a"), BinOp::Add, ident("b")),
                BinOp::Add,
                string("c")
            )),
            r#"format!("a{}c", display(&b))"#
        );
        assert_eq!(
            compile(binary(
                binary(ident("x"), BinOp::Add, num("1")),
                BinOp::Add,
                string("!")
            )),
            r#"format!("{}!", display(&(x + 1)))"#
        );
        assert_eq!(compile(template(&["", "px"], vec![num("12")])), r#"format!("{}px", 12)"#);
    }

    #[test]
    fn typed_string_operands_concatenate_with_format() {
        assert_eq!(
            compile(binary(
                string_prop(ident("props"), "first"),
                BinOp::Add,
                string_prop(ident("props"), "last")
            )),
            r#"format!("{}{}", display(&props.first), display(&props.last))"#
        );
        // Without type facts, `+` stays arithmetic.
        assert_eq!(compile(binary(ident("a"), BinOp::Add, ident("b"))), "a + b");
    }

    #[test]
    fn optional_template_holes_are_displayed() {
        assert_eq!(
            compile(template(&["Hi ", ""], vec![nullable_ident("name")])),
            r#"format!("Hi {}", display(&name))"#
        );
    }

    #[test]
    fn nullish_coalescing() {
        assert_eq!(
            compile(binary(ident("title"), BinOp::Nullish, string("Home"))),
            r#"title.clone().unwrap_or_else(|| "Home".into())"#
        );
    }

    #[test]
    fn increments() {
        assert_eq!(compile(unary(UnaryOp::Increment, ident("i"))), "{ i += 1; i }");
        assert_eq!(
            compile(postfix(UnaryOp::Decrement, ident("i"))),
            "{ let prev = i; i -= 1; prev }"
        );
    }

    #[test]
    fn conditionals() {
        assert_eq!(
            compile(cond(bool_ident("ok"), string("yes"), string("no"))),
            r#"if ok { "yes" } else { "no" }"#
        );
        assert_eq!(
            compile(cond(ident("count"), ident("count"), null())),
            "if is_truthy(&count) { Some(count) } else { None }"
        );
    }

    #[test]
    fn member_access() {
        assert_eq!(compile(opt_prop(ident("user"), "name")), "user.as_ref().map(|it| it.name.clone())");
        assert_eq!(
            compile(call(opt_prop(ident("user"), "greet"), vec![string("hi")])),
            r#"user.as_ref().map(|it| it.greet("hi"))"#
        );
        assert_eq!(compile(index(ident("items"), num("0"))), "items[0]");
        assert_eq!(compile(index(ident("items"), ident("i"))), "items[i as usize]");
        assert_eq!(
            compile_with(&call(prop(ident("T"), "helper"), vec![]), &["T"]).unwrap(),
            "T::helper()"
        );
    }

    #[test]
    fn calls_clone_fields() {
        assert_eq!(
            compile(call(ident("show"), vec![prop(ident("props"), "title"), ident("n")])),
            "show(props.title.clone(), n)"
        );
        assert_eq!(compile(new_expr(ident("Date"), vec![])), "Date::new()");
        assert_eq!(compile(await_expr(call(ident("load"), vec![]))), "load().await");
    }

    #[test]
    fn arrows() {
        assert_eq!(
            compile(arrow(vec![param("n", ty_ref("int"))], binary(ident("n"), BinOp::Mul, num("2")))),
            "move |n: i32| n * 2"
        );
        assert_eq!(
            compile(arrow_block(vec![], vec![ret(num("1"))])),
            "move || {\n    return 1;\n}"
        );
    }

    #[test]
    fn unsupported_operators() {
        assert_eq!(error(unary(UnaryOp::Typeof, ident("x"))), ErrorCode::UNSUPPORTED_OPERATOR);
        assert_eq!(error(binary(ident("a"), BinOp::Exp, num("2"))), ErrorCode::UNSUPPORTED_OPERATOR);
        assert_eq!(error(binary(ident("a"), BinOp::UShr, num("2"))), ErrorCode::UNSUPPORTED_OPERATOR);
        assert_eq!(error(binary(ident("a"), BinOp::Comma, num("2"))), ErrorCode::UNSUPPORTED_OPERATOR);
        assert_eq!(error(other_expr("object")), ErrorCode::UNSUPPORTED_CONSTRUCT);
    }

    #[test]
    fn markup_is_forbidden_in_attribute_position() {
        let oracle = EmbeddedFacts;
        let table = ComponentTable::new();
        let aliases = HashSet::new();
        let options = CompileOptions::default();
        let ctx = Context::new(&oracle, "A.tsx", &table, &aliases, &options);
        let e = binary(ident("x"), BinOp::And, markup(element("b", vec![], vec![])));
        let err = compile_expr(&e, RenderMode::Forbidden, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::MARKUP_NOT_ALLOWED_HERE);
    }
}
