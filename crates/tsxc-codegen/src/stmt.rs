//! Statement compiler: function declarations and their bodies.

use tsxc_types::ast::*;
use tsxc_types::{ErrorCode, Span};

use crate::captures::shared_captures;
use crate::code_writer::CodeWriter;
use crate::context::{Context, RenderMode};
use crate::error::{unsupported, CodegenError, CodegenResult};
use crate::expr::{compile_expr, compile_test};
use crate::text::{rust_ident, rust_string};
use crate::types::{compile_type, ensure_nullable, is_nullable_type, is_void, promise_inner};

// ══════════════════════════════════════════════════════════════════════════════
// Functions
// ══════════════════════════════════════════════════════════════════════════════

fn missing_annotation(node: &str, message: impl Into<String>, span: Span) -> CodegenError {
    CodegenError::new(ErrorCode::MISSING_ANNOTATION, node, message, span)
}

/// Emit a function declaration as a Rust `fn` item.
///
/// Nested declarations are never `pub`.
pub fn emit_function(
    decl: &FunctionDecl,
    ctx: &Context,
    out: &mut CodeWriter,
    nested: bool,
) -> CodegenResult<()> {
    let Some(name) = &decl.name else {
        return Err(missing_annotation(
            "function",
            "Function declarations must be named.",
            decl.span,
        ));
    };
    if name.name.starts_with("op_") {
        return Err(CodegenError::new(
            ErrorCode::OPERATOR_OVERLOAD,
            "function",
            format!("Operator overload `{}` is not supported.", name.name),
            name.span,
        ));
    }
    let Some(return_type) = &decl.return_type else {
        return Err(missing_annotation(
            "function",
            format!("Function `{}` must declare its return type.", name.name),
            decl.span,
        ));
    };
    let Some(body) = &decl.body else {
        return Err(missing_annotation(
            "function",
            format!("Function `{}` must have a body.", name.name),
            decl.span,
        ));
    };

    let params = decl
        .params
        .iter()
        .map(compile_param)
        .collect::<CodegenResult<Vec<_>>>()?
        .join(", ");

    let ret = match promise_inner(return_type) {
        Some(inner) if decl.is_async => inner,
        _ => return_type,
    };
    let returns = if is_void(ret) {
        None
    } else {
        Some(compile_type(ret)?)
    };
    let returns_option = returns.as_deref().is_some_and(|r| r.starts_with("Option<"));

    let vis = if decl.exported && !nested { "pub " } else { "" };
    let asyncness = if decl.is_async { "async " } else { "" };
    let arrow = match &returns {
        Some(ty) => format!(" -> {ty}"),
        None => String::new(),
    };
    out.line(&format!(
        "{vis}{asyncness}fn {}({params}){arrow} {{",
        rust_ident(&name.name)
    ));
    let shared = shared_captures(&body.statements);
    let inner = ctx.in_function(returns_option).sharing(&shared);
    out.indented(|out| {
        body.statements
            .iter()
            .try_for_each(|s| emit_stmt(s, &inner, out))
    })?;
    out.line("}");
    Ok(())
}

fn compile_param(param: &Param) -> CodegenResult<String> {
    let Binding::Identifier(id) = &param.name else {
        return Err(CodegenError::new(
            ErrorCode::DESTRUCTURING,
            "parameter",
            "Destructuring parameters are not supported; declare a props type instead.",
            param.span,
        ));
    };
    if param.rest {
        return Err(unsupported("parameter", "rest parameter", param.span));
    }
    let Some(ty) = &param.ty else {
        return Err(missing_annotation(
            "parameter",
            format!("Parameter `{}` must have an explicit type.", id.name),
            param.span,
        ));
    };
    let ty = compile_type(ty)?;
    let ty = if param.optional { ensure_nullable(ty) } else { ty };
    Ok(format!("{}: {ty}", rust_ident(&id.name)))
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// Emit one statement, preceded by its source-line marker.
pub fn emit_stmt(stmt: &Stmt, ctx: &Context, out: &mut CodeWriter) -> CodegenResult<()> {
    let span = stmt.span();
    if ctx.options.line_markers && span.is_known() {
        out.line(&format!(
            "//# line {} {}",
            span.start_line,
            rust_string(ctx.file_name)
        ));
    }

    match stmt {
        Stmt::Block(block) => {
            out.line("{");
            emit_block_body(block, ctx, out)?;
            out.line("}");
        }
        Stmt::If(s) => emit_if(s, ctx, out, "")?,
        Stmt::For(s) => emit_for(s, ctx, out)?,
        Stmt::Variable(decl) => {
            let line = compile_var(decl, ctx)?;
            out.line(&line);
        }
        Stmt::Return(r) => out.line(&compile_return(r, ctx)?),
        Stmt::Expr(s) => {
            let code = match update_statement(&s.expr, ctx)? {
                Some(code) => code,
                None => compile_expr(&s.expr, RenderMode::Deferred, ctx)?,
            };
            out.line(&format!("{code};"));
        }
        Stmt::Function(f) => emit_function(f, ctx, out, true)?,
        Stmt::Other { construct, span } => {
            return Err(unsupported(construct, format!("`{construct}` statement"), *span))
        }
    }
    Ok(())
}

fn emit_block_body(block: &Block, ctx: &Context, out: &mut CodeWriter) -> CodegenResult<()> {
    out.indented(|out| block.statements.iter().try_for_each(|s| emit_stmt(s, ctx, out)))
}

/// Statements of a branch body: a block is inlined, anything else nested.
fn emit_branch(stmt: &Stmt, ctx: &Context, out: &mut CodeWriter) -> CodegenResult<()> {
    match stmt {
        Stmt::Block(block) => emit_block_body(block, ctx, out),
        other => out.indented(|out| emit_stmt(other, ctx, out)),
    }
}

/// `if c { .. } else if d { .. } else { .. }`; `prefix` is `"} else "` for
/// chained branches.
fn emit_if(s: &IfStmt, ctx: &Context, out: &mut CodeWriter, prefix: &str) -> CodegenResult<()> {
    let test = compile_test(&s.condition, RenderMode::Forbidden, ctx)?;
    out.line(&format!("{prefix}if {test} {{"));
    emit_branch(&s.then_branch, ctx, out)?;
    match s.else_branch.as_deref() {
        Some(Stmt::If(next)) => emit_if(next, ctx, out, "} else ")?,
        Some(other) => {
            out.line("} else {");
            emit_branch(other, ctx, out)?;
            out.line("}");
        }
        None => out.line("}"),
    }
    Ok(())
}

/// `for (init; cond; incr) body` → a scoped `while` with the increment last.
fn emit_for(s: &ForStmt, ctx: &Context, out: &mut CodeWriter) -> CodegenResult<()> {
    out.line("{");
    out.indented(|out| {
        match &s.init {
            Some(ForInit::Variable(decl)) => out.line(&compile_var(decl, ctx)?),
            Some(ForInit::Expr(e)) => {
                out.line(&format!("{};", compile_expr(e, RenderMode::Forbidden, ctx)?))
            }
            None => {}
        }
        match &s.condition {
            Some(c) => out.line(&format!(
                "while {} {{",
                compile_test(c, RenderMode::Forbidden, ctx)?
            )),
            None => out.line("loop {"),
        }
        emit_branch(&s.body, ctx, out)?;
        if let Some(incr) = &s.increment {
            let code = match update_statement(incr, ctx)? {
                Some(code) => code,
                None => compile_expr(incr, RenderMode::Forbidden, ctx)?,
            };
            out.indented(|out| out.line(&format!("{code};")));
        }
        out.line("}");
        Ok::<_, CodegenError>(())
    })?;
    out.line("}");
    Ok(())
}

/// `x++` / `--x` used as a statement: a plain compound assignment.
fn update_statement(expr: &Expr, ctx: &Context) -> CodegenResult<Option<String>> {
    let ExprKind::Unary { op, operand, .. } = &expr.kind else {
        return Ok(None);
    };
    let step = match op {
        UnaryOp::Increment => "+=",
        UnaryOp::Decrement => "-=",
        _ => return Ok(None),
    };
    let target = compile_expr(operand, RenderMode::Forbidden, ctx)?;
    Ok(Some(format!("{target} {step} 1")))
}

/// `const` → `let`, `let` / `var` → `let mut`.
fn compile_var(decl: &VarDecl, ctx: &Context) -> CodegenResult<String> {
    let [d] = decl.declarations.as_slice() else {
        return Err(CodegenError::new(
            ErrorCode::MULTIPLE_DECLARATORS,
            "variable",
            "Declare one variable per statement.",
            decl.span,
        ));
    };
    let Binding::Identifier(id) = &d.name else {
        return Err(CodegenError::new(
            ErrorCode::DESTRUCTURING,
            "variable",
            "Destructuring declarations are not supported.",
            d.name.span(),
        ));
    };
    let Some(init) = &d.init else {
        return Err(CodegenError::new(
            ErrorCode::MISSING_INITIALIZER,
            "variable",
            format!("Variable `{}` must be initialized.", id.name),
            d.span,
        ));
    };

    let keyword = match decl.kind {
        VarKind::Const => "let",
        VarKind::Let | VarKind::Var => "let mut",
    };
    let mut value = compile_expr(init, RenderMode::Deferred, ctx)?;
    let annotation = match &d.ty {
        Some(ty) => {
            let rust = compile_type(ty)?;
            let is_null = matches!(init.unparenthesized().kind, ExprKind::Null | ExprKind::Undefined);
            let is_text = rust == "String" || rust == "Option<String>";
            if is_text && matches!(init.kind, ExprKind::String { .. }) {
                value = format!("{value}.to_string()");
            }
            if is_nullable_type(ty) && !is_null && !ctx.oracle.is_nullable(init) {
                value = format!("Some({value})");
            }
            format!(": {rust}")
        }
        None => String::new(),
    };
    Ok(format!("{keyword} {}{annotation} = {value};", rust_ident(&id.name)))
}

fn compile_return(r: &ReturnStmt, ctx: &Context) -> CodegenResult<String> {
    let Some(value) = &r.value else {
        return Ok("return;".to_string());
    };
    let code = compile_expr(value, RenderMode::Deferred, ctx)?;
    if !ctx.returns_option {
        return Ok(format!("return {code};"));
    }
    Ok(match value.unparenthesized().kind {
        ExprKind::Null | ExprKind::Undefined => "return None;".to_string(),
        _ if ctx.oracle.is_nullable(value) => format!("return {code};"),
        _ => format!("return Some({code});"),
    })
}
