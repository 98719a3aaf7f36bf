//! Markup sub-compiler.
//!
//! Markup compiles to a chain of appends on the writer `w`:
//!
//! ```text
//! w.append_raw("<div class=\"card\">")
//!     .append(&props.title)
//!     .append_raw("</div>")
//! ```
//!
//! Under [`RenderMode::Deferred`] the chain is wrapped in an `Element`
//! closure; under [`RenderMode::Immediate`] it is returned as is, and nested
//! markup in a child hole is spliced into the same chain.

use tsxc_types::ast::*;
use tsxc_types::{ErrorCode, Span};

use crate::captures::{markup_captures, with_captures};
use crate::context::{Context, RenderMode};
use crate::error::{CodegenError, CodegenResult};
use crate::expr::{borrowed, compile_expr, into_value, is_place, list};
use crate::text::{escape_html, format_literal, indent_tail, is_identifier, markup_text, rust_ident, rust_string};

/// HTML elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Host elements map to HTML tags; anything capitalized or dotted is a component.
pub fn is_host_tag(tag: &str) -> bool {
    tag.starts_with(|c: char| c.is_ascii_lowercase()) && !tag.contains('.')
}

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Compile a markup node under `mode`.
pub fn compile_markup(markup: &Markup, mode: RenderMode, ctx: &Context) -> CodegenResult<String> {
    match mode {
        RenderMode::Forbidden => Err(CodegenError::new(
            ErrorCode::MARKUP_NOT_ALLOWED_HERE,
            markup.kind_name(),
            "Markup is not allowed in attribute values.",
            markup.span(),
        )),
        RenderMode::Immediate => {
            let mut segments = Vec::new();
            markup_segments(markup, ctx, &mut segments)?;
            Ok(chain(&segments))
        }
        RenderMode::Deferred => deferred(markup, ctx),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Writer Chains
// ══════════════════════════════════════════════════════════════════════════════

/// One call in a writer chain.
enum Segment {
    /// Markup known at compile time, already escaped.
    Raw(String),
    /// `.append(<code>)`; `code` is a borrow.
    Append(String),
    /// An opening tag with interpolated attribute values.
    Format { fmt: String, args: Vec<String> },
}

impl Segment {
    fn render(&self) -> String {
        match self {
            Segment::Raw(text) => format!(".append_raw({})", rust_string(text)),
            Segment::Append(code) => format!(".append({code})"),
            Segment::Format { fmt, args } => {
                let mut items = vec![format!("\"{fmt}\"")];
                items.extend(args.iter().cloned());
                format!(".append_raw(&{})", list("format!(", &items, ")"))
            }
        }
    }
}

fn chain(segments: &[Segment]) -> String {
    let mut out = String::from("w");
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push_str("\n    ");
        }
        out.push_str(&indent_tail(&segment.render(), 4));
    }
    out
}

/// `Element::new(move |w: &mut Writer| { <chain>; })`
fn deferred(markup: &Markup, ctx: &Context) -> CodegenResult<String> {
    let mut segments = Vec::new();
    markup_segments(markup, &ctx.nested(), &mut segments)?;
    if segments.is_empty() {
        return Ok("Element::empty()".to_string());
    }
    let closure = format!(
        "Element::new(move |w: &mut Writer| {{\n    {};\n}})",
        indent_tail(&chain(&segments), 4)
    );
    Ok(with_captures(closure, &markup_captures(markup, ctx), ctx))
}

fn markup_segments(markup: &Markup, ctx: &Context, out: &mut Vec<Segment>) -> CodegenResult<()> {
    match markup {
        Markup::Fragment { children, .. } => child_segments(children, ctx, out),
        Markup::Element { tag, children, .. } if tag.is_empty() => child_segments(children, ctx, out),
        Markup::Element {
            tag,
            attributes,
            children,
            span,
        } if is_host_tag(tag) => host_segments(tag, attributes, children, *span, ctx, out),
        Markup::Element {
            tag,
            attributes,
            children,
            ..
        } => {
            let call = component_call(tag, attributes, children, ctx)?;
            out.push(Segment::Append(format!("&{call}")));
            Ok(())
        }
    }
}

fn is_significant(child: &MarkupChild) -> bool {
    match child {
        MarkupChild::Text { text, .. } => markup_text(text).is_some(),
        MarkupChild::Expression { expr, .. } => expr.is_some(),
        MarkupChild::Markup { .. } => true,
    }
}

fn child_segments(children: &[MarkupChild], ctx: &Context, out: &mut Vec<Segment>) -> CodegenResult<()> {
    for child in children {
        match child {
            MarkupChild::Text { text, .. } => {
                if let Some(text) = markup_text(text) {
                    out.push(Segment::Raw(escape_html(&text)));
                }
            }
            MarkupChild::Expression { expr: None, .. } => {}
            MarkupChild::Expression { expr: Some(e), .. } => match &e.unparenthesized().kind {
                ExprKind::Markup { markup } => markup_segments(markup, ctx, out)?,
                _ => {
                    let code = compile_expr(e, RenderMode::Deferred, ctx)?;
                    out.push(Segment::Append(borrowed(e, &code)));
                }
            },
            MarkupChild::Markup { markup } => markup_segments(markup, ctx, out)?,
        }
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════════════════════
// Host Elements
// ══════════════════════════════════════════════════════════════════════════════

fn host_segments(
    tag: &str,
    attributes: &[Attribute],
    children: &[MarkupChild],
    span: Span,
    ctx: &Context,
    out: &mut Vec<Segment>,
) -> CodegenResult<()> {
    let void = is_void_element(tag);
    if void && children.iter().any(is_significant) {
        return Err(CodegenError::new(
            ErrorCode::VOID_ELEMENT_CHILDREN,
            "element",
            format!("Void element <{tag}> cannot have children."),
            span,
        ));
    }
    out.push(open_tag(tag, attributes, void, ctx)?);
    if !void {
        child_segments(children, ctx, out)?;
        out.push(Segment::Raw(format!("</{tag}>")));
    }
    Ok(())
}

/// Opening tag text, kept both plain and as a `format!` string.
#[derive(Default)]
struct TagBuilder {
    text: String,
    fmt: String,
    args: Vec<String>,
}

impl TagBuilder {
    fn literal(&mut self, s: &str) {
        self.text.push_str(s);
        self.fmt.push_str(&format_literal(s));
    }

    fn hole(&mut self, code: String) {
        self.fmt.push_str("{}");
        self.args.push(code);
    }

    fn finish(self) -> Segment {
        if self.args.is_empty() {
            Segment::Raw(self.text)
        } else {
            Segment::Format {
                fmt: self.fmt,
                args: self.args,
            }
        }
    }
}

fn open_tag(tag: &str, attributes: &[Attribute], void: bool, ctx: &Context) -> CodegenResult<Segment> {
    let mut b = TagBuilder::default();
    b.literal(&format!("<{tag}"));
    for attr in attributes {
        match attr {
            Attribute::Spread { span, .. } => return Err(spread_error(*span)),
            Attribute::Named { name, value, .. } => {
                let name = if name == "className" { "class" } else { name.as_str() };
                match value {
                    None => b.literal(&format!(" {name}=\"true\"")),
                    Some(AttrValue::String { value }) => {
                        b.literal(&format!(" {name}=\"{}\"", escape_html(value)))
                    }
                    Some(AttrValue::Expression { expr }) => {
                        let code = compile_expr(expr, RenderMode::Forbidden, ctx)?;
                        b.literal(&format!(" {name}=\""));
                        b.hole(format!("attr({})", borrowed(expr, &code)));
                        b.literal("\"");
                    }
                }
            }
        }
    }
    b.literal(if void { "/>" } else { ">" });
    Ok(b.finish())
}

fn spread_error(span: Span) -> CodegenError {
    CodegenError::new(
        ErrorCode::SPREAD_ATTRIBUTE,
        "spread_attribute",
        "Spread attributes are not supported.",
        span,
    )
}

// ══════════════════════════════════════════════════════════════════════════════
// Components
// ══════════════════════════════════════════════════════════════════════════════

/// `Name(NameProps { .., ..Default::default() })`
fn component_call(
    tag: &str,
    attributes: &[Attribute],
    children: &[MarkupChild],
    ctx: &Context,
) -> CodegenResult<String> {
    let (path, props_type) = match tag.rsplit_once('.') {
        Some((prefix, name)) => {
            let prefix = prefix.split('.').map(rust_ident).collect::<Vec<_>>().join("::");
            let props = match ctx.components.props_type(tag).flatten() {
                Some(props) => props.to_string(),
                None => format!("{prefix}::{name}Props"),
            };
            (format!("{prefix}::{}", rust_ident(name)), props)
        }
        None => {
            let props = match ctx.components.props_type(tag).flatten() {
                Some(props) => props.to_string(),
                None => format!("{tag}Props"),
            };
            (rust_ident(tag), props)
        }
    };

    let significant: Vec<&MarkupChild> = children.iter().filter(|c| is_significant(c)).collect();
    if attributes.is_empty() && significant.is_empty() {
        return Ok(format!("{path}()"));
    }

    let optional = |field: &str| ctx.components.is_optional_field(&props_type, field);
    let mut fields = Vec::with_capacity(attributes.len() + 2);
    for attr in attributes {
        let (name, value, span) = match attr {
            Attribute::Spread { span, .. } => return Err(spread_error(*span)),
            Attribute::Named { name, value, span } => (name, value, *span),
        };
        if !is_identifier(name) {
            return Err(CodegenError::new(
                ErrorCode::INVALID_PROP_NAME,
                "attribute",
                format!("Invalid prop name `{name}` on component <{tag}>."),
                span,
            ));
        }
        let code = match value {
            None => "true.into()".to_string(),
            Some(AttrValue::String { value }) => format!("{}.into()", rust_string(value)),
            Some(AttrValue::Expression { expr }) => {
                into_value(expr, &compile_expr(expr, RenderMode::Deferred, ctx)?)
            }
        };
        let code = if optional(name) { format!("Some({code})") } else { code };
        fields.push(format!("{}: {code}", rust_ident(name)));
    }

    if !significant.is_empty() {
        let node = children_node(&significant, ctx)?;
        let node = if optional("children") {
            format!("Some({node})")
        } else {
            format!("{node}.into()")
        };
        fields.push(format!("children: {node}"));
    }
    fields.push("..Default::default()".to_string());

    if significant.is_empty() && fields.iter().all(|f| !f.contains('\n')) {
        return Ok(format!("{path}({props_type} {{ {} }})", fields.join(", ")));
    }
    let mut out = format!("{path}({props_type} {{\n");
    for (i, field) in fields.iter().enumerate() {
        let sep = if i + 1 == fields.len() { "" } else { "," };
        out.push_str(&format!("    {}{sep}\n", indent_tail(field, 4)));
    }
    out.push_str("})");
    Ok(out)
}

/// Children of a component as one `Node`.
fn children_node(children: &[&MarkupChild], ctx: &Context) -> CodegenResult<String> {
    let mut nodes = Vec::with_capacity(children.len());
    for child in children {
        let node = match child {
            MarkupChild::Text { text, .. } => match markup_text(text) {
                Some(text) => format!("Node::from_literal({})", rust_string(&text)),
                None => continue,
            },
            MarkupChild::Expression { expr: None, .. } => continue,
            MarkupChild::Expression { expr: Some(e), .. } => match &e.unparenthesized().kind {
                ExprKind::Markup { markup } => format!("Node::from_element({})", deferred(markup, ctx)?),
                _ => {
                    let code = compile_expr(e, RenderMode::Deferred, ctx)?;
                    let code = if is_place(e) { format!("{code}.clone()") } else { code };
                    format!("Node::from_value({code})")
                }
            },
            MarkupChild::Markup { markup } => format!("Node::from_element({})", deferred(markup, ctx)?),
        };
        nodes.push(node);
    }
    Ok(match nodes.len() {
        1 => nodes.remove(0),
        _ => list("Node::from_array(vec![", &nodes, "])"),
    })
}
