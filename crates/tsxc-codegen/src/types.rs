//! Type compilation: record structs, string enums, and type references.

use std::collections::HashSet;

use tsxc_types::ast::*;
use tsxc_types::{ErrorCode, Span};

use crate::code_writer::CodeWriter;
use crate::error::{CodegenError, CodegenResult};
use crate::source_map::ItemKind;
use crate::text::{rust_ident, rust_string};

// ══════════════════════════════════════════════════════════════════════════════
// Type References
// ══════════════════════════════════════════════════════════════════════════════

/// Compile a type reference to a Rust type.
pub fn compile_type(ty: &TypeNode) -> CodegenResult<String> {
    match &ty.kind {
        TypeKind::Boolean => Ok("bool".to_string()),
        TypeKind::String => Ok("String".to_string()),
        TypeKind::Void => Ok("()".to_string()),
        TypeKind::Number => Err(number_error(ty.span)),
        TypeKind::Paren { inner } => compile_type(inner),
        TypeKind::Array { element } => Ok(format!("Vec<{}>", compile_type(element)?)),
        TypeKind::Reference { name, args } => compile_reference(name, args, ty.span),
        TypeKind::Union { arms } => compile_union(arms, ty.span),
        TypeKind::Null | TypeKind::Undefined => Err(shape_error(
            ty,
            "`null` is only supported as an arm of `T | null`.",
        )),
        TypeKind::Any => Err(shape_error(ty, "Type `any` is not supported.")),
        TypeKind::Literal { .. } => Err(shape_error(
            ty,
            "Literal types are only supported in string enum aliases.",
        )),
        TypeKind::Object { .. } => Err(shape_error(
            ty,
            "Object types must be declared through a type alias.",
        )),
        TypeKind::Function { .. } => Err(shape_error(ty, "Function types are not supported.")),
    }
}

fn compile_reference(name: &str, args: &[TypeNode], span: Span) -> CodegenResult<String> {
    let sized = match name {
        "byte" => Some("u8"),
        "sbyte" => Some("i8"),
        "short" => Some("i16"),
        "ushort" => Some("u16"),
        "int" => Some("i32"),
        "uint" => Some("u32"),
        "long" => Some("i64"),
        "ulong" => Some("u64"),
        "float" => Some("f32"),
        "double" => Some("f64"),
        "JsxElement" => Some("Element"),
        "JsxNode" => Some("Node"),
        _ => None,
    };
    if let Some(rust) = sized {
        return Ok(rust.to_string());
    }

    match (name, args) {
        ("Ref" | "Pointer" | "Ptr", _) => Err(CodegenError::new(
            ErrorCode::REF_TYPE,
            "type_reference",
            format!("By-reference type `{name}` is not supported."),
            span,
        )),
        ("Promise", [inner]) => Ok(format!("Task<{}>", compile_type(inner)?)),
        ("Array" | "ReadonlyArray", [inner]) => Ok(format!("Vec<{}>", compile_type(inner)?)),
        (_, []) => Ok(qualified(name)),
        (_, args) => {
            let args = args
                .iter()
                .map(compile_type)
                .collect::<CodegenResult<Vec<_>>>()?;
            Ok(format!("{}<{}>", qualified(name), args.join(", ")))
        }
    }
}

fn compile_union(arms: &[TypeNode], span: Span) -> CodegenResult<String> {
    let arms = flatten_arms(arms);
    let (nulls, rest): (Vec<&TypeNode>, Vec<&TypeNode>) = arms
        .into_iter()
        .partition(|a| matches!(a.kind, TypeKind::Null | TypeKind::Undefined));

    let inner = match rest.as_slice() {
        many if !many.is_empty() && many.iter().all(|a| is_boolean_type(a)) => "bool".to_string(),
        [single] => compile_type(single)?,
        _ => {
            return Err(CodegenError::new(
                ErrorCode::UNSUPPORTED_UNION,
                "union_type",
                "Union types are only supported as `T | null`; declare a type alias for other unions.",
                span,
            ))
        }
    };
    Ok(if nulls.is_empty() {
        inner
    } else {
        ensure_nullable(inner)
    })
}

fn flatten_arms(arms: &[TypeNode]) -> Vec<&TypeNode> {
    let mut out = Vec::with_capacity(arms.len());
    for arm in arms {
        match &arm.kind {
            TypeKind::Paren { inner } => out.extend(flatten_arms(std::slice::from_ref(inner.as_ref()))),
            TypeKind::Union { arms } => out.extend(flatten_arms(arms)),
            _ => out.push(arm),
        }
    }
    out
}

fn is_boolean_type(ty: &TypeNode) -> bool {
    matches!(
        ty.kind,
        TypeKind::Boolean
            | TypeKind::Literal {
                literal: LiteralType::Bool { .. }
            }
    )
}

/// `T.Name` → `T::Name`
fn qualified(name: &str) -> String {
    name.split('.').map(rust_ident).collect::<Vec<_>>().join("::")
}

/// Wrap a Rust type in `Option` unless it already is one.
pub fn ensure_nullable(rust: String) -> String {
    if rust.starts_with("Option<") {
        rust
    } else {
        format!("Option<{rust}>")
    }
}

/// Whether a declared type admits `null` / `undefined`.
pub fn is_nullable_type(ty: &TypeNode) -> bool {
    match &ty.kind {
        TypeKind::Null | TypeKind::Undefined => true,
        TypeKind::Paren { inner } => is_nullable_type(inner),
        TypeKind::Union { arms } => arms.iter().any(is_nullable_type),
        _ => false,
    }
}

/// `Promise<T>` → `Some(T)`
pub fn promise_inner(ty: &TypeNode) -> Option<&TypeNode> {
    match &ty.kind {
        TypeKind::Reference { name, args } if name == "Promise" && args.len() == 1 => args.first(),
        TypeKind::Paren { inner } => promise_inner(inner),
        _ => None,
    }
}

pub fn is_void(ty: &TypeNode) -> bool {
    match &ty.kind {
        TypeKind::Void => true,
        TypeKind::Paren { inner } => is_void(inner),
        _ => false,
    }
}

fn number_error(span: Span) -> CodegenError {
    CodegenError::new(
        ErrorCode::NUMBER_TYPE,
        "number",
        "Type `number` is not supported; numbers need an explicit width.",
        span,
    )
    .with_suggestion(
        "Use one of `byte`, `sbyte`, `short`, `ushort`, `int`, `uint`, `long`, `ulong`, `float`, `double`.",
    )
}

fn shape_error(ty: &TypeNode, message: &str) -> CodegenError {
    CodegenError::new(ErrorCode::UNSUPPORTED_TYPE_SHAPE, ty.kind_name(), message, ty.span)
}

// ══════════════════════════════════════════════════════════════════════════════
// Type Aliases
// ══════════════════════════════════════════════════════════════════════════════

/// A validated record field.
struct Field {
    name: String,
    ty: String,
    optional: bool,
}

/// Compile a type alias declaration into a record struct or a string enum.
///
/// The declaration is fully validated before anything is written.
pub fn emit_type_alias(decl: &TypeAliasDecl, out: &mut CodeWriter) -> CodegenResult<ItemKind> {
    let vis = if decl.exported { "pub " } else { "" };
    let name = rust_ident(&decl.name.name);
    let body = unparen(&decl.ty);

    match &body.kind {
        TypeKind::Object { members } => {
            let fields = record_fields(members)?;
            emit_record(vis, &name, &fields, out);
            Ok(ItemKind::Record)
        }
        TypeKind::Union { arms } => {
            let literals = string_literals(arms, body.span)?;
            emit_string_enum(vis, &name, &literals, out);
            Ok(ItemKind::StringEnum)
        }
        _ => Err(CodegenError::new(
            ErrorCode::UNSUPPORTED_TYPE_SHAPE,
            body.kind_name(),
            format!(
                "Type alias `{}` must be an object type or a union of string literals.",
                decl.name.name
            ),
            decl.span,
        )),
    }
}

fn unparen(ty: &TypeNode) -> &TypeNode {
    match &ty.kind {
        TypeKind::Paren { inner } => unparen(inner),
        _ => ty,
    }
}

// ── Records ──

fn record_fields(members: &[TypeMember]) -> CodegenResult<Vec<Field>> {
    let mut props = Vec::with_capacity(members.len());
    for member in members {
        let TypeMember::Property(prop) = member else {
            return Err(CodegenError::new(
                ErrorCode::UNSUPPORTED_TYPE_SHAPE,
                member.kind_name(),
                "Only properties are allowed in record types.",
                member.span(),
            ));
        };
        let PropertyName::Identifier { name } = &prop.name else {
            return Err(CodegenError::new(
                ErrorCode::QUOTED_PROPERTY_NAME,
                "property_signature",
                "Record property names must be plain identifiers.",
                prop.span,
            ));
        };
        let Some(ty) = &prop.ty else {
            return Err(CodegenError::new(
                ErrorCode::MISSING_PROPERTY_TYPE,
                "property_signature",
                format!("Property `{name}` must have an explicit type."),
                prop.span,
            ));
        };
        if !prop.readonly {
            return Err(CodegenError::new(
                ErrorCode::MUTABLE_PROPERTY,
                "property_signature",
                format!("Property `{name}` must be declared `readonly`."),
                prop.span,
            )
            .with_suggestion(format!("readonly {name}")));
        }
        props.push((name, ty, prop.optional));
    }

    let mut fields = props
        .into_iter()
        .map(|(name, ty, optional)| {
            let rust = compile_type(ty)?;
            Ok(Field {
                name: name.clone(),
                ty: if optional { ensure_nullable(rust) } else { rust },
                optional,
            })
        })
        .collect::<CodegenResult<Vec<_>>>()?;
    fields.sort_by(|a, b| a.optional.cmp(&b.optional).then_with(|| a.name.cmp(&b.name)));
    Ok(fields)
}

fn emit_record(vis: &str, name: &str, fields: &[Field], out: &mut CodeWriter) {
    out.line("#[derive(Debug, Clone, Default)]");
    out.line(&format!("{vis}struct {name} {{"));
    out.indented(|out| {
        for field in fields {
            out.line(&format!("pub {}: {},", rust_ident(&field.name), field.ty));
        }
    });
    out.line("}");
    out.blank_line();

    let params = fields
        .iter()
        .filter(|f| !f.optional)
        .map(|f| format!("{}: {}", rust_ident(&f.name), f.ty))
        .collect::<Vec<_>>()
        .join(", ");
    out.line(&format!("impl {name} {{"));
    out.indented(|out| {
        out.line(&format!("pub fn new({params}) -> Self {{"));
        out.indented(|out| {
            out.line("Self {");
            out.indented(|out| {
                for field in fields {
                    let ident = rust_ident(&field.name);
                    if field.optional {
                        out.line(&format!("{ident}: None,"));
                    } else {
                        out.line(&format!("{ident},"));
                    }
                }
            });
            out.line("}");
        });
        out.line("}");
    });
    out.line("}");
}

// ── String enums ──

fn string_literals(arms: &[TypeNode], span: Span) -> CodegenResult<Vec<String>> {
    let arms = flatten_arms(arms);
    let literal_count = arms
        .iter()
        .filter(|a| matches!(a.kind, TypeKind::Literal { .. }))
        .count();

    if literal_count == 0 {
        return Err(CodegenError::new(
            ErrorCode::UNSUPPORTED_UNION,
            "union_type",
            "Only unions of string literals can be declared as type aliases.",
            span,
        ));
    }
    if literal_count != arms.len() {
        return Err(CodegenError::new(
            ErrorCode::MIXED_LITERAL_UNION,
            "union_type",
            "Union mixes literal and non-literal types.",
            span,
        ));
    }

    let mut literals = Vec::with_capacity(arms.len());
    for arm in arms {
        match &arm.kind {
            TypeKind::Literal {
                literal: LiteralType::String { value },
            } => literals.push(value.clone()),
            _ => {
                return Err(shape_error(
                    arm,
                    "Only string literal unions can be declared as enums.",
                ))
            }
        }
    }
    literals.sort();
    literals.dedup();
    Ok(literals)
}

/// Constant name for an enum literal: non-identifier characters become `_`.
fn variant_name(literal: &str, taken: &mut HashSet<String>) -> String {
    let mut base: String = literal
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert(0, '_');
    }
    let mut name = rust_ident(&base);
    let mut n = 2;
    while !taken.insert(name.clone()) {
        name = format!("{base}_{n}");
        n += 1;
    }
    name
}

fn emit_string_enum(vis: &str, name: &str, literals: &[String], out: &mut CodeWriter) {
    let mut taken = HashSet::new();
    out.line("string_enum! {");
    out.indented(|out| {
        out.line(&format!("{vis}{name} {{"));
        out.indented(|out| {
            for literal in literals {
                let variant = variant_name(literal, &mut taken);
                out.line(&format!("{variant} = {},", rust_string(literal)));
            }
        });
        out.line("}");
    });
    out.line("}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsxc_types::builder::*;

    fn alias(ty: TypeNode) -> TypeAliasDecl {
        match type_alias("Props", ty) {
            Item::TypeAlias(decl) => decl,
            _ => unreachable!(),
        }
    }

    fn emit(ty: TypeNode) -> CodegenResult<String> {
        let mut out = CodeWriter::new();
        emit_type_alias(&alias(ty), &mut out)?;
        Ok(out.finish())
    }

    #[test]
    fn primitive_references() {
        assert_eq!(compile_type(&ty_boolean()).unwrap(), "bool");
        assert_eq!(compile_type(&ty_string()).unwrap(), "String");
        assert_eq!(compile_type(&ty_void()).unwrap(), "()");
        assert_eq!(compile_type(&ty_ref("ushort")).unwrap(), "u16");
        assert_eq!(compile_type(&ty_ref("double")).unwrap(), "f64");
        assert_eq!(compile_type(&ty_ref("JsxNode")).unwrap(), "Node");
    }

    #[test]
    fn composite_references() {
        assert_eq!(compile_type(&ty_array(ty_ref("int"))).unwrap(), "Vec<i32>");
        assert_eq!(
            compile_type(&ty_generic("Promise", vec![ty_ref("JsxElement")])).unwrap(),
            "Task<Element>"
        );
        assert_eq!(
            compile_type(&ty_union(vec![ty_string(), ty_null()])).unwrap(),
            "Option<String>"
        );
        assert_eq!(compile_type(&ty_ref("T.Props")).unwrap(), "T::Props");
        assert_eq!(
            compile_type(&ty_generic("Map", vec![ty_string(), ty_ref("long")])).unwrap(),
            "Map<String, i64>"
        );
        assert_eq!(compile_type(&ty_paren(ty_ref("byte"))).unwrap(), "u8");
    }

    #[test]
    fn null_and_undefined_arms_make_one_option() {
        let ty = ty_union(vec![ty_string(), ty_null(), ty_undefined()]);
        assert_eq!(compile_type(&ty).unwrap(), "Option<String>");
        let ty = ty_union(vec![ty_paren(ty_union(vec![ty_string(), ty_undefined()])), ty_null()]);
        assert_eq!(compile_type(&ty).unwrap(), "Option<String>");
        let err = compile_type(&ty_union(vec![ty_null(), ty_undefined()])).unwrap_err();
        assert_eq!(err.code, ErrorCode::UNSUPPORTED_UNION);
    }

    #[test]
    fn boolean_literal_unions_are_bool() {
        let ty = ty_union(vec![ty_bool_lit(true), ty_bool_lit(false)]);
        assert_eq!(compile_type(&ty).unwrap(), "bool");
        let ty = ty_union(vec![ty_bool_lit(true), ty_null()]);
        assert_eq!(compile_type(&ty).unwrap(), "Option<bool>");
        let err = compile_type(&ty_union(vec![ty_bool_lit(true), ty_string()])).unwrap_err();
        assert_eq!(err.code, ErrorCode::UNSUPPORTED_UNION);
    }

    #[test]
    fn number_requires_explicit_width() {
        let err = compile_type(&ty_number()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NUMBER_TYPE);
        assert!(err.suggestion.unwrap().contains("`int`"));
    }

    #[test]
    fn ref_types_and_wide_unions_are_rejected() {
        let err = compile_type(&ty_generic("Ref", vec![ty_ref("int")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::REF_TYPE);
        let err = compile_type(&ty_union(vec![ty_string(), ty_ref("int")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::UNSUPPORTED_UNION);
        let err = compile_type(&ty_any()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UNSUPPORTED_TYPE_SHAPE);
    }

    #[test]
    fn record_orders_mandatory_before_optional() {
        let code = emit(ty_object(vec![
            optional_prop("a", ty_ref("int")),
            readonly_prop("b", ty_string()),
            optional_prop("c", ty_union(vec![ty_boolean(), ty_null()])),
        ]))
        .unwrap();
        assert_eq!(
            code,
            "#[derive(Debug, Clone, Default)]\n\
             pub struct Props {\n    \
                 pub b: String,\n    \
                 pub a: Option<i32>,\n    \
                 pub c: Option<bool>,\n\
             }\n\
             \n\
             impl Props {\n    \
                 pub fn new(b: String) -> Self {\n        \
                     Self {\n            \
                         b,\n            \
                         a: None,\n            \
                         c: None,\n        \
                     }\n    \
                 }\n\
             }\n"
        );
    }

    #[test]
    fn record_keyword_fields_are_raw() {
        let code = emit(ty_object(vec![readonly_prop("type", ty_string())])).unwrap();
        assert!(code.contains("pub r#type: String,"));
        assert!(code.contains("pub fn new(r#type: String) -> Self"));
    }

    #[test]
    fn record_validation_errors() {
        let mutable = TypeMember::Property(PropertySignature {
            name: PropertyName::Identifier { name: "x".into() },
            optional: false,
            readonly: false,
            ty: Some(ty_string()),
            span: Span::point(2, 5),
        });
        let err = emit(ty_object(vec![mutable])).unwrap_err();
        assert_eq!(err.code, ErrorCode::MUTABLE_PROPERTY);
        assert_eq!(err.span, Span::point(2, 5));

        let quoted = TypeMember::Property(PropertySignature {
            name: PropertyName::String { value: "data-x".into() },
            optional: false,
            readonly: true,
            ty: Some(ty_string()),
            span: Span::default(),
        });
        assert_eq!(emit(ty_object(vec![quoted])).unwrap_err().code, ErrorCode::QUOTED_PROPERTY_NAME);

        let untyped = TypeMember::Property(PropertySignature {
            name: PropertyName::Identifier { name: "y".into() },
            optional: false,
            readonly: true,
            ty: None,
            span: Span::default(),
        });
        assert_eq!(emit(ty_object(vec![untyped])).unwrap_err().code, ErrorCode::MISSING_PROPERTY_TYPE);

        let method = TypeMember::Method {
            name: "m".into(),
            span: Span::default(),
        };
        assert_eq!(emit(ty_object(vec![method])).unwrap_err().code, ErrorCode::UNSUPPORTED_TYPE_SHAPE);
    }

    #[test]
    fn string_enum_is_sorted() {
        let code = emit(ty_union(vec![ty_str_lit("loggedIn"), ty_str_lit("hi2sss")])).unwrap();
        assert_eq!(
            code,
            "string_enum! {\n    pub Props {\n        hi2sss = \"hi2sss\",\n        loggedIn = \"loggedIn\",\n    }\n}\n"
        );
    }

    #[test]
    fn string_enum_names_are_sanitized() {
        let code = emit(ty_union(vec![
            ty_str_lit("a-b"),
            ty_str_lit("a_b"),
            ty_str_lit("2x"),
            ty_str_lit("type"),
        ]))
        .unwrap();
        assert!(code.contains("_2x = \"2x\","));
        assert!(code.contains("a_b = \"a-b\","));
        assert!(code.contains("a_b_2 = \"a_b\","));
        assert!(code.contains("r#type = \"type\","));
    }

    #[test]
    fn union_shape_errors() {
        let mixed = emit(ty_union(vec![ty_str_lit("a"), ty_string()])).unwrap_err();
        assert_eq!(mixed.code, ErrorCode::MIXED_LITERAL_UNION);
        let numeric = emit(ty_union(vec![ty_num_lit("1"), ty_num_lit("2")])).unwrap_err();
        assert_eq!(numeric.code, ErrorCode::UNSUPPORTED_TYPE_SHAPE);
        let plain = emit(ty_union(vec![ty_string(), ty_ref("int")])).unwrap_err();
        assert_eq!(plain.code, ErrorCode::UNSUPPORTED_UNION);
        let other = emit(ty_string()).unwrap_err();
        assert_eq!(other.code, ErrorCode::UNSUPPORTED_TYPE_SHAPE);
    }
}
