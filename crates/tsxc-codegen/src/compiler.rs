//! Module driver: compiles one unit into one Rust module.

use std::collections::{HashMap, HashSet};

use tsxc_types::ast::*;
use tsxc_types::{EmbeddedFacts, ErrorCode, TypeOracle};

use crate::code_writer::CodeWriter;
use crate::context::{CompileOptions, ComponentTable, Context};
use crate::error::{CodegenError, CodegenResult};
use crate::source_map::{ItemKind, SourceMap};
use crate::stmt::emit_function;
use crate::text::{rust_ident, snake_case};
use crate::types::emit_type_alias;

const ALLOWED_LINTS: &str =
    "non_snake_case, non_upper_case_globals, unused_imports, unused_mut, unused_parens";

/// The output of compiling one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledModule {
    /// Name of the emitted `pub mod`.
    pub module_name: String,
    pub code: String,
    pub source_map: SourceMap,
}

/// Compile a unit using the type facts embedded in its syntax tree.
pub fn compile(module: &Module, options: &CompileOptions) -> CodegenResult<CompiledModule> {
    compile_module(module, &EmbeddedFacts, options)
}

/// Compile a unit. The first error aborts the unit; it is attributed to the
/// unit's file.
pub fn compile_module(
    module: &Module,
    oracle: &dyn TypeOracle,
    options: &CompileOptions,
) -> CodegenResult<CompiledModule> {
    compile_linked(module, oracle, options, &HashMap::new())
}

/// Compile a unit that imports components from units compiled alongside it.
///
/// `siblings` maps module names (see [`module_name`]) to the tables of those
/// units, so that calls to imported components know which props are
/// optional. Imports of units missing from the map compile as if the
/// imported components had no optional props.
pub fn compile_linked(
    module: &Module,
    oracle: &dyn TypeOracle,
    options: &CompileOptions,
    siblings: &HashMap<String, ComponentTable>,
) -> CodegenResult<CompiledModule> {
    compile_items(module, oracle, options, siblings).map_err(|e| e.in_file(&module.file_name))
}

/// Rust module name for a source file: `Components/NavBar.tsx` → `nav_bar`.
pub fn module_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = base.rsplit_once('.').map_or(base, |(stem, _)| stem);
    rust_ident(&snake_case(stem))
}

fn compile_items(
    module: &Module,
    oracle: &dyn TypeOracle,
    options: &CompileOptions,
    siblings: &HashMap<String, ComponentTable>,
) -> CodegenResult<CompiledModule> {
    let name = module_name(&module.file_name);
    let mut components = ComponentTable::from_module(module);

    let mut uses = Vec::new();
    let mut aliases = HashSet::new();
    for item in &module.items {
        if let Item::Import(import) = item {
            if let Some(line) = use_line(import, &options.namespace, &mut aliases)? {
                uses.push(line);
                if let Some(sibling) = siblings.get(&module_name(&import.source)) {
                    components.link(import, sibling);
                }
            }
        }
    }

    let ctx = Context::new(oracle, &module.file_name, &components, &aliases, options);
    let mut source_map = SourceMap::new(&module.file_name);
    let mut out = CodeWriter::new();

    out.line(&format!(
        "// @generated by tsxc from {}. Do not edit.",
        module.file_name
    ));
    out.line(&format!("pub mod {name} {{"));
    out.indented(|out| {
        out.line(&format!("#![allow({ALLOWED_LINTS})]"));
        out.line(&format!("use {}::prelude::*;", options.runtime_crate));
        for line in &uses {
            out.line(line);
        }

        for item in &module.items {
            match item {
                Item::Import(_) => {}
                Item::TypeAlias(alias) => {
                    out.blank_line();
                    let line = out.current_line();
                    let kind = emit_type_alias(alias, out)?;
                    source_map.push(line, &alias.name.name, kind, alias.span);
                }
                Item::Function(f) => {
                    out.blank_line();
                    let line = out.current_line();
                    emit_function(f, &ctx, out, false)?;
                    let fn_name = f.name.as_ref().map_or("", |n| n.name.as_str());
                    source_map.push(line, fn_name, ItemKind::Function, f.span);
                }
                Item::Statement { statement } => {
                    return Err(CodegenError::new(
                        ErrorCode::UNSUPPORTED_MODULE_MEMBER,
                        statement.kind_name(),
                        "Unsupported module member.",
                        statement.span(),
                    ));
                }
            }
        }
        Ok::<_, CodegenError>(())
    })?;
    out.line("}");

    Ok(CompiledModule {
        module_name: name,
        code: out.finish(),
        source_map,
    })
}

// ══════════════════════════════════════════════════════════════════════════════
// Imports
// ══════════════════════════════════════════════════════════════════════════════

/// `use` line for an import; `None` for package imports, which have no
/// generated counterpart.
fn use_line(
    import: &ImportDecl,
    namespace: &str,
    aliases: &mut HashSet<String>,
) -> CodegenResult<Option<String>> {
    let reject = |what: &str| {
        CodegenError::new(
            ErrorCode::UNSUPPORTED_IMPORT,
            "import",
            format!("{what} imports are not supported; use `import * as M` or `import {{ .. }}`."),
            import.span,
        )
    };
    if import.default.is_some() {
        return Err(reject("Default"));
    }
    let Some(bindings) = &import.bindings else {
        return Err(reject("Side-effect"));
    };
    if !import.source.starts_with('.') {
        return Ok(None);
    }

    let path = format!("{namespace}::{}", module_name(&import.source));
    Ok(Some(match bindings {
        ImportBindings::Namespace { alias } => {
            aliases.insert(alias.name.clone());
            format!("use {path} as {};", rust_ident(&alias.name))
        }
        ImportBindings::Named { .. } => format!("use {path}::*;"),
    }))
}
