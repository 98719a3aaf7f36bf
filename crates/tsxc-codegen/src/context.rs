//! Compile-time context threaded through every compiler.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tsxc_types::ast::{
    Binding, ImportBindings, ImportDecl, Item, Module, PropertyName, TypeKind, TypeMember,
};
use tsxc_types::TypeOracle;

/// When the markup being compiled may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Attribute values: markup is an error.
    Forbidden,
    /// A writer chain is open: markup becomes append calls on it.
    Immediate,
    /// Markup is a first-class value: it becomes an `Element` closure.
    Deferred,
}

impl RenderMode {
    /// Mode for the operands of a non-markup node compiled under `self`.
    pub fn for_operands(self) -> RenderMode {
        match self {
            RenderMode::Forbidden => RenderMode::Forbidden,
            RenderMode::Immediate | RenderMode::Deferred => RenderMode::Deferred,
        }
    }
}

/// Options that shape the emitted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Rust path under which generated modules live, e.g. `crate::views`.
    pub namespace: String,
    /// Name of the runtime crate the generated code imports.
    pub runtime_crate: String,
    /// Emit `//# line N "File.tsx"` before every statement.
    pub line_markers: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            namespace: "crate".to_string(),
            runtime_crate: "tsxc_runtime".to_string(),
            line_markers: true,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Component Table
// ══════════════════════════════════════════════════════════════════════════════

/// What the unit knows about components and records: its own, plus those
/// it imports from sibling units (see [`ComponentTable::link`]).
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    /// Component name → props type of its first parameter (`None` = no parameters).
    components: HashMap<String, Option<String>>,
    /// Record name → names of its optional fields.
    optional_fields: HashMap<String, BTreeSet<String>>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the functions and record types declared in a unit.
    pub fn from_module(module: &Module) -> Self {
        let mut table = Self::new();
        for item in &module.items {
            match item {
                Item::Function(f) => {
                    let Some(name) = &f.name else { continue };
                    let props = f.params.first().map(|p| match (&p.name, &p.ty) {
                        (Binding::Identifier(_), Some(ty)) => match &ty.kind {
                            TypeKind::Reference { name, args } if args.is_empty() => {
                                name.replace('.', "::")
                            }
                            _ => format!("{}Props", name.name),
                        },
                        _ => format!("{}Props", name.name),
                    });
                    table.insert_component(&name.name, props);
                }
                Item::TypeAlias(alias) => {
                    if let TypeKind::Object { members } = &alias.ty.kind {
                        let optional = members.iter().filter_map(|m| match m {
                            TypeMember::Property(p) if p.optional => match &p.name {
                                PropertyName::Identifier { name } => Some(name.clone()),
                                _ => None,
                            },
                            _ => None,
                        });
                        table.insert_record(&alias.name.name, optional);
                    }
                }
                Item::Import(_) | Item::Statement { .. } => {}
            }
        }
        table
    }

    pub fn insert_component(&mut self, name: &str, props_type: Option<String>) {
        self.components.insert(name.to_string(), props_type);
    }

    pub fn insert_record(&mut self, name: &str, optional: impl IntoIterator<Item = String>) {
        self.optional_fields
            .insert(name.to_string(), optional.into_iter().collect());
    }

    /// `Some(None)` for a known component without parameters.
    pub fn props_type(&self, component: &str) -> Option<Option<&str>> {
        self.components.get(component).map(|p| p.as_deref())
    }

    /// Whether `field` is an optional field of the known record `record`.
    pub fn is_optional_field(&self, record: &str, field: &str) -> bool {
        self.optional_fields
            .get(record)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Make what `import` brings in from `sibling` (the imported unit's own
    /// table) known under the names the importing unit uses.
    ///
    /// Named imports keep their names. A namespace import `* as L` exposes
    /// component `c` as the tag `L.c` and record `R` as the Rust path `L::R`.
    pub fn link(&mut self, import: &ImportDecl, sibling: &ComponentTable) {
        match &import.bindings {
            Some(ImportBindings::Named { names }) => {
                for ident in names {
                    let name = ident.name.as_str();
                    if let Some(props) = sibling.components.get(name) {
                        if let Some(record) = props.as_deref() {
                            self.copy_record(sibling, record, record.to_string());
                        }
                        self.components
                            .entry(name.to_string())
                            .or_insert_with(|| props.clone());
                    }
                    self.copy_record(sibling, name, name.to_string());
                }
            }
            Some(ImportBindings::Namespace { alias }) => {
                let alias = &alias.name;
                for (name, props) in &sibling.components {
                    let props = props.as_ref().map(|p| format!("{alias}::{p}"));
                    self.components.insert(format!("{alias}.{name}"), props);
                }
                for record in sibling.optional_fields.keys() {
                    self.copy_record(sibling, record, format!("{alias}::{record}"));
                }
            }
            None => {}
        }
    }

    /// Declarations of the unit itself win over imported ones.
    fn copy_record(&mut self, sibling: &ComponentTable, record: &str, as_name: String) {
        if let Some(fields) = sibling.optional_fields.get(record) {
            self.optional_fields
                .entry(as_name)
                .or_insert_with(|| fields.clone());
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Context
// ══════════════════════════════════════════════════════════════════════════════

static NOTHING_SHARED: BTreeSet<String> = BTreeSet::new();

/// Read-only state shared by the compilers of one unit.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub oracle: &'a dyn TypeOracle,
    pub file_name: &'a str,
    pub components: &'a ComponentTable,
    /// Namespace import aliases (`import * as T`): `T.x` compiles to `T::x`.
    pub aliases: &'a HashSet<String>,
    pub options: &'a CompileOptions,
    /// The enclosing function returns `Option<T>`.
    pub returns_option: bool,
    /// Code is being emitted inside an `Element` closure or an arrow.
    /// Values captured by a further closure must be cloned first.
    pub in_closure: bool,
    /// Variables of the enclosing function that closures clone instead of
    /// moving (see [`crate::captures`]).
    pub shared: &'a BTreeSet<String>,
}

impl<'a> Context<'a> {
    pub fn new(
        oracle: &'a dyn TypeOracle,
        file_name: &'a str,
        components: &'a ComponentTable,
        aliases: &'a HashSet<String>,
        options: &'a CompileOptions,
    ) -> Self {
        Self {
            oracle,
            file_name,
            components,
            aliases,
            options,
            returns_option: false,
            in_closure: false,
            shared: &NOTHING_SHARED,
        }
    }

    /// The same context inside a function with a different return type.
    pub fn in_function(self, returns_option: bool) -> Self {
        Self {
            returns_option,
            in_closure: false,
            ..self
        }
    }

    /// The same context inside a closure body.
    pub fn nested(self) -> Self {
        Self {
            in_closure: true,
            ..self
        }
    }

    /// The same context inside a function body whose shared variables are
    /// `shared`.
    pub fn sharing<'b>(self, shared: &'b BTreeSet<String>) -> Context<'b>
    where
        'a: 'b,
    {
        let ctx: Context<'b> = self;
        Context { shared, ..ctx }
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsxc_types::builder::*;

    #[test]
    fn operand_modes() {
        assert_eq!(RenderMode::Forbidden.for_operands(), RenderMode::Forbidden);
        assert_eq!(RenderMode::Immediate.for_operands(), RenderMode::Deferred);
        assert_eq!(RenderMode::Deferred.for_operands(), RenderMode::Deferred);
    }

    #[test]
    fn options_default_from_empty_json() {
        let options: CompileOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CompileOptions::default());
        assert_eq!(options.namespace, "crate");
        assert!(options.line_markers);
    }

    #[test]
    fn table_collects_components_and_records() {
        let m = module(
            "Card.tsx",
            vec![
                type_alias(
                    "CardProps",
                    ty_object(vec![
                        readonly_prop("title", ty_string()),
                        optional_prop("footer", ty_ref("JsxNode")),
                    ]),
                ),
                function_item(func(
                    "Card",
                    vec![param("props", ty_ref("CardProps"))],
                    ty_ref("JsxElement"),
                    vec![],
                )),
                function_item(func("Spacer", vec![], ty_ref("JsxElement"), vec![])),
                function_item(func(
                    "Inline",
                    vec![param("props", ty_object(vec![]))],
                    ty_ref("JsxElement"),
                    vec![],
                )),
            ],
        );
        let table = ComponentTable::from_module(&m);
        assert_eq!(table.props_type("Card"), Some(Some("CardProps")));
        assert_eq!(table.props_type("Spacer"), Some(None));
        assert_eq!(table.props_type("Inline"), Some(Some("InlineProps")));
        assert_eq!(table.props_type("Missing"), None);
        assert!(table.is_optional_field("CardProps", "footer"));
        assert!(!table.is_optional_field("CardProps", "title"));
    }

    #[test]
    fn imports_link_sibling_tables() {
        let badge = module(
            "Badge.tsx",
            vec![
                type_alias(
                    "BadgeProps",
                    ty_object(vec![
                        readonly_prop("first", ty_string()),
                        optional_prop("label", ty_string()),
                    ]),
                ),
                function_item(export(func(
                    "Badge",
                    vec![param("props", ty_ref("BadgeProps"))],
                    ty_ref("JsxElement"),
                    vec![],
                ))),
            ],
        );
        let sibling = ComponentTable::from_module(&badge);

        let Item::Import(named) = import_named(&["Badge"], "./Badge") else {
            unreachable!()
        };
        let mut table = ComponentTable::new();
        table.link(&named, &sibling);
        assert_eq!(table.props_type("Badge"), Some(Some("BadgeProps")));
        assert!(table.is_optional_field("BadgeProps", "label"));
        assert!(!table.is_optional_field("BadgeProps", "first"));

        let Item::Import(ns) = import_ns("B", "./Badge") else {
            unreachable!()
        };
        let mut table = ComponentTable::new();
        table.link(&ns, &sibling);
        assert_eq!(table.props_type("B.Badge"), Some(Some("B::BadgeProps")));
        assert_eq!(table.props_type("Badge"), None);
        assert!(table.is_optional_field("B::BadgeProps", "label"));
    }
}
