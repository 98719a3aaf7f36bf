//! Integration tests for the tsxc build pipeline.
//!
//! Tests validate:
//! - Units load from JSON files
//! - Failed units become diagnostics without stopping their siblings
//! - Units that fail to load are reported while the rest still load
//! - Units of one batch see the optional props of components they import
//! - Sequential and parallel builds agree, in input order
//! - Write-if-changed persistence and source-map sidecars
//! - Configuration discovery

use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tsxc_compiler::*;
use tsxc_types::ast::{Attribute, Markup, Module};
use tsxc_types::builder::*;
use tsxc_types::{ErrorCode, Span};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn component_unit(file: &str, name: &str, body: Markup) -> Module {
    module(
        file,
        vec![function_item(export(func(
            name,
            vec![],
            ty_ref("JsxElement"),
            vec![ret(markup(body))],
        )))],
    )
}

fn good_unit(file: &str, name: &str) -> Module {
    component_unit(file, name, element("p", vec![], vec![text(name)]))
}

/// A unit whose only component spreads its props onto a host element.
fn bad_unit(file: &str) -> Module {
    let mut m = component_unit(file, "Bad", element("div", vec![spread(ident("props"))], vec![]));
    m.source = Some("export function Bad(): JsxElement {\n  return <div {...props}/>;\n}\n".into());
    m
}

fn config_in(dir: &Path) -> Config {
    Config {
        out_dir: dir.join("out"),
        ..Config::default()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Compilation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn compile_unit_names_output_after_stem() {
    let config = config_in(Path::new("/tmp/x"));
    let out = compile_unit(&good_unit("views/NavBar.tsx", "NavBar"), &config).unwrap();
    assert_eq!(out.module_name, "nav_bar");
    assert_eq!(out.path, Path::new("/tmp/x/out/nav_bar.rs"));
    assert_eq!(out.file_name, "views/NavBar.tsx");
    assert_eq!(out.hash, compute_hash(&out.code));
    assert!(out.code.contains("pub fn NavBar() -> Element {"));
}

#[test]
fn failed_unit_does_not_stop_siblings() {
    let config = config_in(Path::new("/tmp/x"));
    let units = vec![good_unit("A.tsx", "A"), bad_unit("Bad.tsx"), good_unit("C.tsx", "C")];
    let report = compile_units(&units, &config);

    assert!(!report.is_success());
    let names: Vec<_> = report.outputs.iter().map(|o| o.module_name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(report.diagnostics.len(), 1);

    let d = &report.diagnostics[0];
    assert_eq!(d.error.code, ErrorCode::SPREAD_ATTRIBUTE);
    assert_eq!(d.error.file, "Bad.tsx");
    assert!(report.format_diagnostics().contains("Bad.tsx: error[E202]: Spread attributes are not supported."));
}

#[test]
fn batch_units_see_imported_optional_props() {
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
                vec![ret(markup(element("b", vec![], vec![hole(prop(ident("props"), "first"))])))],
            ))),
        ],
    );
    let mut page = component_unit(
        "Page.tsx",
        "Page",
        element("Badge", vec![attr_str("first", "a"), attr_str("label", "x")], vec![]),
    );
    page.items.insert(0, import_named(&["Badge"], "./Badge"));

    let config = config_in(Path::new("/tmp/x"));
    let report = compile_units(&[page.clone(), badge], &config);
    assert!(report.is_success(), "{}", report.format_diagnostics());
    assert!(report.outputs[0].code.contains(r#"label: Some("x".into())"#));

    // Compiled alone, the page cannot know `label` is optional.
    let alone = compile_unit(&page, &config).unwrap();
    assert!(alone.code.contains(r#"label: "x".into()"#));
}

#[test]
fn parallel_build_matches_sequential() {
    let units: Vec<Module> = (0..16)
        .map(|i| good_unit(&format!("Unit{i}.tsx"), &format!("Unit{i}")))
        .collect();
    let sequential = compile_units(&units, &config_in(Path::new("/tmp/x")));
    let parallel = compile_units(
        &units,
        &Config {
            parallel: true,
            ..config_in(Path::new("/tmp/x"))
        },
    );
    assert_eq!(sequential, parallel);
    assert_eq!(parallel.outputs[3].module_name, "unit3");
}

#[test]
fn diagnostics_carry_the_source_line() {
    let spread_at = Attribute::Spread {
        expr: ident("props"),
        span: Span::point(2, 15),
    };
    let mut m = component_unit("Bad.tsx", "Bad", element("div", vec![spread_at], vec![]));
    m.source = bad_unit("Bad.tsx").source;

    let d = compile_unit(&m, &Config::default()).unwrap_err();
    assert_eq!(d.source_line.as_deref(), Some("  return <div {...props}/>;"));
    assert!(d.to_string().starts_with("Bad.tsx:2:15: error[E202]"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Loading
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn load_unit_from_json_file() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let path = dir.join("hello.json");
    let unit = json!({
        "file_name": "Hello.tsx",
        "items": [{
            "kind": "function",
            "name": { "name": "Hello" },
            "exported": true,
            "return_type": { "kind": "reference", "name": "JsxElement" },
            "body": { "statements": [{
                "kind": "return",
                "value": { "kind": "markup", "markup": { "type": "fragment" } }
            }] }
        }]
    });
    fs::write(&path, unit.to_string()).unwrap();

    let m = load_unit(&path).unwrap();
    assert_eq!(m.file_name, "Hello.tsx");
    let out = compile_unit(&m, &config_in(dir)).unwrap();
    assert!(out.code.contains("return Element::empty();"));
}

#[test]
fn load_errors_name_the_file() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let missing = dir.join("missing.json");
    assert!(matches!(load_unit(&missing), Err(PipelineError::Io { .. })));

    let broken = dir.join("broken.json");
    fs::write(&broken, "{ \"file_name\": ").unwrap();
    let err = load_unit(&broken).unwrap_err();
    assert!(matches!(err, PipelineError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn unreadable_units_do_not_stop_the_batch() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let good = dir.join("good.json");
    fs::write(&good, serde_json::to_string(&good_unit("Good.tsx", "Good")).unwrap()).unwrap();
    let broken = dir.join("broken.json");
    fs::write(&broken, "[").unwrap();
    let missing = dir.join("missing.json");

    let (modules, errors) = load_units(&[broken.clone(), good, missing]);
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].file_name, "Good.tsx");
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], PipelineError::Json { .. }));
    assert!(matches!(errors[1], PipelineError::Io { .. }));

    let report = compile_units(&modules, &config_in(dir));
    assert!(report.is_success());
    assert_eq!(report.outputs[0].module_name, "good");
}

// ══════════════════════════════════════════════════════════════════════════════
// Persistence
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn write_if_changed_skips_identical_content() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let path = dir.join("nested").join("a.rs");
    assert_eq!(write_if_changed(&path, "one").unwrap(), WriteOutcome::Written);
    assert_eq!(write_if_changed(&path, "one").unwrap(), WriteOutcome::Unchanged);
    assert_eq!(write_if_changed(&path, "two").unwrap(), WriteOutcome::Written);
    assert_eq!(fs::read_to_string(&path).unwrap(), "two");
}

#[test]
fn persist_writes_module_and_source_map() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let config = config_in(dir);
    let out = compile_unit(&good_unit("Card.tsx", "Card"), &config).unwrap();

    assert_eq!(persist(&out, true).unwrap(), WriteOutcome::Written);
    assert_eq!(fs::read_to_string(dir.join("out/card.rs")).unwrap(), out.code);
    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("out/card.rs.map.json")).unwrap()).unwrap();
    assert_eq!(map["file"], "Card.tsx");
    assert_eq!(map["entries"][0]["name"], "Card");
    assert_eq!(map["entries"][0]["kind"], "function");

    // Rebuilding the same unit touches nothing.
    let again = compile_unit(&good_unit("Card.tsx", "Card"), &config).unwrap();
    assert_eq!(again.hash, out.hash);
    assert_eq!(persist(&again, true).unwrap(), WriteOutcome::Unchanged);
}

// ══════════════════════════════════════════════════════════════════════════════
// Configuration
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn config_is_discovered_upward() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let nested = dir.join("src").join("views");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        dir.join(CONFIG_FILE),
        r#"{ "namespace": "crate::views", "out_dir": "gen", "parallel": true }"#,
    )
    .unwrap();

    assert_eq!(find_config(&nested), Some(dir.join(CONFIG_FILE)));
    let config = Config::discover(&nested).unwrap();
    assert_eq!(config.compile.namespace, "crate::views");
    assert_eq!(config.out_dir, dir.join("gen"));
    assert!(config.parallel);
    assert!(config.compile.line_markers);
}

#[test]
fn empty_namespace_is_a_config_error() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let path = dir.join(CONFIG_FILE);
    fs::write(&path, r#"{ "namespace": " " }"#).unwrap();
    assert!(matches!(Config::load(&path), Err(PipelineError::Config { .. })));
}
