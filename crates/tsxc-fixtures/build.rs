//! Compiles the fixture units with the tsxc pipeline.
//!
//! `Gate.tsx` is read from its JSON hand-off file like any front-end output;
//! the other units are built with the syntax-tree builder. All of them are
//! compiled as one batch so imported components are linked.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tsxc_compiler::{compile_units, load_units, persist, Config};
use tsxc_types::ast::{BinOp, Module};
use tsxc_types::builder::*;

fn main() -> Result<()> {
    let manifest = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=tsxc.json");
    println!("cargo:rerun-if-changed=units");

    let mut config = Config::load(&manifest.join("tsxc.json"))?;
    config.out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let (mut modules, errors) = load_units(&[manifest.join("units").join("gate.json")]);
    if let Some(e) = errors.into_iter().next() {
        return Err(e).context("loading fixture units");
    }
    modules.extend([card_unit(), badge_unit(), page_unit(), example_unit()]);

    let report = compile_units(&modules, &config);
    if !report.is_success() {
        bail!("fixture units failed to compile:\n{}", report.format_diagnostics());
    }
    for output in &report.outputs {
        persist(output, config.source_maps)
            .with_context(|| format!("writing {}", output.path.display()))?;
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════════════════════
// Units
// ══════════════════════════════════════════════════════════════════════════════

fn props_field(name: &str) -> tsxc_types::ast::Expr {
    prop(ident("props"), name)
}

/// ```tsx
/// export type CardProps = { readonly title: string; readonly children?: JsxNode };
/// export function Card(props: CardProps): JsxElement {
///     return <section><h2>{props.title}</h2>{props.children}</section>;
/// }
/// ```
fn card_unit() -> Module {
    module(
        "Card.tsx",
        vec![
            type_alias(
                "CardProps",
                ty_object(vec![
                    readonly_prop("title", ty_string()),
                    optional_prop("children", ty_ref("JsxNode")),
                ]),
            ),
            function_item(export(func(
                "Card",
                vec![param("props", ty_ref("CardProps"))],
                ty_ref("JsxElement"),
                vec![ret(markup(element(
                    "section",
                    vec![],
                    vec![
                        child(element("h2", vec![], vec![hole(props_field("title"))])),
                        hole(props_field("children")),
                    ],
                )))],
            ))),
        ],
    )
}

/// A component that never writes its children.
///
/// ```tsx
/// export type BadgeProps = { readonly first: string; readonly label?: string; readonly children?: JsxNode };
/// export function Badge(props: BadgeProps): JsxElement {
///     return <b>{props.first}{props.label}</b>;
/// }
/// ```
fn badge_unit() -> Module {
    module(
        "Badge.tsx",
        vec![
            type_alias(
                "BadgeProps",
                ty_object(vec![
                    readonly_prop("first", ty_string()),
                    optional_prop("label", ty_string()),
                    optional_prop("children", ty_ref("JsxNode")),
                ]),
            ),
            function_item(export(func(
                "Badge",
                vec![param("props", ty_ref("BadgeProps"))],
                ty_ref("JsxElement"),
                vec![ret(markup(element(
                    "b",
                    vec![],
                    vec![hole(props_field("first")), hole(props_field("label"))],
                )))],
            ))),
        ],
    )
}

/// ```tsx
/// import { Badge } from "./Badge";
/// import * as C from "./Card";
/// export type PageProps = { readonly first: string; readonly last: string; readonly marker: JsxElement };
/// export function Page(props: PageProps): JsxElement {
///     const header = <h1>{props.first}</h1>;
///     return (
///         <>
///             {header}
///             <C.Card title={props.first + props.last}><p>{props.last}</p></C.Card>
///             <Badge first={props.first} label="x">{props.marker}</Badge>
///         </>
///     );
/// }
/// ```
fn page_unit() -> Module {
    let full_name = binary(
        string_prop(ident("props"), "first"),
        BinOp::Add,
        string_prop(ident("props"), "last"),
    );
    module(
        "Page.tsx",
        vec![
            import_named(&["Badge"], "./Badge"),
            import_ns("C", "./Card"),
            type_alias(
                "PageProps",
                ty_object(vec![
                    readonly_prop("first", ty_string()),
                    readonly_prop("last", ty_string()),
                    readonly_prop("marker", ty_ref("JsxElement")),
                ]),
            ),
            function_item(export(func(
                "Page",
                vec![param("props", ty_ref("PageProps"))],
                ty_ref("JsxElement"),
                vec![
                    const_decl(
                        "header",
                        markup(element("h1", vec![], vec![hole(props_field("first"))])),
                    ),
                    ret(markup(fragment(vec![
                        hole(ident("header")),
                        child(element(
                            "C.Card",
                            vec![attr_expr("title", full_name)],
                            vec![child(element("p", vec![], vec![hole(props_field("last"))]))],
                        )),
                        child(element(
                            "Badge",
                            vec![attr_expr("first", props_field("first")), attr_str("label", "x")],
                            vec![hole(props_field("marker"))],
                        )),
                    ]))),
                ],
            ))),
        ],
    )
}

/// ```tsx
/// export type Status = "loggedIn" | "loggedOut";
/// export type UserAvatarProps = {
///     readonly name: string;
///     readonly image?: string;
///     readonly nickname: string | null;
///     readonly score: double;
///     readonly status: Status;
/// };
/// export function UserAvatar(props: UserAvatarProps): JsxElement | null {
///     if (props.status === "loggedOut") {
///         return null;
///     }
///     return (
///         <>
///             {props.name && <p>{props.name}</p>}
///             <img src={props.image ?? "unknown.gif"} />
///             <small>{`${props.nickname} scored ${props.score}`}</small>
///         </>
///     );
/// }
/// ```
fn example_unit() -> Module {
    module(
        "Example.tsx",
        vec![
            type_alias("Status", ty_union(vec![ty_str_lit("loggedIn"), ty_str_lit("loggedOut")])),
            type_alias(
                "UserAvatarProps",
                ty_object(vec![
                    readonly_prop("name", ty_string()),
                    optional_prop("image", ty_string()),
                    readonly_prop("nickname", ty_union(vec![ty_string(), ty_null()])),
                    readonly_prop("score", ty_ref("double")),
                    readonly_prop("status", ty_ref("Status")),
                ]),
            ),
            function_item(export(func(
                "UserAvatar",
                vec![param("props", ty_ref("UserAvatarProps"))],
                ty_union(vec![ty_ref("JsxElement"), ty_null()]),
                vec![
                    if_stmt(
                        binary(props_field("status"), BinOp::StrictEq, string("loggedOut")),
                        vec![ret(null())],
                        None,
                    ),
                    ret(markup(fragment(vec![
                        hole(binary(
                            props_field("name"),
                            BinOp::And,
                            markup(element("p", vec![], vec![hole(props_field("name"))])),
                        )),
                        child(element(
                            "img",
                            vec![attr_expr(
                                "src",
                                binary(props_field("image"), BinOp::Nullish, string("unknown.gif")),
                            )],
                            vec![],
                        )),
                        child(element(
                            "small",
                            vec![],
                            vec![hole(template(
                                &["", " scored ", ""],
                                vec![props_field("nickname"), props_field("score")],
                            ))],
                        )),
                    ]))),
                ],
            ))),
        ],
    )
}
