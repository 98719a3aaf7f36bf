//! End-to-end tests: components generated by the pipeline, rendered by the
//! runtime.
//!
//! Tests validate:
//! - `{x && z}` writes nothing for `false` and `z` for `true`
//! - Component children are deferred and never run when the callee ignores them
//! - Markup bound to a local and props read again later both reach the output
//! - Imported components receive optional props as `Some(..)`
//! - Null returns, string enums, `??` attributes and template holes

use std::cell::Cell;
use std::rc::Rc;

use tsxc_fixtures::generated::example::{Status, UserAvatar, UserAvatarProps};
use tsxc_fixtures::generated::gate::{Gate, GateProps};
use tsxc_fixtures::generated::page::{Page, PageProps};
use tsxc_runtime::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// An element that writes `<i>z</i>` and counts how often it ran.
fn counted() -> (Element, Rc<Cell<usize>>) {
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    let element = Element::new(move |w: &mut Writer| {
        counter.set(counter.get() + 1);
        w.append_raw("<i>z</i>");
    });
    (element, runs)
}

fn avatar(status: Status) -> UserAvatarProps {
    UserAvatarProps::new("Axel".into(), Some("ax".into()), 2.5, status)
}

// ══════════════════════════════════════════════════════════════════════════════
// Gate
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn false_gate_renders_an_empty_div() {
    let (z, runs) = counted();
    assert_eq!(render(&Gate(GateProps::new(false, z))), "<div></div>");
    assert_eq!(runs.get(), 0);
}

#[test]
fn true_gate_writes_its_element() {
    let (z, runs) = counted();
    assert_eq!(render(&Gate(GateProps::new(true, z))), "<div><i>z</i></div>");
    assert_eq!(runs.get(), 1);
}

// ══════════════════════════════════════════════════════════════════════════════
// Page
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn page_renders_header_card_and_badge() {
    let (marker, _) = counted();
    let html = render(&Page(PageProps::new("Ada".into(), "Lovelace".into(), marker)));
    assert_eq!(
        html,
        "<h1>Ada</h1>\
         <section><h2>AdaLovelace</h2><p>Lovelace</p></section>\
         <b>Adax</b>"
    );
}

#[test]
fn children_the_badge_ignores_never_run() {
    let (marker, runs) = counted();
    let page = Page(PageProps::new("Ada".into(), "Lovelace".into(), marker));
    render(&page);
    render(&page);
    assert_eq!(runs.get(), 0);
}

#[test]
fn page_text_is_escaped() {
    let (marker, _) = counted();
    let html = render(&Page(PageProps::new("<A>".into(), "&".into(), marker)));
    assert!(html.starts_with("<h1>&lt;A&gt;</h1>"));
    assert!(html.contains("<h2>&lt;A&gt;&amp;</h2>"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Example
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn logged_out_user_renders_nothing() {
    assert!(UserAvatar(avatar(Status::loggedOut)).is_none());
}

#[test]
fn logged_in_user_renders_the_avatar() {
    let Some(element) = UserAvatar(avatar(Status::loggedIn)) else {
        panic!("expected an element");
    };
    assert_eq!(
        render(&element),
        "<p>Axel</p><img src=\"unknown.gif\"/><small>ax scored 2.5</small>"
    );
}

#[test]
fn avatar_image_and_null_holes() {
    let props = UserAvatarProps {
        name: String::new(),
        image: Some("a&b.gif".into()),
        nickname: None,
        score: -0.0,
        ..avatar(Status::loggedIn)
    };
    let Some(element) = UserAvatar(props) else {
        panic!("expected an element");
    };
    assert_eq!(
        render(&element),
        "<img src=\"a&amp;b.gif\"/><small>null scored 0</small>"
    );
}
