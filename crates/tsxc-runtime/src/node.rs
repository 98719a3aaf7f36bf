//! Markup values: deferred [`Element`] closures and composite [`Node`]s.

use crate::{Render, Writer};
use std::fmt;
use std::rc::Rc;

// ══════════════════════════════════════════════════════════════════════════════
// Element
// ══════════════════════════════════════════════════════════════════════════════

/// A piece of markup that writes itself when invoked.
///
/// Nothing is written until [`Element::write_to`] runs, so an element passed
/// to a component that never renders it costs nothing. Elements are cheap to
/// clone and are not `Send`.
#[derive(Clone, Default)]
pub struct Element(Option<Rc<dyn Fn(&mut Writer)>>);

impl Element {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Writer) + 'static,
    {
        Self(Some(Rc::new(f)))
    }

    /// An element that writes nothing.
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn write_to(&self, w: &mut Writer) {
        if let Some(f) = &self.0 {
            f(w);
        }
    }

    /// Identity comparison: two elements are equal when they share a closure.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const (),
            _ => false,
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Element(empty)")
        } else {
            write!(f, "Element(..)")
        }
    }
}

impl Render for Element {
    fn render(&self, w: &mut Writer) {
        self.write_to(w);
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Literal
// ══════════════════════════════════════════════════════════════════════════════

/// A primitive leaf of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    UInt(u64),
    Float(f64),
    Float32(f32),
    Text(Rc<str>),
}

impl Render for Literal {
    fn render(&self, w: &mut Writer) {
        match self {
            Literal::Int(n) => n.render(w),
            Literal::UInt(n) => n.render(w),
            Literal::Float(n) => n.render(w),
            Literal::Float32(n) => n.render(w),
            Literal::Text(s) => s.render(w),
        }
    }
}

macro_rules! literal_from {
    ($variant:ident($target:ty): $($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(v: $t) -> Self {
                    Literal::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

literal_from!(Int(i64): i8, i16, i32, i64);
literal_from!(UInt(u64): u8, u16, u32, u64);
literal_from!(Float(f64): f64);
literal_from!(Float32(f32): f32);

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Text(v.into())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Text(v.into())
    }
}

impl From<Rc<str>> for Literal {
    fn from(v: Rc<str>) -> Self {
        Literal::Text(v)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Node
// ══════════════════════════════════════════════════════════════════════════════

/// Zero or more renderable things, written in construction order.
///
/// Building a node never writes anything; elements inside it run only when
/// the node itself is written.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Array(Rc<[Node]>),
    Element(Element),
    Literal(Literal),
}

impl Default for Node {
    fn default() -> Self {
        Node::empty()
    }
}

impl Node {
    /// An empty array node.
    pub fn empty() -> Self {
        Node::Array(Rc::from(Vec::new()))
    }

    pub fn from_element(element: Element) -> Self {
        Node::Element(element)
    }

    pub fn from_closure<F>(f: F) -> Self
    where
        F: Fn(&mut Writer) + 'static,
    {
        Node::Element(Element::new(f))
    }

    /// A text or numeric leaf; text is escaped when written.
    pub fn from_literal(literal: impl Into<Literal>) -> Self {
        Node::Literal(literal.into())
    }

    pub fn from_array(nodes: Vec<Node>) -> Self {
        Node::Array(Rc::from(nodes))
    }

    /// Convert any value with a node representation.
    pub fn from_value(value: impl Into<Node>) -> Self {
        value.into()
    }

    pub fn write_to(&self, w: &mut Writer) {
        match self {
            Node::Array(nodes) => {
                for node in nodes.iter() {
                    node.write_to(w);
                }
            }
            Node::Element(element) => element.write_to(w),
            Node::Literal(literal) => literal.render(w),
        }
    }

    /// Leaves (elements and literals) in document order.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Whether the node has no leaves at all.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl Render for Node {
    fn render(&self, w: &mut Writer) {
        self.write_to(w);
    }
}

/// Depth-first iterator over the leaves of a [`Node`].
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Array(children) => self.stack.extend(children.iter().rev()),
                leaf => return Some(leaf),
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = NodeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── Conversions ──

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<&Element> for Node {
    fn from(e: &Element) -> Self {
        Node::Element(e.clone())
    }
}

impl From<&Node> for Node {
    fn from(n: &Node) -> Self {
        n.clone()
    }
}

impl From<Literal> for Node {
    fn from(l: Literal) -> Self {
        Node::Literal(l)
    }
}

macro_rules! node_from_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(v: $t) -> Self {
                    Node::Literal(v.into())
                }
            }
        )*
    };
}

node_from_literal!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, &str, String, Rc<str>);

impl From<&String> for Node {
    fn from(v: &String) -> Self {
        Node::Literal(v.as_str().into())
    }
}

/// Booleans are not rendered, so they become an empty node.
impl From<bool> for Node {
    fn from(_: bool) -> Self {
        Node::empty()
    }
}

impl From<()> for Node {
    fn from(_: ()) -> Self {
        Node::empty()
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Node::empty, Into::into)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(v: Vec<T>) -> Self {
        Node::from_array(v.into_iter().map(Into::into).collect())
    }
}
