//! Dynamic operand values and the short-circuit logical helpers.

use crate::{Element, Node, Render, Truthy, Writer};
use std::fmt;
use std::rc::Rc;

/// The result of `&&` / `||` over operands of arbitrary type.
///
/// Renders and tests for truthiness exactly like the operand it came from.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(Rc<str>),
    Node(Node),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::UInt(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

/// `a && b`: `b` when `a` is truthy, otherwise `a`. `rhs` runs only when needed.
pub fn and<L, R, F>(lhs: &L, rhs: F) -> Value
where
    L: Truthy + ToValue + ?Sized,
    R: ToValue,
    F: FnOnce() -> R,
{
    if lhs.is_truthy() {
        rhs().to_value()
    } else {
        lhs.to_value()
    }
}

/// A template-string hole: formats the operand like JavaScript's
/// `String(value)`, so `None` prints `null` and `-0` prints `0`.
pub fn display<T: ToValue + ?Sized>(value: &T) -> Value {
    value.to_value()
}

/// `a || b`: `a` when `a` is truthy, otherwise `b`. `rhs` runs only when needed.
pub fn or<L, R, F>(lhs: &L, rhs: F) -> Value
where
    L: Truthy + ToValue + ?Sized,
    R: ToValue,
    F: FnOnce() -> R,
{
    if lhs.is_truthy() {
        lhs.to_value()
    } else {
        rhs().to_value()
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => n.is_truthy(),
            Value::UInt(n) => n.is_truthy(),
            Value::Float(n) => n.is_truthy(),
            Value::Text(s) => s.is_truthy(),
            Value::Node(_) => true,
        }
    }
}

impl Render for Value {
    fn render(&self, w: &mut Writer) {
        match self {
            Value::Null | Value::Bool(_) => {}
            Value::Int(n) => n.render(w),
            Value::UInt(n) => n.render(w),
            Value::Float(n) => n.render(w),
            Value::Text(s) => s.render(w),
            Value::Node(node) => node.render(w),
        }
    }

    fn render_attr(&self, w: &mut Writer) {
        match self {
            Value::Bool(b) => b.render_attr(w),
            other => other.render(w),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(n) if *n == 0.0 => write!(f, "0"),
            Value::Float(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Node(_) => write!(f, "[node]"),
        }
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        match v {
            Value::Null | Value::Bool(_) => Node::empty(),
            Value::Int(n) => Node::from_literal(n),
            Value::UInt(n) => Node::from_literal(n),
            Value::Float(n) => Node::from_literal(n),
            Value::Text(s) => Node::from_literal(s),
            Value::Node(node) => node,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Equality
// ══════════════════════════════════════════════════════════════════════════════

/// Strict equality; numbers compare by value across widths.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if &**s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

macro_rules! value_eq_number {
    ($($t:ty),*) => {
        $(
            impl PartialEq<$t> for Value {
                fn eq(&self, other: &$t) -> bool {
                    *self == Value::from(*other)
                }
            }
        )*
    };
}

value_eq_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

// ══════════════════════════════════════════════════════════════════════════════
// Conversions
// ══════════════════════════════════════════════════════════════════════════════

/// Borrowing conversion into [`Value`], used by [`and`] / [`or`] so
/// operands need not be moved.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.into())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.as_str().into())
    }
}

impl ToValue for Rc<str> {
    fn to_value(&self) -> Value {
        Value::Text(Rc::clone(self))
    }
}

impl ToValue for Node {
    fn to_value(&self) -> Value {
        Value::Node(self.clone())
    }
}

impl ToValue for Element {
    fn to_value(&self) -> Value {
        Value::Node(Node::from_element(self.clone()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Node(Node::from_array(
            self.iter().map(|v| Node::from(v.to_value())).collect(),
        ))
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

macro_rules! to_value_number {
    ($variant:ident($target:ty): $($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $target)
                }
            }

            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    v.to_value()
                }
            }
        )*
    };
}

to_value_number!(Int(i64): i8, i16, i32, i64, isize);
to_value_number!(UInt(u64): u8, u16, u32, u64, usize);
to_value_number!(Float(f64): f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        v.to_value()
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v.into())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        v.to_value()
    }
}

impl From<Node> for Value {
    fn from(v: Node) -> Self {
        Value::Node(v)
    }
}

impl From<Element> for Value {
    fn from(v: Element) -> Self {
        Value::Node(Node::from_element(v))
    }
}

impl<T: ToValue> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.to_value()
    }
}

impl<T: ToValue> From<&Option<T>> for Value {
    fn from(v: &Option<T>) -> Self {
        v.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn and_returns_the_deciding_operand() {
        assert_eq!(and(&0, || "x"), 0);
        assert_eq!(and(&true, || "x"), "x");
        assert_eq!(and("", || 5), "");
        assert_eq!(and(&Some(3), || &false), false);
    }

    #[test]
    fn or_returns_the_deciding_operand() {
        assert_eq!(or(&None::<i32>, || "y"), "y");
        assert_eq!(or("z", || "y"), "z");
        assert_eq!(or(&0.0, || 2u8), 2);
    }

    #[test]
    fn rhs_runs_only_when_needed() {
        let calls = Cell::new(0);
        let rhs = || {
            calls.set(calls.get() + 1);
            "r"
        };
        and(&false, rhs);
        or(&1, rhs);
        assert_eq!(calls.get(), 0);
        and(&1, rhs);
        or(&false, rhs);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn numbers_compare_across_widths() {
        assert_eq!(Value::from(3u8), Value::from(3i64));
        assert_eq!(Value::from(2.0f64), 2);
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::Null, Value::Bool(false));
    }

    #[test]
    fn value_truthiness_matches_operand() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(Value::from(Element::empty()).is_truthy());
    }

    #[test]
    fn rendering_skips_null_and_booleans() {
        let mut w = Writer::new();
        w.append(&Value::Null)
            .append(&Value::Bool(true))
            .append(&Value::from("<b>"))
            .append(&Value::from(-4));
        assert_eq!(w.finish(), "&lt;b&gt;-4");
    }

    #[test]
    fn display_formatting() {
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from("t").to_string(), "t");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn template_holes_format_like_strings() {
        let title: Option<String> = None;
        assert_eq!(format!("[{}]", display(&title)), "[null]");
        assert_eq!(format!("{}", display(&Some("x".to_string()))), "x");
        assert_eq!(format!("{}px", display(&12)), "12px");
        assert_eq!(format!("{}", display("a & b")), "a & b");
    }
}
