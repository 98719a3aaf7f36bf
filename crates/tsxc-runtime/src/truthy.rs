//! JavaScript-like truthiness.

use crate::{Element, Node};
use std::rc::Rc;

/// "Non-empty / non-zero / non-null".
///
/// Numbers are truthy when non-zero (and, for floats, not NaN); text when
/// non-empty; `Option` when `Some` of a truthy value. Collections, nodes and
/// elements are always truthy.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

/// Free-function form used by generated code: `is_truthy(&value)`.
pub fn is_truthy<T: Truthy + ?Sized>(value: &T) -> bool {
    value.is_truthy()
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Rc<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

macro_rules! truthy_integer {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

truthy_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for char {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T> Truthy for [T] {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for Node {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for Element {
    fn is_truthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert!(!is_truthy(&0));
        assert!(is_truthy(&-3i64));
        assert!(!is_truthy(&0u8));
        assert!(!is_truthy(&0.0f64));
        assert!(!is_truthy(&-0.0f32));
        assert!(!is_truthy(&f64::NAN));
        assert!(is_truthy(&0.1f64));
        assert!(is_truthy(&f64::INFINITY));
    }

    #[test]
    fn text() {
        assert!(!is_truthy(""));
        assert!(is_truthy("0"));
        assert!(!is_truthy(&String::new()));
        assert!(is_truthy(&String::from("false")));
    }

    #[test]
    fn options_delegate_to_inner_value() {
        assert!(!is_truthy(&None::<i32>));
        assert!(!is_truthy(&Some(0)));
        assert!(is_truthy(&Some("x")));
        assert!(!is_truthy(&Some(String::new())));
    }

    #[test]
    fn containers_and_markup_are_always_truthy() {
        assert!(is_truthy(&Vec::<i32>::new()));
        assert!(is_truthy(&Node::empty()));
        assert!(is_truthy(&Element::empty()));
    }
}
