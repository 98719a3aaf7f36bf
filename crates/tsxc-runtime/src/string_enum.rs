/// Declare a string enum: one associated constant per literal.
///
/// Instances compare equal to raw strings through their literal, print as
/// their literal, and render as escaped text.
///
/// ```
/// tsxc_runtime::string_enum! {
///     pub Status {
///         hi2sss = "hi2sss",
///         loggedIn = "loggedIn",
///     }
/// }
///
/// assert_eq!(Status::loggedIn, "loggedIn");
/// assert_eq!(Status::parse("hi2sss"), Some(Status::hi2sss));
/// ```
#[macro_export]
macro_rules! string_enum {
    ($vis:vis $name:ident { $($variant:ident = $literal:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name(&'static str);

        #[allow(non_upper_case_globals)]
        impl $name {
            $(
                pub const $variant: $name = $name($literal);
            )+

            /// Every instance, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                self.0
            }

            pub fn parse(s: &str) -> ::std::option::Option<$name> {
                $name::ALL.iter().copied().find(|v| v.0 == s)
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                $name::ALL[0]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.0)
            }
        }

        impl ::std::cmp::PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl ::std::cmp::PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl ::std::cmp::PartialEq<::std::string::String> for $name {
            fn eq(&self, other: &::std::string::String) -> bool {
                self.0 == other.as_str()
            }
        }

        impl ::std::cmp::PartialEq<$name> for str {
            fn eq(&self, other: &$name) -> bool {
                self == other.0
            }
        }

        impl ::std::cmp::PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }

        impl ::std::cmp::PartialEq<$name> for ::std::string::String {
            fn eq(&self, other: &$name) -> bool {
                self.as_str() == other.0
            }
        }

        impl $crate::Render for $name {
            fn render(&self, w: &mut $crate::Writer) {
                w.append_text(self.0);
            }
        }

        impl $crate::Truthy for $name {
            fn is_truthy(&self) -> bool {
                !self.0.is_empty()
            }
        }

        impl $crate::ToValue for $name {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::Text(self.0.into())
            }
        }

        impl ::std::convert::From<$name> for $crate::Value {
            fn from(v: $name) -> Self {
                $crate::ToValue::to_value(&v)
            }
        }

        impl ::std::convert::From<$name> for $crate::Node {
            fn from(v: $name) -> Self {
                $crate::Node::from_literal(v.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{attr, is_truthy, Value};

    crate::string_enum! {
        pub Letter {
            a = "a",
            x = "x",
        }
    }

    #[test]
    fn compares_with_raw_strings() {
        assert!(Letter::a == "a");
        assert!(Letter::x != "a");
        assert!("a" == Letter::a);
        assert!(String::from("x") == Letter::x);
        assert!(Letter::x == String::from("x"));
    }

    #[test]
    fn parse_and_all() {
        assert_eq!(Letter::ALL, &[Letter::a, Letter::x]);
        assert_eq!(Letter::parse("x"), Some(Letter::x));
        assert_eq!(Letter::parse("y"), None);
        assert_eq!(Letter::default(), Letter::a);
    }

    #[test]
    fn renders_and_converts() {
        assert_eq!(Letter::x.to_string(), "x");
        assert_eq!(attr(&Letter::a), "a");
        assert!(is_truthy(&Letter::a));
        assert_eq!(Value::from(Letter::x), "x");
    }
}
