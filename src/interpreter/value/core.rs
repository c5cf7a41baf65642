use std::{cmp::Ordering, rc::Rc};

use crate::ast::LiteralValue;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible values that can be bound to a variable,
/// passed as an argument, returned from a function or printed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// An immutable string. Cloning only bumps a reference count.
    Str(Rc<str>),
    /// A boolean value (`true` or `false`).
    /// Produced by literals, comparisons and `!`. Behaves as `0` / `1` in
    /// arithmetic.
    Bool(bool),
    /// The absence of a value, produced by a call that finishes without
    /// `return`.
    Nil,
}

/// A value viewed as a number.
///
/// Booleans are promoted to integers, so `true + 1` is `2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Exact integer.
    Integer(i64),
    /// Floating-point number.
    Real(f64),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v.into())
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Real(r) => (*r).into(),
            LiteralValue::Str(s) => Self::Str(Rc::clone(s)),
            LiteralValue::Bool(b) => (*b).into(),
        }
    }
}

impl Value {
    /// Returns the truthiness of the value.
    ///
    /// `false`, `0`, `0.0`, the empty string and `nil` are falsy. Every other
    /// value is truthy. Used by `if`, `while`, `!`, `&&` and `||`.
    ///
    /// # Example
    /// ```
    /// use plume::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(3).is_truthy());
    /// assert!(!Value::Integer(0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(!Value::Nil.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Nil => false,
        }
    }

    /// Views the value as a number, if it is one.
    ///
    /// Integers and reals map directly, booleans become `0` or `1`. Strings
    /// and `nil` have no numeric view.
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Integer(n) => Some(Number::Integer(*n)),
            Self::Real(r) => Some(Number::Real(*r)),
            Self::Bool(b) => Some(Number::Integer(*b as i64)),
            Self::Str(_) | Self::Nil => None,
        }
    }

    /// Returns a short, user-facing name of the value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Nil => "nil",
        }
    }

    /// Structural equality used by `==` and `!=`.
    ///
    /// Numbers compare by numeric value across integer, real and boolean, so
    /// `1 == 1.0` and `true == 1` hold. Values of unrelated kinds are never
    /// equal.
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Nil, Self::Nil) => true,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.compare(b) == Some(Ordering::Equal),
                _ => false,
            },
        }
    }
}

impl Number {
    /// Converts the number to `f64`.
    ///
    /// Integers beyond 2^53 in magnitude round to the nearest representable
    /// real.
    ///
    /// # Example
    /// ```
    /// use plume::interpreter::value::core::Number;
    ///
    /// assert_eq!(Number::Integer(3).to_real(), 3.0);
    /// assert_eq!(Number::Integer(9_007_199_254_740_993).to_real(), 9_007_199_254_740_992.0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn to_real(self) -> f64 {
        match self {
            Self::Integer(i) => i as f64,
            Self::Real(r) => r,
        }
    }

    /// Orders two numbers. Integers compare exactly; anything involving a
    /// real compares as `f64`, and `NaN` is unordered.
    #[must_use]
    pub fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(&b)),
            _ => self.to_real().partial_cmp(&other.to_real()),
        }
    }
}

/// Formats a real number so that it always reads back as a real.
///
/// Whole numbers keep one fractional digit (`2.0`), everything else uses the
/// shortest representation that round-trips.
///
/// # Example
/// ```
/// use plume::interpreter::value::core::format_real;
///
/// assert_eq!(format_real(2.0), "2.0");
/// assert_eq!(format_real(-0.25), "-0.25");
/// assert_eq!(format_real(f64::NAN), "nan");
/// ```
#[must_use]
pub fn format_real(r: f64) -> String {
    if r.is_nan() {
        "nan".to_string()
    } else if r.is_infinite() {
        if r > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if r.fract() == 0.0 {
        format!("{r:.1}")
    } else {
        format!("{r}")
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Nil => write!(f, "nil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_literal_forms() {
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        assert_eq!(Value::Real(5.0).to_string(), "5.0");
        assert_eq!(Value::Real(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Nil.to_string(), "nil");
    }

    #[test]
    fn numeric_equality_crosses_kinds() {
        assert!(Value::Integer(1).loosely_equals(&Value::Real(1.0)));
        assert!(Value::Bool(true).loosely_equals(&Value::Integer(1)));
        assert!(!Value::from("1").loosely_equals(&Value::Integer(1)));
        assert!(!Value::Nil.loosely_equals(&Value::Bool(false)));
        assert!(!Value::Real(f64::NAN).loosely_equals(&Value::Real(f64::NAN)));
    }

    #[test]
    fn booleans_have_a_numeric_view() {
        assert_eq!(Value::Bool(false).as_number(), Some(Number::Integer(0)));
        assert_eq!(Value::from("x").as_number(), None);
        assert_eq!(Value::Nil.as_number(), None);
    }
}
