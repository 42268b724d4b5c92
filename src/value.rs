//! Dynamic bucket-key values.
//!
//! A single [`GroupedCollection`](crate::GroupedCollection) can mix key types
//! across nesting levels (a `bool` split at the top, e-mail strings below),
//! and [`add_grouper`](crate::GroupedCollection::add_grouper) can introduce a
//! level with yet another key type at runtime. [`Value`] is the common
//! currency every grouper produces.

use std::fmt;

use itertools::Itertools;

/// A value produced by a [`Grouper`](crate::Grouper).
///
/// Scalar variants and tuples of scalars are usable as bucket keys;
/// [`List`](Value::List) and [`Map`](Value::Map) are not, and a grouper
/// returning one of those is reported as an
/// [`UnhashableGrouperResult`](crate::Error::UnhashableGrouperResult).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// The unit value.
    Unit,

    /// A boolean, e.g. from a threshold grouper.
    Bool(bool),

    /// A signed integer.
    Int(i64),

    /// A single character.
    Char(char),

    /// An owned string.
    Str(String),

    /// A fixed shape of values. Usable as a key only if every element is.
    Tuple(Vec<Value>),

    /// A sequence of values. Never usable as a key.
    List(Vec<Value>),

    /// Key-value pairs. Never usable as a key.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Returns whether this value may serve as a bucket key.
    ///
    /// # Examples
    ///
    /// ```
    /// use group_nest::Value;
    ///
    /// assert!(Value::from("carl@mail.com").usable_as_key());
    /// assert!(Value::Tuple(vec![Value::Bool(true), Value::Int(3)]).usable_as_key());
    ///
    /// assert!(!Value::Map(Vec::new()).usable_as_key());
    /// // A tuple is only as usable as its least usable element.
    /// assert!(!Value::Tuple(vec![Value::List(Vec::new())]).usable_as_key());
    /// ```
    pub fn usable_as_key(&self) -> bool {
        match self {
            Value::Unit | Value::Bool(_) | Value::Int(_) | Value::Char(_) | Value::Str(_) => true,
            Value::Tuple(elements) => elements.iter().all(Value::usable_as_key),
            Value::List(_) | Value::Map(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Char(value) => write!(f, "{value:?}"),
            Value::Str(value) => write!(f, "{value:?}"),
            Value::Tuple(elements) => write!(f, "({})", elements.iter().join(", ")),
            Value::List(elements) => write!(f, "[{}]", elements.iter().join(", ")),
            Value::Map(entries) => {
                let entries = entries
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .join(", ");
                write!(f, "{{{entries}}}")
            }
        }
    }
}

impl From<()> for Value {
    #[inline]
    fn from((): ()) -> Self {
        Value::Unit
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u16> for Value {
    #[inline]
    fn from(value: u16) -> Self {
        Value::Int(value.into())
    }
}

impl From<char> for Value {
    #[inline]
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::Tuple(vec![a.into(), b.into(), c.into()])
    }
}
