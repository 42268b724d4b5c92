use std::fmt;
use std::rc::Rc;

use crate::Value;

/// A named key function deciding which bucket an item belongs to.
///
/// The name is reported back in
/// [`UnhashableGrouperResult`](crate::Error::UnhashableGrouperResult) errors,
/// so diagnostics can point at the offending grouper even when it is buried
/// in a stack of them.
///
/// Cloning is cheap: the function is shared, not copied. Every node of a
/// [`GroupedCollection`](crate::GroupedCollection) holds the groupers for the
/// levels below it, so one grouper is shared by many nodes.
///
/// # Examples
///
/// ```
/// use group_nest::Grouper;
///
/// let by_parity = Grouper::new("even", |n: &i64| n % 2 == 0);
///
/// assert_eq!(by_parity.name(), "even");
/// assert_eq!(by_parity.key_of(&4), true.into());
/// assert_eq!(by_parity.key_of(&7), false.into());
/// ```
pub struct Grouper<T> {
    name: String,
    func: Rc<dyn Fn(&T) -> Value>,
}

impl<T> Grouper<T> {
    /// Creates a grouper from a name and a key function.
    ///
    /// The function may return any type convertible into [`Value`], so plain
    /// `bool`, integer, or string expressions work directly.
    pub fn new<F, K>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&T) -> K + 'static,
        K: Into<Value>,
    {
        Grouper {
            name: name.into(),
            func: Rc::new(move |item| func(item).into()),
        }
    }

    /// Returns the name given at construction.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the key function to `item`.
    #[inline]
    pub fn key_of(&self, item: &T) -> Value {
        (self.func)(item)
    }
}

impl<T> Clone for Grouper<T> {
    fn clone(&self) -> Self {
        Grouper {
            name: self.name.clone(),
            func: Rc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for Grouper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouper")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
