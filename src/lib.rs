//! Group items into a nested hierarchy of buckets with a list of key
//! functions.
//!
//! A [`GroupedCollection`] takes a sequence of items and an ordered list of
//! [`Grouper`]s. The first grouper splits the items into buckets, the second
//! splits every bucket into sub-buckets, and so on — one nesting level per
//! grouper, with the original items sitting at the leaves in input order.
//!
//! # Motivation
//!
//! Suppose we have a list of orders and want them split by "placed after
//! 2013", and within that, by customer:
//!
//! ```
//! use group_nest::{GroupedCollection, Grouper};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Order {
//!     year: u16,
//!     email: &'static str,
//!     product: &'static str,
//! }
//!
//! let orders = vec![
//!     Order { year: 2013, email: "carl@mail.com", product: "Computer" },
//!     Order { year: 2014, email: "mary@mail.com", product: "Lamp" },
//!     Order { year: 2016, email: "eggs@mail.com", product: "Desk" },
//!     Order { year: 2016, email: "mary@mail.com", product: "TV" },
//! ];
//!
//! let grouped = GroupedCollection::new(orders, vec![
//!     Grouper::new("recent", |o: &Order| o.year > 2013),
//!     Grouper::new("email", |o: &Order| o.email),
//! ])?;
//!
//! // Two of the four orders are recent ones by Mary, still in input order.
//! let mary = grouped[true]["mary@mail.com"].leaf().unwrap();
//! assert_eq!(mary[0].product, "Lamp");
//! assert_eq!(mary[1].product, "TV");
//!
//! assert_eq!(grouped[false]["carl@mail.com"].leaf().unwrap().len(), 1);
//! assert_eq!(grouped.len(), 4);
//! # Ok::<(), group_nest::Error>(())
//! ```
//!
//! The hierarchy stays live after construction:
//!
//! - [`add`](GroupedCollection::add) routes a new item to its leaf, creating
//!   buckets on demand;
//! - [`add_grouper`](GroupedCollection::add_grouper) deepens every leaf by
//!   one more level;
//! - [`process`](GroupedCollection::process) swaps every leaf payload for a
//!   derived value (counts, sums, whatever the transform returns);
//! - [`process_with`](GroupedCollection::process_with) walks the leaves with
//!   the bucket keys that lead to them, for building flat reports out of a
//!   nested grouping.
//!
//! # Counting
//!
//! [`CountingGroupedCollection`] is the grouping-then-`process` shortcut for
//! the most common transform, counting:
//!
//! ```
//! use group_nest::{CountingGroupedCollection, Grouper};
//!
//! let counter =
//!     CountingGroupedCollection::new(0..10, Grouper::new("small", |n: &i32| *n < 5))?;
//!
//! assert_eq!(counter[true], 5);
//! assert_eq!(counter[false], 5);
//! # Ok::<(), group_nest::Error>(())
//! ```
//!
//! # Keys
//!
//! Groupers return [`Value`], a dynamic key type, so different levels can be
//! keyed by different types (a `bool` above, e-mail strings below) and
//! [`add_grouper`](GroupedCollection::add_grouper) can bring in a new key
//! type at runtime. Values that cannot serve as map keys (lists, maps) are
//! rejected with an error naming the grouper that produced them — before
//! anything is mutated, so a failed operation never leaves a half-updated
//! hierarchy behind.
//!
//! Bucket iteration follows first-occurrence order, making every traversal
//! deterministic for a given input order. Equality between collections
//! compares bucket contents key-by-key, so two hierarchies built from inputs
//! that only differ in the order *across* buckets compare equal, while item
//! order *within* a leaf still matters.

mod counting;
mod error;
mod grouped;
mod grouper;
mod value;

pub use counting::*;
pub use error::*;
pub use grouped::*;
pub use grouper::*;
pub use value::*;
