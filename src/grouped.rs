//! The recursive grouping collection.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;

use indexmap::IndexMap;

use crate::{Error, Grouper, Result, Value};

/// Items grouped into a nested hierarchy of buckets, one level per grouper.
///
/// Construction applies the first grouper to every item, partitioning the
/// input into buckets keyed by the grouper's result, then recursively groups
/// each bucket with the remaining groupers. A node with no groupers left is a
/// *leaf* holding the items themselves, in input order; every other node is
/// *interior*, holding a bucket map whose iteration order is the order in
/// which keys first occurred.
///
/// The payload type `P` of leaves defaults to `Vec<T>`. [`process`] replaces
/// every leaf payload with a transformed value of any type, consuming the
/// collection — so operations that only make sense for item sequences (`add`,
/// [`add_grouper`], [`len`]) exist only while `P = Vec<T>`.
///
/// # Examples
///
/// ```
/// use group_nest::{GroupedCollection, Grouper};
///
/// let words = ["ant", "bee", "aardvark", "bison"];
/// let grouped = GroupedCollection::new(
///     words,
///     vec![Grouper::new("initial", |word: &&str| {
///         word.chars().next().unwrap_or_default()
///     })],
/// )?;
///
/// assert_eq!(grouped.len(), 4);
/// assert_eq!(grouped.get('a')?.leaf(), Some(&vec!["ant", "aardvark"]));
/// assert_eq!(grouped.get('b')?.leaf(), Some(&vec!["bee", "bison"]));
/// # Ok::<(), group_nest::Error>(())
/// ```
///
/// [`process`]: GroupedCollection::process
/// [`add_grouper`]: GroupedCollection::add_grouper
/// [`len`]: GroupedCollection::len
pub struct GroupedCollection<T, P = Vec<T>> {
    /// Groupers for the levels below this node; empty exactly at leaves.
    groupers: Vec<Grouper<T>>,
    content: Content<T, P>,
}

enum Content<T, P> {
    Leaf(P),
    Interior(IndexMap<Value, GroupedCollection<T, P>>),
}

impl<T> GroupedCollection<T> {
    /// Groups `objects` by the given groupers, eagerly building the whole
    /// hierarchy.
    ///
    /// With no groupers the collection is a single leaf holding the objects
    /// in input order.
    ///
    /// # Errors
    ///
    /// [`Error::UnhashableGrouperResult`] if any grouper returns a value that
    /// is not [usable as a key](Value::usable_as_key), no matter how deep in
    /// the input the offending object sits. No partial collection is
    /// produced.
    pub fn new(
        objects: impl IntoIterator<Item = T>,
        groupers: Vec<Grouper<T>>,
    ) -> Result<Self> {
        Self::build(objects.into_iter().collect(), &groupers)
    }

    fn build(objects: Vec<T>, groupers: &[Grouper<T>]) -> Result<Self> {
        let Some((first, rest)) = groupers.split_first() else {
            return Ok(GroupedCollection {
                groupers: Vec::new(),
                content: Content::Leaf(objects),
            });
        };

        let mut partitioned: IndexMap<Value, Vec<T>> = IndexMap::new();
        for object in objects {
            let key = first.key_of(&object);
            if !key.usable_as_key() {
                return Err(Error::UnhashableGrouperResult {
                    grouper: first.name().to_owned(),
                });
            }
            partitioned.entry(key).or_default().push(object);
        }

        let mut buckets = IndexMap::with_capacity(partitioned.len());
        for (key, objects) in partitioned {
            buckets.insert(key, Self::build(objects, rest)?);
        }

        Ok(GroupedCollection {
            groupers: groupers.to_vec(),
            content: Content::Interior(buckets),
        })
    }

    /// A node ready to receive items for the given remaining groupers.
    fn with_groupers(groupers: Vec<Grouper<T>>) -> Self {
        let content = if groupers.is_empty() {
            Content::Leaf(Vec::new())
        } else {
            Content::Interior(IndexMap::new())
        };

        GroupedCollection { groupers, content }
    }

    /// Total number of items reachable from this node.
    pub fn len(&self) -> usize {
        match &self.content {
            Content::Leaf(items) => items.len(),
            Content::Interior(buckets) => buckets.values().map(Self::len).sum(),
        }
    }

    /// Returns whether no items are reachable from this node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `item` into the leaf its grouper keys lead to, creating any
    /// missing buckets along the way.
    ///
    /// Newly created buckets are appended after existing keys, exactly as if
    /// the item had appeared last at construction.
    ///
    /// # Errors
    ///
    /// [`Error::UnhashableGrouperResult`] if any grouper on the path rejects
    /// the item. The whole path is validated up front, so a failed `add`
    /// leaves the collection untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use group_nest::{GroupedCollection, Grouper};
    ///
    /// let mut grouped = GroupedCollection::new(
    ///     vec![1_i64, 2, 3],
    ///     vec![Grouper::new("even", |n: &i64| n % 2 == 0)],
    /// )?;
    /// grouped.add(5)?;
    ///
    /// assert_eq!(grouped.len(), 4);
    /// assert_eq!(grouped.get(false)?.leaf(), Some(&vec![1, 3, 5]));
    /// # Ok::<(), group_nest::Error>(())
    /// ```
    pub fn add(&mut self, item: T) -> Result<()> {
        let mut keys = Vec::with_capacity(self.groupers.len());
        for grouper in &self.groupers {
            let key = grouper.key_of(&item);
            if !key.usable_as_key() {
                return Err(Error::UnhashableGrouperResult {
                    grouper: grouper.name().to_owned(),
                });
            }
            keys.push(key);
        }

        self.add_at(item, &mut keys.into_iter());
        Ok(())
    }

    fn add_at(&mut self, item: T, keys: &mut std::vec::IntoIter<Value>) {
        match (&mut self.content, keys.next()) {
            (Content::Leaf(items), _) => items.push(item),
            (Content::Interior(buckets), Some(key)) => {
                let rest = self.groupers[1..].to_vec();
                buckets
                    .entry(key)
                    .or_insert_with(|| Self::with_groupers(rest))
                    .add_at(item, keys);
            }
            (Content::Interior(_), None) => {
                unreachable!("one key is produced per remaining grouper")
            }
        }
    }

    /// Deepens the hierarchy by one level: every current leaf is re-grouped
    /// by `grouper`.
    ///
    /// The result is the collection that would have been built had `grouper`
    /// been appended to the original grouper list.
    ///
    /// # Errors
    ///
    /// [`Error::UnhashableGrouperResult`] if `grouper` rejects any item.
    /// Every leaf is validated before any is re-grouped, so a failure leaves
    /// the collection untouched.
    pub fn add_grouper(&mut self, grouper: Grouper<T>) -> Result<()> {
        self.check_grouper(&grouper)?;
        self.push_grouper(grouper);
        Ok(())
    }

    fn check_grouper(&self, grouper: &Grouper<T>) -> Result<()> {
        match &self.content {
            Content::Leaf(items) => {
                for item in items {
                    if !grouper.key_of(item).usable_as_key() {
                        return Err(Error::UnhashableGrouperResult {
                            grouper: grouper.name().to_owned(),
                        });
                    }
                }
                Ok(())
            }
            Content::Interior(buckets) => buckets
                .values()
                .try_for_each(|child| child.check_grouper(grouper)),
        }
    }

    /// Every key must already have been validated with
    /// [`check_grouper`](Self::check_grouper).
    fn push_grouper(&mut self, grouper: Grouper<T>) {
        match &mut self.content {
            Content::Leaf(items) => {
                let mut partitioned: IndexMap<Value, Vec<T>> = IndexMap::new();
                for item in std::mem::take(items) {
                    partitioned.entry(grouper.key_of(&item)).or_default().push(item);
                }

                let buckets = partitioned
                    .into_iter()
                    .map(|(key, items)| {
                        let leaf = GroupedCollection {
                            groupers: Vec::new(),
                            content: Content::Leaf(items),
                        };
                        (key, leaf)
                    })
                    .collect();
                self.content = Content::Interior(buckets);
            }
            Content::Interior(buckets) => {
                for child in buckets.values_mut() {
                    child.push_grouper(grouper.clone());
                }
            }
        }

        self.groupers.push(grouper);
    }
}

impl<T, P> GroupedCollection<T, P> {
    /// Returns the child collection in the bucket for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent, or if this node is a leaf
    /// and has no buckets.
    pub fn get(&self, key: impl Into<Value>) -> Result<&Self> {
        let key = key.into();
        match &self.content {
            Content::Interior(buckets) => match buckets.get(&key) {
                Some(child) => Ok(child),
                None => Err(Error::KeyNotFound { key }),
            },
            Content::Leaf(_) => Err(Error::KeyNotFound { key }),
        }
    }

    /// Iterates over this node's bucket keys in insertion order.
    ///
    /// A leaf has no buckets, so its `keys()` yields nothing.
    pub fn keys(&self) -> Keys<'_, T, P> {
        Keys {
            inner: match &self.content {
                Content::Interior(buckets) => Some(buckets.keys()),
                Content::Leaf(_) => None,
            },
        }
    }

    /// Returns the payload if this node is a leaf, `None` otherwise.
    pub fn leaf(&self) -> Option<&P> {
        match &self.content {
            Content::Leaf(payload) => Some(payload),
            Content::Interior(_) => None,
        }
    }

    /// Number of nesting levels below this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.groupers.len()
    }

    /// Replaces every leaf payload with `transform(payload)`, preserving the
    /// interior structure and bucket order.
    ///
    /// The transform may change the payload type; the collection is consumed
    /// and rebuilt around the new payloads. This is how
    /// [`CountingGroupedCollection`](crate::CountingGroupedCollection)
    /// collapses item lists into counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use group_nest::{GroupedCollection, Grouper};
    ///
    /// let grouped = GroupedCollection::new(
    ///     vec![1_i64, 2, 3],
    ///     vec![Grouper::new("even", |n: &i64| n % 2 == 0)],
    /// )?;
    /// let sums = grouped.process(|items| items.iter().sum::<i64>());
    ///
    /// assert_eq!(sums.get(false)?.leaf(), Some(&4));
    /// assert_eq!(sums.get(true)?.leaf(), Some(&2));
    /// # Ok::<(), group_nest::Error>(())
    /// ```
    pub fn process<R, F>(self, mut transform: F) -> GroupedCollection<T, R>
    where
        F: FnMut(P) -> R,
    {
        self.process_inner(&mut transform)
    }

    fn process_inner<R, F>(self, transform: &mut F) -> GroupedCollection<T, R>
    where
        F: FnMut(P) -> R,
    {
        GroupedCollection {
            groupers: self.groupers,
            content: match self.content {
                Content::Leaf(payload) => Content::Leaf(transform(payload)),
                Content::Interior(buckets) => Content::Interior(
                    buckets
                        .into_iter()
                        .map(|(key, child)| (key, child.process_inner(transform)))
                        .collect(),
                ),
            },
        }
    }

    /// Visits every leaf together with the bucket keys leading to it, and
    /// collects the results.
    ///
    /// Leaves are visited depth-first, following bucket insertion order at
    /// each level, so the output order matches what nested [`keys`] loops
    /// would produce. Unlike [`process`] this does not mutate the collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use group_nest::{GroupedCollection, Grouper};
    ///
    /// let grouped = GroupedCollection::new(
    ///     vec![1_i64, 2, 3],
    ///     vec![Grouper::new("even", |n: &i64| n % 2 == 0)],
    /// )?;
    /// let rows = grouped.process_with(|items, path| {
    ///     format!("{}: {} item(s)", path[0], items.len())
    /// });
    ///
    /// assert_eq!(rows, ["false: 2 item(s)", "true: 1 item(s)"]);
    /// # Ok::<(), group_nest::Error>(())
    /// ```
    ///
    /// [`keys`]: GroupedCollection::keys
    /// [`process`]: GroupedCollection::process
    pub fn process_with<R, F>(&self, mut processor: F) -> Vec<R>
    where
        F: FnMut(&P, &[Value]) -> R,
    {
        let mut results = Vec::new();
        self.process_with_inner(&mut processor, &mut Vec::new(), &mut results);
        results
    }

    fn process_with_inner<R, F>(
        &self,
        processor: &mut F,
        path: &mut Vec<Value>,
        results: &mut Vec<R>,
    ) where
        F: FnMut(&P, &[Value]) -> R,
    {
        match &self.content {
            Content::Leaf(payload) => results.push(processor(payload, path)),
            Content::Interior(buckets) => {
                for (key, child) in buckets {
                    path.push(key.clone());
                    child.process_with_inner(processor, path, results);
                    path.pop();
                }
            }
        }
    }
}

/// Structural equality: leaf payloads compare in order, bucket maps compare
/// key-by-key regardless of insertion order. Groupers take no part in it.
impl<T, P: PartialEq> PartialEq for GroupedCollection<T, P> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.content, &other.content) {
            (Content::Leaf(a), Content::Leaf(b)) => a == b,
            (Content::Interior(a), Content::Interior(b)) => a == b,
            _ => false,
        }
    }
}

impl<T, P: Eq> Eq for GroupedCollection<T, P> {}

impl<T, P: Clone> Clone for GroupedCollection<T, P> {
    fn clone(&self) -> Self {
        GroupedCollection {
            groupers: self.groupers.clone(),
            content: match &self.content {
                Content::Leaf(payload) => Content::Leaf(payload.clone()),
                Content::Interior(buckets) => Content::Interior(buckets.clone()),
            },
        }
    }
}

/// Renders as the nested map it represents: leaves as their payload, interior
/// nodes as `{key: child, ...}` in bucket insertion order.
impl<T, P: fmt::Debug> fmt::Debug for GroupedCollection<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Content::Leaf(payload) => payload.fmt(f),
            Content::Interior(buckets) => f
                .debug_map()
                .entries(buckets.iter().map(|(key, child)| (KeyFmt(key), child)))
                .finish(),
        }
    }
}

/// Formats bucket keys with `Display` inside `Debug` output, so a `bool` key
/// renders as `true` rather than `Bool(true)`.
struct KeyFmt<'a>(&'a Value);

impl fmt::Debug for KeyFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

/// Panicking bucket lookup, the counterpart of [`GroupedCollection::get`]
/// with map-index ergonomics: `&grouped[true]["mary@mail.com"]`.
///
/// # Panics
///
/// Panics if the key is absent or the node is a leaf, like `HashMap`'s
/// `Index` does.
impl<T, P, Q: Into<Value>> Index<Q> for GroupedCollection<T, P> {
    type Output = Self;

    fn index(&self, key: Q) -> &Self {
        match self.get(key) {
            Ok(child) => child,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Iterator over a node's bucket keys in insertion order.
///
/// This struct is created by [`GroupedCollection::keys`].
pub struct Keys<'a, T, P> {
    inner: Option<indexmap::map::Keys<'a, Value, GroupedCollection<T, P>>>,
}

impl<'a, T, P> Iterator for Keys<'a, T, P> {
    type Item = &'a Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(keys) => keys.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<T, P> ExactSizeIterator for Keys<'_, T, P> {
    fn len(&self) -> usize {
        match &self.inner {
            Some(keys) => keys.len(),
            None => 0,
        }
    }
}

impl<T, P> FusedIterator for Keys<'_, T, P> {}

impl<T, P> Clone for Keys<'_, T, P> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<T, P> fmt::Debug for Keys<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
