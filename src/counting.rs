use std::fmt;
use std::ops::Index;

use crate::{GroupedCollection, Grouper, Keys, Result, Value};

/// Counts items per bucket instead of collecting them.
///
/// This is a single-level [`GroupedCollection`] whose leaves have been
/// collapsed to their item counts with
/// [`process`](GroupedCollection::process). The collapse is permanent: a
/// count cannot take more items, so there is no `add` here — the restriction
/// the payload type enforces at compile time.
///
/// # Examples
///
/// ```
/// use group_nest::{CountingGroupedCollection, Grouper};
///
/// let counter =
///     CountingGroupedCollection::new(0..10, Grouper::new("small", |n: &i32| *n < 5))?;
///
/// assert_eq!(counter.get(true)?, 5);
/// assert_eq!(counter.get(false)?, 5);
/// assert_eq!(counter.len(), 10);
/// # Ok::<(), group_nest::Error>(())
/// ```
pub struct CountingGroupedCollection<T> {
    inner: GroupedCollection<T, usize>,
}

impl<T> CountingGroupedCollection<T> {
    /// Groups `items` by the single grouper `by` and collapses each bucket to
    /// its count.
    ///
    /// # Errors
    ///
    /// [`Error::UnhashableGrouperResult`](crate::Error::UnhashableGrouperResult)
    /// if `by` rejects any item.
    pub fn new(items: impl IntoIterator<Item = T>, by: Grouper<T>) -> Result<Self> {
        let grouped = GroupedCollection::new(items, vec![by])?;
        Ok(CountingGroupedCollection {
            inner: grouped.process(|items| items.len()),
        })
    }

    /// Returns the count for the bucket `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`](crate::Error::KeyNotFound) if no item produced
    /// this key.
    pub fn get(&self, key: impl Into<Value>) -> Result<usize> {
        let bucket = self.inner.get(key)?;
        Ok(*bucket.leaf().expect("buckets of a single-level collection are leaves"))
    }

    /// Iterates over the bucket keys in first-occurrence order.
    pub fn keys(&self) -> Keys<'_, T, usize> {
        self.inner.keys()
    }

    /// Total number of items counted.
    pub fn len(&self) -> usize {
        self.inner.process_with(|&count, _| count).into_iter().sum()
    }

    /// Returns whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> PartialEq for CountingGroupedCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for CountingGroupedCollection<T> {}

impl<T> Clone for CountingGroupedCollection<T> {
    fn clone(&self) -> Self {
        CountingGroupedCollection {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for CountingGroupedCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// Panicking count lookup: `counter[true]`.
///
/// # Panics
///
/// Panics if no item produced the key.
impl<T, Q: Into<Value>> Index<Q> for CountingGroupedCollection<T> {
    type Output = usize;

    fn index(&self, key: Q) -> &usize {
        match self.inner.get(key) {
            Ok(bucket) => bucket
                .leaf()
                .expect("buckets of a single-level collection are leaves"),
            Err(err) => panic!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn small() -> Grouper<i32> {
        Grouper::new("small", |n: &i32| *n < 5)
    }

    #[test]
    fn counts_items_per_bucket() {
        let counter = CountingGroupedCollection::new(0..10, small()).unwrap();

        assert_eq!(counter.get(true).unwrap(), 5);
        assert_eq!(counter.get(false).unwrap(), 5);
        assert_eq!(counter[true], 5);
        assert_eq!(counter.len(), 10);
        assert!(!counter.is_empty());
    }

    #[test]
    fn keys_follow_first_occurrence() {
        let counter = CountingGroupedCollection::new(0..10, small()).unwrap();

        let keys: Vec<_> = counter.keys().cloned().collect();
        assert_eq!(keys, [Value::Bool(true), Value::Bool(false)]);
    }

    #[test]
    fn unknown_buckets_are_reported() {
        let counter = CountingGroupedCollection::new(0..4, small()).unwrap();

        assert_eq!(
            counter.get(false).unwrap_err(),
            Error::KeyNotFound {
                key: Value::Bool(false),
            },
        );
    }

    #[test]
    fn counting_nothing_yields_an_empty_collection() {
        let counter = CountingGroupedCollection::new(std::iter::empty::<i32>(), small()).unwrap();

        assert_eq!(counter.len(), 0);
        assert!(counter.is_empty());
        assert_eq!(counter.keys().count(), 0);
    }

    #[test]
    fn equal_inputs_count_equal() {
        let a = CountingGroupedCollection::new(0..10, small()).unwrap();
        let b = CountingGroupedCollection::new((0..10).rev(), small()).unwrap();
        let c = CountingGroupedCollection::new(0..9, small()).unwrap();

        // Bucket insertion order differs between `a` and `b`; counts do not.
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_renders_counts_per_bucket() {
        let counter = CountingGroupedCollection::new(0..10, small()).unwrap();

        assert_eq!(format!("{counter:?}"), "{true: 5, false: 5}");
    }

    #[test]
    fn unhashable_grouper_result_aborts_counting() {
        let bad = Grouper::new("bad", |_: &i32| Value::Map(Vec::new()));

        assert_eq!(
            CountingGroupedCollection::new(0..3, bad).unwrap_err(),
            Error::UnhashableGrouperResult {
                grouper: "bad".to_owned(),
            },
        );
    }
}

#[cfg(test)]
mod proptests {
    use proptest::collection::vec as propvec;
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn counts_match_a_reference_count(nums in propvec(any::<i8>(), 0..64)) {
            let counter = CountingGroupedCollection::new(
                nums.clone(),
                Grouper::new("residue", |n: &i8| i64::from(*n).rem_euclid(3)),
            )
            .unwrap();

            for value in 0..3_i64 {
                let expected = nums
                    .iter()
                    .filter(|n| i64::from(**n).rem_euclid(3) == value)
                    .count();

                if expected == 0 {
                    prop_assert!(counter.get(value).is_err());
                } else {
                    prop_assert_eq!(counter.get(value).unwrap(), expected);
                }
            }

            prop_assert_eq!(counter.len(), nums.len());
        }
    }
}
