//! Per-group aggregation over a Series
//!
//! A `GroupBy` is a non-owning view: it borrows its source Series and holds an
//! immutable snapshot of key → position-set buckets. The borrow keeps the view
//! from outliving its source; the snapshot is not revalidated, so mutating the
//! source through other means while a view exists is the caller's
//! responsibility.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::compute::{self, ArithmeticOps};
use crate::error::{Error, Result};
use crate::series::Series;

/// Named per-group reducer, for [`GroupBy::aggregate`]
pub type NamedReducer<'f, T, R> = (String, Box<dyn Fn(&[&T]) -> R + 'f>);

/// Grouped view over a Series
#[derive(Debug)]
pub struct GroupBy<'a, K, T>
where
    K: Debug + Eq + Hash + Clone,
    T: Debug + Clone,
{
    /// Distinct group keys, in first-occurrence order
    keys: Vec<K>,

    /// Group key to ordered positions in the source
    groups: HashMap<K, Vec<usize>>,

    /// Borrowed source Series
    source: &'a Series<T>,

    /// Group name (optional)
    name: Option<String>,
}

impl<'a, K, T> GroupBy<'a, K, T>
where
    K: Debug + Eq + Hash + Clone,
    T: Debug + Clone,
{
    /// Create a grouping from one key per source position
    pub fn new(keys: Vec<K>, source: &'a Series<T>, name: Option<String>) -> Result<Self> {
        if keys.len() != source.len() {
            return Err(Error::InvalidArgument(format!(
                "key length ({}) does not match source length ({})",
                keys.len(),
                source.len()
            )));
        }

        let mut groups: HashMap<K, Vec<usize>> = HashMap::new();
        let mut distinct: Vec<K> = Vec::new();
        for (pos, key) in keys.iter().enumerate() {
            let bucket = groups.entry(key.clone()).or_default();
            if bucket.is_empty() {
                distinct.push(key.clone());
            }
            bucket.push(pos);
        }

        Ok(GroupBy {
            keys: distinct,
            groups,
            source,
            name,
        })
    }

    /// Create a grouping from a precomputed key → position-set partition
    ///
    /// Every position must be valid in the source.
    pub fn from_groups(
        groups: HashMap<K, Vec<usize>>,
        source: &'a Series<T>,
        name: Option<String>,
    ) -> Result<Self> {
        for positions in groups.values() {
            for &pos in positions {
                if pos >= source.len() {
                    return Err(Error::OutOfRange {
                        index: pos,
                        size: source.len(),
                    });
                }
            }
        }
        let keys: Vec<K> = groups.keys().cloned().collect();
        Ok(GroupBy {
            keys,
            groups,
            source,
            name,
        })
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group name
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Distinct group keys
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Ordered positions of one group
    pub fn positions(&self, key: &K) -> Option<&[usize]> {
        self.groups.get(key).map(|v| v.as_slice())
    }

    /// Per-group cardinality
    pub fn count(&self) -> HashMap<K, usize> {
        self.groups
            .iter()
            .map(|(k, positions)| (k.clone(), positions.len()))
            .collect()
    }

    /// Borrowed member values of one group, in stored order
    fn members(&self, positions: &[usize]) -> Vec<&T> {
        positions
            .iter()
            .filter_map(|&pos| self.source.get(pos))
            .collect()
    }

    /// Per-group sum through a caller-supplied operation set and neutral value
    pub fn sum_with<F>(&self, ops: &ArithmeticOps<T>, neutral: F) -> Result<HashMap<K, T>>
    where
        F: Fn() -> T,
    {
        let add = ops.add_op()?;
        let mut results = HashMap::new();
        for (key, positions) in &self.groups {
            let mut acc = neutral();
            for value in self.members(positions) {
                acc = add(&acc, value);
            }
            results.insert(key.clone(), acc);
        }
        Ok(results)
    }

    /// Per-group arithmetic mean using a caller-supplied numeric projection
    pub fn mean<F>(&self, to_f64: F) -> Result<HashMap<K, f64>>
    where
        F: Fn(&T) -> f64,
    {
        let mut results = HashMap::new();
        for (key, positions) in &self.groups {
            let values: Vec<f64> = self.members(positions).into_iter().map(&to_f64).collect();
            if !values.is_empty() {
                let sum: f64 = values.iter().sum();
                results.insert(key.clone(), sum / values.len() as f64);
            }
        }
        Ok(results)
    }

    /// Per-group minimum under the value type's natural order
    pub fn min(&self) -> Result<HashMap<K, T>>
    where
        T: PartialOrd,
    {
        self.extremum(|a, b| a < b)
    }

    /// Per-group maximum under the value type's natural order
    pub fn max(&self) -> Result<HashMap<K, T>>
    where
        T: PartialOrd,
    {
        self.extremum(|a, b| a > b)
    }

    fn extremum<F>(&self, better: F) -> Result<HashMap<K, T>>
    where
        T: PartialOrd,
        F: Fn(&T, &T) -> bool,
    {
        let mut results = HashMap::new();
        for (key, positions) in &self.groups {
            let mut best: Option<&T> = None;
            for value in self.members(positions) {
                best = match best {
                    Some(current) if !better(value, current) => Some(current),
                    _ => Some(value),
                };
            }
            if let Some(value) = best {
                results.insert(key.clone(), value.clone());
            }
        }
        Ok(results)
    }

    /// Per-group arbitrary reduction
    pub fn apply<R, F>(&self, reduce: F) -> HashMap<K, R>
    where
        F: Fn(&[&T]) -> R,
    {
        self.groups
            .iter()
            .map(|(key, positions)| (key.clone(), reduce(&self.members(positions))))
            .collect()
    }

    /// Elementwise transform over every grouped value
    ///
    /// Position-preserving: the result is one flat Series covering the
    /// grouping's positions in ascending order, carrying the source labels.
    pub fn transform<U, F>(&self, element: F) -> Result<Series<U>>
    where
        U: Debug + Clone,
        F: Fn(&T) -> U,
    {
        let mut covered: Vec<usize> = self
            .groups
            .values()
            .flat_map(|positions| positions.iter().copied())
            .collect();
        covered.sort_unstable();

        let mut values = Vec::with_capacity(covered.len());
        let mut labels = Vec::with_capacity(covered.len());
        for &pos in &covered {
            let value = self.source.get(pos).ok_or(Error::OutOfRange {
                index: pos,
                size: self.source.len(),
            })?;
            let label = self.source.index().label_at(pos).ok_or(Error::OutOfRange {
                index: pos,
                size: self.source.len(),
            })?;
            values.push(element(value));
            labels.push(label.clone());
        }
        Series::with_labels(values, labels, self.name.clone())
    }

    /// Keep only the groups passing a group-level predicate
    ///
    /// Surviving keys retain their original position sets unchanged.
    pub fn filter<F>(&self, predicate: F) -> Result<GroupBy<'a, K, T>>
    where
        F: Fn(&K, &[&T]) -> bool,
    {
        let mut keys = Vec::new();
        let mut groups = HashMap::new();
        for key in &self.keys {
            let positions = &self.groups[key];
            if predicate(key, &self.members(positions)) {
                keys.push(key.clone());
                groups.insert(key.clone(), positions.clone());
            }
        }
        Ok(GroupBy {
            keys,
            groups,
            source: self.source,
            name: self.name.clone(),
        })
    }

    /// Apply a set of named reducers to every group
    pub fn aggregate<R>(&self, reducers: &[NamedReducer<'_, T, R>]) -> HashMap<K, HashMap<String, R>> {
        let mut results = HashMap::new();
        for (key, positions) in &self.groups {
            let members = self.members(positions);
            let row: HashMap<String, R> = reducers
                .iter()
                .map(|(agg_name, reduce)| (agg_name.clone(), reduce(&members)))
                .collect();
            results.insert(key.clone(), row);
        }
        results
    }

    /// First value of one group, in stored order
    pub fn first(&self, key: &K) -> Result<&T> {
        self.nth(key, 0)
    }

    /// Last value of one group, in stored order
    pub fn last(&self, key: &K) -> Result<&T> {
        let positions = self.bucket(key)?;
        if positions.is_empty() {
            return Err(Error::OutOfRange { index: 0, size: 0 });
        }
        self.nth(key, positions.len() - 1)
    }

    /// `n`-th value of one group, in stored order
    pub fn nth(&self, key: &K, n: usize) -> Result<&T> {
        let positions = self.bucket(key)?;
        if n >= positions.len() {
            return Err(Error::OutOfRange {
                index: n,
                size: positions.len(),
            });
        }
        let pos = positions[n];
        self.source.get(pos).ok_or(Error::OutOfRange {
            index: pos,
            size: self.source.len(),
        })
    }

    fn bucket(&self, key: &K) -> Result<&[usize]> {
        self.groups
            .get(key)
            .map(|v| v.as_slice())
            .ok_or_else(|| Error::NotFound(format!("group key not found: {:?}", key)))
    }
}

impl<'a, K, T> GroupBy<'a, K, T>
where
    K: Debug + Eq + Hash + Clone,
    T: Debug + Clone + Any,
{
    /// Per-group sum through the aggregation registry
    ///
    /// Resolves the value type's operation set and neutral value from the
    /// process-wide registry; fails with `NotFound` for an unregistered type.
    pub fn sum(&self) -> Result<HashMap<K, T>> {
        let ops = compute::calculator::<T>()?;
        let add = ops.add_op()?;
        let mut results = HashMap::new();
        for (key, positions) in &self.groups {
            let mut acc = compute::neutral_value::<T>()?;
            for value in self.members(positions) {
                acc = add(&acc, value);
            }
            results.insert(key.clone(), acc);
        }
        Ok(results)
    }
}
