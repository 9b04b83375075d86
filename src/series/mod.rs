//! Labeled columnar Series
//!
//! A `Series<T>` pairs an ordered value sequence with a label index that
//! tolerates duplicate keys: each label resolves to an ordered bucket of
//! physical positions. CRUD operations keep the position space dense; removal
//! rebuilds the value arena and every bucket instead of leaving holes.

use num_traits::NumCast;
use std::cmp::PartialOrd;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{Error, Result};
use crate::groupby::GroupBy;
use crate::index::{Label, LabelIndex};
use crate::sort;

/// One-dimensional array of values with a duplicate-tolerant label index
#[derive(Debug, Clone)]
pub struct Series<T>
where
    T: Debug + Clone,
{
    /// Data values, insertion order = physical position order
    values: Vec<T>,

    /// Label index
    index: LabelIndex,

    /// Name (optional)
    name: Option<String>,
}

// Basic implementation
impl<T> Series<T>
where
    T: Debug + Clone,
{
    /// Create a new Series from a vector, with automatic dense integer labels
    pub fn new(values: Vec<T>, name: Option<String>) -> Result<Self> {
        let index = LabelIndex::from_range(values.len());
        Ok(Series {
            values,
            index,
            name,
        })
    }

    /// Create a Series with explicit labels (duplicates allowed)
    pub fn with_labels(values: Vec<T>, labels: Vec<Label>, name: Option<String>) -> Result<Self> {
        if values.len() != labels.len() {
            return Err(Error::InvalidArgument(format!(
                "value length ({}) does not match label length ({})",
                values.len(),
                labels.len()
            )));
        }
        Ok(Series {
            values,
            index: LabelIndex::from_labels(labels),
            name,
        })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the Series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a physical position
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// All values in position order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Series name
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Label index
    pub fn index(&self) -> &LabelIndex {
        &self.index
    }

    /// Labels in position order
    pub fn labels(&self) -> &[Label] {
        self.index.labels()
    }

    /// Set the name, builder-style
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Append a value under the next dense integer label
    ///
    /// Only valid while the Series still carries its automatic labeling; once
    /// any explicit label has been appended this fails with `InvalidState`.
    pub fn push(&mut self, value: T) -> Result<()> {
        if !self.index.is_default() {
            return Err(Error::InvalidState(
                "appending without a label requires default labeling".to_string(),
            ));
        }
        self.values.push(value);
        self.index.append_default();
        Ok(())
    }

    /// Append a value under an explicit label
    ///
    /// Switches the Series to explicit labeling permanently; no operation
    /// resets it back to default labeling.
    pub fn push_labeled(&mut self, value: T, label: Label) {
        self.values.push(value);
        self.index.append(label);
    }

    /// Replace the values stored under one label
    ///
    /// `new_values` must have length 1 (broadcast to every position of the
    /// label) or exactly the bucket length (positional assignment).
    pub fn update_values(&mut self, label: &Label, new_values: &[T]) -> Result<()> {
        let positions: Vec<usize> = self
            .index
            .get_locs(label)
            .ok_or_else(|| Error::NotFound(format!("label not found: {}", label)))?
            .to_vec();

        if new_values.len() == 1 {
            for &pos in &positions {
                self.values[pos] = new_values[0].clone();
            }
        } else if new_values.len() == positions.len() {
            for (&pos, value) in positions.iter().zip(new_values.iter()) {
                self.values[pos] = value.clone();
            }
        } else {
            return Err(Error::InvalidArgument(format!(
                "expected 1 or {} replacement values for label {}, got {}",
                positions.len(),
                label,
                new_values.len()
            )));
        }
        Ok(())
    }

    /// Remove every occurrence of a value, across all labels
    ///
    /// Surviving positions are compacted back to the dense range and every
    /// bucket is remapped. Under default labeling the labels are renumbered
    /// along with the positions; under explicit labeling survivors keep their
    /// labels, and a bucket left empty is dropped unless `delete_empty_buckets`
    /// is false. Returns whether anything was removed; when nothing matches
    /// the Series is left untouched.
    pub fn remove(&mut self, value: &T, delete_empty_buckets: bool) -> bool
    where
        T: PartialEq,
    {
        let keep: Vec<bool> = self.values.iter().map(|v| v != value).collect();
        let removed = keep.iter().filter(|&&k| !k).count();
        if removed == 0 {
            return false;
        }

        let new_values: Vec<T> = self
            .values
            .iter()
            .zip(keep.iter())
            .filter(|(_, &k)| k)
            .map(|(v, _)| v.clone())
            .collect();
        self.index.retain_positions(&keep, delete_empty_buckets);
        self.values = new_values;

        log::debug!("removed {} position(s), {} remain", removed, self.values.len());
        true
    }

    /// Empty the Series
    pub fn clear(&mut self) {
        self.values.clear();
        self.index.clear();
    }

    /// Strided slice of values between two positions
    ///
    /// Both endpoints must lie in `[0, len)` and the walk direction must
    /// follow the step sign; the slice includes `to` when the stride lands on
    /// it exactly. `from == to` yields an empty result regardless of step
    /// sign.
    pub fn get_slice(&self, from: usize, to: usize, step: isize) -> Result<Vec<T>> {
        let count = self.values.len();
        if from >= count {
            return Err(Error::OutOfRange {
                index: from,
                size: count,
            });
        }
        if to >= count {
            return Err(Error::OutOfRange {
                index: to,
                size: count,
            });
        }
        if step == 0 {
            return Err(Error::InvalidArgument("slice step must not be zero".to_string()));
        }
        if step.unsigned_abs() > count {
            return Err(Error::InvalidArgument(format!(
                "slice step magnitude ({}) exceeds element count ({})",
                step.unsigned_abs(),
                count
            )));
        }
        if step > 0 && from > to {
            return Err(Error::InvalidArgument(
                "positive step requires from <= to".to_string(),
            ));
        }
        if step < 0 && from < to {
            return Err(Error::InvalidArgument(
                "negative step requires from >= to".to_string(),
            ));
        }
        if from == to {
            return Ok(Vec::new());
        }

        let mut result = Vec::new();
        let mut pos = from as isize;
        let end = to as isize;
        while (step > 0 && pos <= end) || (step < 0 && pos >= end) {
            result.push(self.values[pos as usize].clone());
            pos += step;
        }
        Ok(result)
    }

    /// First `n` values as a new, independent Series
    ///
    /// Explicit labels are carried over; a default-labeled source yields a
    /// freshly renumbered default-labeled result.
    pub fn head(&self, n: usize) -> Result<Series<T>> {
        if n > self.values.len() {
            return Err(Error::OutOfRange {
                index: n,
                size: self.values.len(),
            });
        }
        self.subset(0, n)
    }

    /// Last `n` values as a new, independent Series
    pub fn tail(&self, n: usize) -> Result<Series<T>> {
        if n > self.values.len() {
            return Err(Error::OutOfRange {
                index: n,
                size: self.values.len(),
            });
        }
        self.subset(self.values.len() - n, self.values.len())
    }

    fn subset(&self, start: usize, end: usize) -> Result<Series<T>> {
        let values = self.values[start..end].to_vec();
        if self.index.is_default() {
            Series::new(values, self.name.clone())
        } else {
            let labels = self.index.labels()[start..end].to_vec();
            Series::with_labels(values, labels, self.name.clone())
        }
    }

    /// Every physical position holding a value equal to `value`, ascending
    pub fn find(&self, value: &T) -> Vec<usize>
    where
        T: PartialEq,
    {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| *v == value)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Values matching a predicate (not index-preserving)
    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.values
            .iter()
            .filter(|v| predicate(v))
            .cloned()
            .collect()
    }

    /// New Series sorted by value, stably
    pub fn sort_by_values(&self, ascending: bool) -> Result<Series<T>>
    where
        T: PartialOrd,
    {
        let mut values = self.values.clone();
        let mut labels = self.index.labels().to_vec();
        sort::sort_by_value(&mut values, &mut labels, ascending)?;
        Series::with_labels(values, labels, self.name.clone())
    }

    /// New Series sorted by label, stably, under the natural label order
    pub fn sort_by_labels(&self, ascending: bool) -> Result<Series<T>> {
        let mut values = self.values.clone();
        let mut labels = self.index.labels().to_vec();
        sort::sort_by_label(&mut values, &mut labels, ascending)?;
        Series::with_labels(values, labels, self.name.clone())
    }

    /// Group by one key per position
    pub fn group_by<K>(&self, keys: Vec<K>) -> Result<GroupBy<'_, K, T>>
    where
        K: Debug + Eq + Hash + Clone,
    {
        GroupBy::new(keys, self, None)
    }

    /// Group by the label index: one group per label bucket
    pub fn group_by_labels(&self) -> Result<GroupBy<'_, Label, T>> {
        let groups: HashMap<Label, Vec<usize>> = self
            .index
            .buckets()
            .map(|(label, positions)| (label.clone(), positions.to_vec()))
            .collect();
        GroupBy::from_groups(groups, self, self.name.clone())
    }
}

// Specialized implementation for numeric Series
impl<T> Series<T>
where
    T: Debug
        + Clone
        + Copy
        + Sum<T>
        + PartialOrd
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + NumCast
        + Default,
{
    /// Sum of all values (zero for an empty Series)
    pub fn sum(&self) -> T {
        if self.values.is_empty() {
            T::default()
        } else {
            self.values.iter().copied().sum()
        }
    }

    /// Arithmetic mean
    pub fn mean(&self) -> Result<T> {
        if self.values.is_empty() {
            return Err(Error::InvalidArgument(
                "cannot compute the mean of an empty series".to_string(),
            ));
        }

        let sum = self.sum();
        let count: T = num_traits::cast(self.len())
            .ok_or_else(|| Error::Cast("cannot cast length to the numeric type".to_string()))?;
        Ok(sum / count)
    }

    /// Minimum value
    pub fn min(&self) -> Result<T> {
        self.values
            .iter()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
            .ok_or_else(|| {
                Error::InvalidArgument("cannot compute the minimum of an empty series".to_string())
            })
    }

    /// Maximum value
    pub fn max(&self) -> Result<T> {
        self.values
            .iter()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
            .ok_or_else(|| {
                Error::InvalidArgument("cannot compute the maximum of an empty series".to_string())
            })
    }
}
