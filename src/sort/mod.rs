//! Stable dual-array sorting
//!
//! A value array and its parallel label array are always reordered together:
//! position `i`'s value and label stay paired through the sort. The sort is
//! stable in both directions; with `ascending = false` the comparator is
//! reversed, which still maps equal keys to `Ordering::Equal` and therefore
//! keeps their original relative order.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::index::Label;

fn check_parallel_lengths(values_len: usize, labels_len: usize) -> Result<()> {
    if values_len != labels_len {
        return Err(Error::InvalidArgument(format!(
            "value length ({}) does not match label length ({})",
            values_len, labels_len
        )));
    }
    Ok(())
}

/// Apply a position permutation to both arrays in lock-step
fn apply_permutation<T: Clone>(perm: &[usize], values: &mut Vec<T>, labels: &mut Vec<Label>) {
    let new_values: Vec<T> = perm.iter().map(|&i| values[i].clone()).collect();
    let new_labels: Vec<Label> = perm.iter().map(|&i| labels[i].clone()).collect();
    *values = new_values;
    *labels = new_labels;
}

/// Sort both arrays by value, stably
///
/// Mutually-incomparable values (e.g. a float NaN against anything) compare as
/// equal, so the stable sort leaves them in their original relative order.
pub fn sort_by_value<T>(values: &mut Vec<T>, labels: &mut Vec<Label>, ascending: bool) -> Result<()>
where
    T: Clone + PartialOrd,
{
    check_parallel_lengths(values.len(), labels.len())?;
    if values.len() <= 1 {
        return Ok(());
    }

    let mut perm: Vec<usize> = (0..values.len()).collect();
    perm.sort_by(|&i, &j| {
        let cmp = values[i]
            .partial_cmp(&values[j])
            .unwrap_or(Ordering::Equal);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });

    apply_permutation(&perm, values, labels);
    Ok(())
}

/// Sort both arrays by label, stably
///
/// Labels compare under their natural order: numeric-string-aware, with
/// non-numeric strings lexicographic after all numeric-valued labels.
pub fn sort_by_label<T>(values: &mut Vec<T>, labels: &mut Vec<Label>, ascending: bool) -> Result<()>
where
    T: Clone,
{
    check_parallel_lengths(values.len(), labels.len())?;
    if values.len() <= 1 {
        return Ok(());
    }

    let mut perm: Vec<usize> = (0..labels.len()).collect();
    perm.sort_by(|&i, &j| {
        let cmp = labels[i].cmp(&labels[j]);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });

    apply_permutation(&perm, values, labels);
    Ok(())
}
