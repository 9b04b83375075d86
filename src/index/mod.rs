//! Label index for Series
//!
//! Unlike a plain row index, this index tolerates duplicate labels: each label
//! owns an ordered bucket of physical positions. Buckets partition the dense
//! position space `0..len`, and compaction after a removal keeps it dense.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Display};

/// An opaque, equality-comparable row label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl Label {
    /// Numeric interpretation used by natural ordering, if one exists
    ///
    /// Strings parsing to non-finite floats ("NaN", "inf") are treated as
    /// non-numeric so the ordering stays transitive.
    fn numeric_value(&self) -> Option<f64> {
        match self {
            Label::Int(v) => Some(*v as f64),
            Label::Str(s) => match s.trim().parse::<f64>() {
                Ok(x) if x.is_finite() => Some(x),
                _ => None,
            },
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Label::Int(_) => 0,
            Label::Str(_) => 1,
        }
    }

    fn text(&self) -> String {
        match self {
            Label::Int(v) => v.to_string(),
            Label::Str(s) => s.clone(),
        }
    }
}

/// Natural ordering over mixed label kinds
///
/// Numeric-interpretable labels (integers, numeric strings) compare by value
/// and sort before non-numeric strings; non-numeric strings compare
/// lexicographically. Ties between distinct labels break on kind then text so
/// the ordering stays consistent with `Eq`.
impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Label::Int(a), Label::Int(b)) => a.cmp(b),
            _ => match (self.numeric_value(), other.numeric_value()) {
                (Some(a), Some(b)) => a
                    .partial_cmp(&b)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| self.kind_rank().cmp(&other.kind_rank()))
                    .then_with(|| self.text().cmp(&other.text())),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => self.text().cmp(&other.text()),
            },
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(v) => write!(f, "{}", v),
            Label::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label::Int(v)
    }
}

impl From<usize> for Label {
    fn from(v: usize) -> Self {
        Label::Int(v as i64)
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Label::Str(v.to_string())
    }
}

impl From<String> for Label {
    fn from(v: String) -> Self {
        Label::Str(v)
    }
}

/// Label index permitting duplicate keys
///
/// `labels[pos]` is the label of physical position `pos`; `map` resolves a
/// label to its ordered bucket of positions. A freshly created index with no
/// explicit labels is in default-labeling mode (dense `0..len` integers); the
/// first explicitly-labeled append switches it to explicit mode permanently.
#[derive(Debug, Clone)]
pub struct LabelIndex {
    /// Label of each physical position, in position order
    labels: Vec<Label>,

    /// Label to ordered positions (insertion order within each bucket)
    map: HashMap<Label, Vec<usize>>,

    /// True iff labels are the automatically assigned dense range
    default_labeling: bool,
}

impl LabelIndex {
    /// Create a default-labeled index over `0..len`
    pub fn from_range(len: usize) -> Self {
        let labels: Vec<Label> = (0..len).map(Label::from).collect();
        let mut map = HashMap::with_capacity(len);
        for (pos, label) in labels.iter().enumerate() {
            map.insert(label.clone(), vec![pos]);
        }
        LabelIndex {
            labels,
            map,
            default_labeling: true,
        }
    }

    /// Create an explicitly-labeled index
    pub fn from_labels(labels: Vec<Label>) -> Self {
        let mut map: HashMap<Label, Vec<usize>> = HashMap::with_capacity(labels.len());
        for (pos, label) in labels.iter().enumerate() {
            map.entry(label.clone()).or_default().push(pos);
        }
        LabelIndex {
            labels,
            map,
            default_labeling: false,
        }
    }

    /// Number of labeled positions
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether labels are still the automatically assigned dense range
    pub fn is_default(&self) -> bool {
        self.default_labeling
    }

    /// Labels in position order
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Label at a physical position
    pub fn label_at(&self, pos: usize) -> Option<&Label> {
        self.labels.get(pos)
    }

    /// Ordered bucket of positions for a label
    pub fn get_locs(&self, label: &Label) -> Option<&[usize]> {
        self.map.get(label).map(|v| v.as_slice())
    }

    /// Whether a label is present
    pub fn contains(&self, label: &Label) -> bool {
        self.map.contains_key(label)
    }

    /// Iterate over (label, bucket) pairs (bucket-map order, unspecified)
    pub fn buckets(&self) -> impl Iterator<Item = (&Label, &[usize])> {
        self.map.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Append the next dense integer label; caller must hold default mode
    pub(crate) fn append_default(&mut self) -> Label {
        let label = Label::Int(self.labels.len() as i64);
        let pos = self.labels.len();
        self.labels.push(label.clone());
        self.map.entry(label.clone()).or_default().push(pos);
        label
    }

    /// Append an explicit label; switches labeling to explicit permanently
    pub(crate) fn append(&mut self, label: Label) {
        let pos = self.labels.len();
        self.labels.push(label.clone());
        self.map.entry(label).or_default().push(pos);
        self.default_labeling = false;
    }

    /// Drop positions where `keep[pos]` is false, compacting the survivors
    ///
    /// Surviving positions are renumbered to the dense range `0..new_len` in
    /// their prior relative order, and every bucket is rebuilt to match. In
    /// default mode the labels themselves are renumbered back to the dense
    /// range, keeping label == position. In explicit mode survivors keep their
    /// labels; a bucket left empty is removed unless `delete_empty_buckets` is
    /// false. Builds fresh structures and swaps them in, so a panic partway
    /// cannot leave the index half-rewritten.
    pub(crate) fn retain_positions(&mut self, keep: &[bool], delete_empty_buckets: bool) {
        debug_assert_eq!(keep.len(), self.labels.len());

        let new_labels: Vec<Label> = if self.default_labeling {
            let survivors = keep.iter().filter(|&&k| k).count();
            (0..survivors).map(|pos| Label::Int(pos as i64)).collect()
        } else {
            self.labels
                .iter()
                .zip(keep.iter())
                .filter(|(_, &k)| k)
                .map(|(label, _)| label.clone())
                .collect()
        };

        let mut new_map: HashMap<Label, Vec<usize>> = HashMap::with_capacity(self.map.len());
        if !delete_empty_buckets && !self.default_labeling {
            for label in self.map.keys() {
                new_map.insert(label.clone(), Vec::new());
            }
        }
        for (pos, label) in new_labels.iter().enumerate() {
            new_map.entry(label.clone()).or_default().push(pos);
        }

        self.labels = new_labels;
        self.map = new_map;
    }

    /// Remove every label and bucket
    pub(crate) fn clear(&mut self) {
        self.labels.clear();
        self.map.clear();
    }
}
