//! Thin DataFrame layer
//!
//! Composes multiple Series-like columns behind name resolution. This layer
//! only consumes the count/value-at-position contract of its columns; all of
//! the interesting machinery lives in the Series itself. Duplicate column
//! names are allowed: a name resolves to the ordered set of column positions
//! carrying it.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use crate::error::{Error, Result};
use crate::series::Series;

/// Maximum number of rows rendered by the Display implementation
const DISPLAY_MAX_ROWS: usize = 10;

/// Column name resolution, duplicate-tolerant
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    /// Column names in position order
    names: Vec<String>,

    /// Name to ordered column positions
    map: HashMap<String, Vec<usize>>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column name, returning its position
    pub fn push(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        let pos = self.names.len();
        self.map.entry(name.clone()).or_default().push(pos);
        self.names.push(name);
        pos
    }

    /// Ordered positions of every column with this name (empty if absent)
    pub fn positions_of(&self, name: &str) -> &[usize] {
        self.map.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Name of the column at a position
    pub fn name_at(&self, pos: usize) -> Option<&str> {
        self.names.get(pos).map(|s| s.as_str())
    }

    /// Column names in position order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of registered columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no columns are registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The count/value-at-position contract a DataFrame column must satisfy
pub trait Column {
    /// Number of rows
    fn len(&self) -> usize;

    /// Whether the column is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rendered value at a row position
    fn value_at(&self, pos: usize) -> Option<String>;
}

impl<T> Column for Series<T>
where
    T: Debug + Clone + Display,
{
    fn len(&self) -> usize {
        Series::len(self)
    }

    fn value_at(&self, pos: usize) -> Option<String> {
        self.get(pos).map(|v| v.to_string())
    }
}

/// Named, row-aligned collection of columns
#[derive(Default)]
pub struct DataFrame {
    columns: Vec<Box<dyn Column>>,
    registry: ColumnRegistry,
    row_count: usize,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column under a name (duplicate names allowed)
    ///
    /// Every column must have the same row count as the first one added.
    pub fn add_column(&mut self, name: impl Into<String>, column: Box<dyn Column>) -> Result<()> {
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(Error::InvalidArgument(format!(
                "column length ({}) does not match row count ({})",
                column.len(),
                self.row_count
            )));
        }
        if self.columns.is_empty() {
            self.row_count = column.len();
        }
        self.registry.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Add a Series column
    pub fn add_series<T>(&mut self, name: impl Into<String>, series: Series<T>) -> Result<()>
    where
        T: Debug + Clone + Display + 'static,
    {
        self.add_column(name, Box::new(series))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in position order
    pub fn column_names(&self) -> &[String] {
        self.registry.names()
    }

    /// Ordered positions of every column with this name (empty if absent)
    pub fn positions_of(&self, name: &str) -> &[usize] {
        self.registry.positions_of(name)
    }

    /// Name of the column at a position
    pub fn name_at(&self, pos: usize) -> Option<&str> {
        self.registry.name_at(pos)
    }

    /// Column at a position
    pub fn column_at(&self, pos: usize) -> Option<&dyn Column> {
        self.columns.get(pos).map(|c| c.as_ref())
    }
}

impl fmt::Debug for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataFrame")
            .field("columns", &self.registry.names())
            .field("row_count", &self.row_count)
            .finish()
    }
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "DataFrame (empty)");
        }

        let shown = self.row_count.min(DISPLAY_MAX_ROWS);

        // Column widths over the header and the shown rows
        let mut widths: Vec<usize> = self.registry.names().iter().map(|n| n.len()).collect();
        for (col, width) in self.columns.iter().zip(widths.iter_mut()) {
            for row in 0..shown {
                if let Some(cell) = col.value_at(row) {
                    *width = (*width).max(cell.len());
                }
            }
        }

        for (name, &width) in self.registry.names().iter().zip(widths.iter()) {
            write!(f, "{:>w$}  ", name, w = width)?;
        }
        writeln!(f)?;

        for row in 0..shown {
            for (col, &width) in self.columns.iter().zip(widths.iter()) {
                let cell = col.value_at(row).unwrap_or_default();
                write!(f, "{:>w$}  ", cell, w = width)?;
            }
            writeln!(f)?;
        }
        if self.row_count > shown {
            writeln!(f, "... ({} rows total)", self.row_count)?;
        }
        Ok(())
    }
}
