//! tabrs: a lightweight in-memory columnar data engine
//!
//! An eager, single-process tabular data-processing library: labeled,
//! duplicate-tolerant Series, group-by aggregation, stable dual-array sorting,
//! numeric type promotion, and SIMD-accelerated reductions with a type-erased
//! registry-driven fallback for arbitrary aggregable types.

pub mod compute;
pub mod dataframe;
pub mod dtype;
pub mod error;
pub mod groupby;
pub mod index;
pub mod na;
pub mod series;
pub mod sort;

// Re-export commonly used types
pub use dataframe::{Column, ColumnRegistry, DataFrame};
pub use dtype::{NumericKind, Scalar};
pub use error::{Error, Result};
pub use groupby::GroupBy;
pub use index::{Label, LabelIndex};
pub use na::NA;
pub use series::Series;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
