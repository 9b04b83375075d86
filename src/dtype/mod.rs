//! Numeric kind classification and promotion
//!
//! When heterogeneous runtime numeric values are merged into one column, a
//! common representable type has to be picked. This module provides the closed
//! set of numeric kinds, the promotion lattice over them, and column-level
//! inference that folds a value sequence down to a single kind.

use crate::error::{Error, Result};

/// A dynamically-typed scalar cell value
///
/// Decimal128 is modeled as a 128-bit scaled integer (mantissa × 10^-scale);
/// the engine only needs to classify and widen it, not do decimal arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal128 { mantissa: i128, scale: u32 },
    Bool(bool),
    Str(String),
    /// Missing-value marker
    Null,
}

impl Scalar {
    /// Whether this scalar is the missing-value marker
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Lossy numeric view of this scalar, if it has one
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int32(v) => Some(*v as f64),
            Scalar::Int64(v) => Some(*v as f64),
            Scalar::UInt32(v) => Some(*v as f64),
            Scalar::UInt64(v) => Some(*v as f64),
            Scalar::Float32(v) => Some(*v as f64),
            Scalar::Float64(v) => Some(*v),
            Scalar::Decimal128 { mantissa, scale } => {
                Some(*mantissa as f64 / 10f64.powi(*scale as i32))
            }
            Scalar::Bool(_) | Scalar::Str(_) | Scalar::Null => None,
        }
    }
}

/// Closed tag set classifying the numeric runtime types the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Int32,
    Int64,
    UInt32,
    UInt64,
    Decimal128,
    Float64,
    Float32,
    NonNumeric,
}

impl NumericKind {
    fn is_signed_integer(self) -> bool {
        matches!(self, NumericKind::Int32 | NumericKind::Int64)
    }

    fn bit_width(self) -> u32 {
        match self {
            NumericKind::Int32 | NumericKind::UInt32 | NumericKind::Float32 => 32,
            NumericKind::Int64 | NumericKind::UInt64 | NumericKind::Float64 => 64,
            NumericKind::Decimal128 => 128,
            NumericKind::NonNumeric => 0,
        }
    }
}

/// Classify a scalar's runtime type into a [`NumericKind`]
///
/// Callers must filter out missing values first; classifying `Null` is an
/// `InvalidState` error rather than a kind.
pub fn classify(value: &Scalar) -> Result<NumericKind> {
    match value {
        Scalar::Null => Err(Error::InvalidState(
            "cannot classify a null value; filter missing entries first".to_string(),
        )),
        Scalar::Int32(_) => Ok(NumericKind::Int32),
        Scalar::Int64(_) => Ok(NumericKind::Int64),
        Scalar::UInt32(_) => Ok(NumericKind::UInt32),
        Scalar::UInt64(_) => Ok(NumericKind::UInt64),
        Scalar::Float32(_) => Ok(NumericKind::Float32),
        Scalar::Float64(_) => Ok(NumericKind::Float64),
        Scalar::Decimal128 { .. } => Ok(NumericKind::Decimal128),
        Scalar::Bool(_) | Scalar::Str(_) => Ok(NumericKind::NonNumeric),
    }
}

/// Promote two kinds to their common representable kind
///
/// Total and commutative over the full tag set. The ordering of the rules
/// matters: the Float64/Decimal128 pairing widens to floating point before the
/// general Decimal128 absorption rule can see it.
pub fn promote(a: NumericKind, b: NumericKind) -> NumericKind {
    use NumericKind::*;

    if a == b {
        return a;
    }
    if a == NonNumeric || b == NonNumeric {
        return NonNumeric;
    }
    // Float64 + Decimal128 widens to floating point; Decimal128 absorbs every
    // other numeric kind.
    if (a == Float64 && b == Decimal128) || (a == Decimal128 && b == Float64) {
        return Float64;
    }
    if a == Decimal128 || b == Decimal128 {
        return Decimal128;
    }
    if a == Float64 || b == Float64 {
        return Float64;
    }
    // Float32 paired with any remaining kind (integer or Float64 handled
    // above): widen to Float64 so 64-bit integer range is not truncated.
    if a == Float32 || b == Float32 {
        return Float64;
    }
    // Both are integers from here on.
    if a.is_signed_integer() != b.is_signed_integer() {
        return Int64;
    }
    if a.bit_width() >= b.bit_width() {
        a
    } else {
        b
    }
}

/// Infer the common numeric kind of a column of scalars
///
/// Missing entries are skipped. Any non-numeric value short-circuits to
/// `NonNumeric`, as does an empty or all-null input.
pub fn infer_column_type(values: &[Scalar]) -> NumericKind {
    let mut current: Option<NumericKind> = None;

    for value in values {
        // classify rejects null markers; skip them
        let kind = match classify(value) {
            Ok(kind) => kind,
            Err(_) => continue,
        };
        if kind == NumericKind::NonNumeric {
            return NumericKind::NonNumeric;
        }
        current = Some(match current {
            Some(acc) => promote(acc, kind),
            None => kind,
        });
    }

    current.unwrap_or(NumericKind::NonNumeric)
}
