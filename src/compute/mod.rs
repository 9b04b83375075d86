//! Numeric reduction engine and aggregation registry
//!
//! Two reduction paths live here. The vectorized path ([`simd`]) handles the
//! fixed-width numeric types directly. The generic path works for any value
//! type that has an entry in the process-wide aggregation registry: a small
//! capability record of arithmetic closures plus a neutral-value provider,
//! keyed by `TypeId`.
//!
//! Built-in numeric types are registered when the registry is first touched.
//! Callers may register additional types (or override built-ins) at runtime;
//! registration writes must be serialized by the caller — register during
//! single-threaded startup, then reduce freely.

pub mod simd;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::na::NA;

/// Boxed binary arithmetic closure over `T`
pub type ArithFn<T> = Box<dyn Fn(&T, &T) -> T + Send + Sync>;

/// Arithmetic operation set for one value type
///
/// Every operation is optional; using an unregistered operation fails with
/// `Unsupported` rather than panicking.
pub struct ArithmeticOps<T> {
    pub add: Option<ArithFn<T>>,
    pub subtract: Option<ArithFn<T>>,
    pub multiply: Option<ArithFn<T>>,
    pub divide: Option<ArithFn<T>>,
    pub modulo: Option<ArithFn<T>>,
}

impl<T> Default for ArithmeticOps<T> {
    fn default() -> Self {
        ArithmeticOps {
            add: None,
            subtract: None,
            multiply: None,
            divide: None,
            modulo: None,
        }
    }
}

impl<T> ArithmeticOps<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_add(mut self, f: impl Fn(&T, &T) -> T + Send + Sync + 'static) -> Self {
        self.add = Some(Box::new(f));
        self
    }

    pub fn with_subtract(mut self, f: impl Fn(&T, &T) -> T + Send + Sync + 'static) -> Self {
        self.subtract = Some(Box::new(f));
        self
    }

    pub fn with_multiply(mut self, f: impl Fn(&T, &T) -> T + Send + Sync + 'static) -> Self {
        self.multiply = Some(Box::new(f));
        self
    }

    pub fn with_divide(mut self, f: impl Fn(&T, &T) -> T + Send + Sync + 'static) -> Self {
        self.divide = Some(Box::new(f));
        self
    }

    pub fn with_modulo(mut self, f: impl Fn(&T, &T) -> T + Send + Sync + 'static) -> Self {
        self.modulo = Some(Box::new(f));
        self
    }

    /// The registered addition, or `Unsupported`
    pub fn add_op(&self) -> Result<&ArithFn<T>> {
        self.add
            .as_ref()
            .ok_or_else(|| Error::Unsupported("addition is not registered for this type".to_string()))
    }
}

/// Neutral-value generator for one value type
struct DefaultValueProvider<T> {
    make: Box<dyn Fn() -> T + Send + Sync>,
}

type ErasedEntry = Arc<dyn Any + Send + Sync>;

macro_rules! builtin_int_ops {
    ($map:expr, $($t:ty),*) => {
        $(
            let ops: ArithmeticOps<$t> = ArithmeticOps::new()
                .with_add(|a: &$t, b: &$t| a.wrapping_add(*b))
                .with_subtract(|a: &$t, b: &$t| a.wrapping_sub(*b))
                .with_multiply(|a: &$t, b: &$t| a.wrapping_mul(*b))
                .with_divide(|a: &$t, b: &$t| a.wrapping_div(*b))
                .with_modulo(|a: &$t, b: &$t| a.wrapping_rem(*b));
            $map.insert(TypeId::of::<$t>(), Arc::new(ops) as ErasedEntry);
        )*
    };
}

macro_rules! builtin_float_ops {
    ($map:expr, $($t:ty),*) => {
        $(
            let ops: ArithmeticOps<$t> = ArithmeticOps::new()
                .with_add(|a: &$t, b: &$t| a + b)
                .with_subtract(|a: &$t, b: &$t| a - b)
                .with_multiply(|a: &$t, b: &$t| a * b)
                .with_divide(|a: &$t, b: &$t| a / b)
                .with_modulo(|a: &$t, b: &$t| a % b);
            $map.insert(TypeId::of::<$t>(), Arc::new(ops) as ErasedEntry);
        )*
    };
}

macro_rules! builtin_neutral {
    ($map:expr, $($t:ty => $zero:expr),*) => {
        $(
            let provider: DefaultValueProvider<$t> = DefaultValueProvider {
                make: Box::new(|| $zero),
            };
            $map.insert(TypeId::of::<$t>(), Arc::new(provider) as ErasedEntry);
        )*
    };
}

fn builtin_calculators() -> HashMap<TypeId, ErasedEntry> {
    let mut map: HashMap<TypeId, ErasedEntry> = HashMap::new();
    builtin_int_ops!(map, i32, i64, u32, u64);
    builtin_float_ops!(map, f32, f64);
    map
}

fn builtin_default_values() -> HashMap<TypeId, ErasedEntry> {
    let mut map: HashMap<TypeId, ErasedEntry> = HashMap::new();
    builtin_neutral!(map,
        i32 => 0i32, i64 => 0i64, u32 => 0u32, u64 => 0u64,
        f32 => 0.0f32, f64 => 0.0f64
    );
    map
}

lazy_static! {
    static ref CALCULATORS: RwLock<HashMap<TypeId, ErasedEntry>> =
        RwLock::new(builtin_calculators());
    static ref DEFAULT_VALUES: RwLock<HashMap<TypeId, ErasedEntry>> =
        RwLock::new(builtin_default_values());
}

/// Register (or overwrite) the arithmetic operation set for `T`
pub fn register_calculator<T: Any>(ops: ArithmeticOps<T>) {
    log::debug!("registering calculator for {}", std::any::type_name::<T>());
    CALCULATORS
        .write()
        .expect("aggregation registry lock poisoned")
        .insert(TypeId::of::<T>(), Arc::new(ops));
}

/// Register (or overwrite) the neutral-value generator for `T`
pub fn register_default_value_provider<T: Any>(make: impl Fn() -> T + Send + Sync + 'static) {
    log::debug!(
        "registering default value provider for {}",
        std::any::type_name::<T>()
    );
    DEFAULT_VALUES
        .write()
        .expect("aggregation registry lock poisoned")
        .insert(
            TypeId::of::<T>(),
            Arc::new(DefaultValueProvider {
                make: Box::new(make),
            }),
        );
}

/// Register `T` for additive aggregation in one step: an add operation plus
/// its neutral value
pub fn register_aggregator<T: Any>(
    add: impl Fn(&T, &T) -> T + Send + Sync + 'static,
    neutral: impl Fn() -> T + Send + Sync + 'static,
) {
    register_calculator(ArithmeticOps::new().with_add(add));
    register_default_value_provider(neutral);
}

/// Look up the registered arithmetic operation set for `T`
pub fn calculator<T: Any>() -> Result<Arc<ArithmeticOps<T>>> {
    let entry = CALCULATORS
        .read()
        .expect("aggregation registry lock poisoned")
        .get(&TypeId::of::<T>())
        .cloned()
        .ok_or_else(|| {
            Error::NotFound(format!(
                "no calculator registered for {}",
                std::any::type_name::<T>()
            ))
        })?;
    entry.downcast::<ArithmeticOps<T>>().map_err(|_| {
        Error::InvalidState(format!(
            "calculator registry entry for {} has the wrong type",
            std::any::type_name::<T>()
        ))
    })
}

/// Produce the registered neutral ("zero") value for `T`
pub fn neutral_value<T: Any>() -> Result<T> {
    let entry = DEFAULT_VALUES
        .read()
        .expect("aggregation registry lock poisoned")
        .get(&TypeId::of::<T>())
        .cloned()
        .ok_or_else(|| {
            Error::NotFound(format!(
                "no default value provider registered for {}",
                std::any::type_name::<T>()
            ))
        })?;
    let provider = entry.downcast::<DefaultValueProvider<T>>().map_err(|_| {
        Error::InvalidState(format!(
            "default value registry entry for {} has the wrong type",
            std::any::type_name::<T>()
        ))
    })?;
    Ok((provider.make)())
}

/// Registry-driven sum over typed storage
///
/// Folds the neutral value through the registered add operation. Missing
/// entries are skipped when `drop_null` is true and fail with `InvalidState`
/// otherwise.
pub fn compute_sum<T: Any + Clone>(values: &[NA<T>], drop_null: bool) -> Result<T> {
    let ops = calculator::<T>()?;
    let add = ops.add_op()?;
    let mut acc = neutral_value::<T>()?;
    for entry in values {
        match entry {
            NA::Value(v) => acc = add(&acc, v),
            NA::NA => {
                if !drop_null {
                    return Err(Error::InvalidState(
                        "null entry encountered with drop_null = false".to_string(),
                    ));
                }
            }
        }
    }
    Ok(acc)
}

/// Registry-driven sum over type-erased storage
///
/// Same fold as [`compute_sum`], but each non-null entry must downcast to `T`;
/// a foreign value in the column fails with `InvalidArgument`, guarding
/// against heterogeneous storage.
pub fn compute_sum_dyn<T: Any + Clone>(values: &[NA<Box<dyn Any>>], drop_null: bool) -> Result<T> {
    let ops = calculator::<T>()?;
    let add = ops.add_op()?;
    let mut acc = neutral_value::<T>()?;
    for entry in values {
        match entry {
            NA::Value(boxed) => {
                let v = boxed.downcast_ref::<T>().ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "value is not of type {}",
                        std::any::type_name::<T>()
                    ))
                })?;
                acc = add(&acc, v);
            }
            NA::NA => {
                if !drop_null {
                    return Err(Error::InvalidState(
                        "null entry encountered with drop_null = false".to_string(),
                    ));
                }
            }
        }
    }
    Ok(acc)
}

/// Arithmetic mean of f64 data, optionally adjusted for null positions
///
/// The denominator is `data.len()` minus the number of supplied null
/// positions; an empty input or a non-positive adjusted denominator is an
/// `InvalidArgument` error.
pub fn mean(data: &[f64], null_positions: Option<&[usize]>) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::InvalidArgument(
            "cannot compute the mean of empty input".to_string(),
        ));
    }
    let nulls = null_positions.map_or(0, |p| p.len());
    if nulls >= data.len() {
        return Err(Error::InvalidArgument(format!(
            "null-adjusted denominator is not positive: {} values, {} nulls",
            data.len(),
            nulls
        )));
    }
    let denom = (data.len() - nulls) as f64;
    Ok(simd::simd_sum_f64(data) / denom)
}
