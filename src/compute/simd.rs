//! SIMD-accelerated numeric sums
//!
//! Fixed-width sums for f64/i64/i32 slices with AVX2 and SSE2 tiers and a
//! scalar fallback. Each vector kernel accumulates full lanes, horizontal-adds
//! the lane accumulator, then scalar-adds the remainder elements outside a
//! full lane. Integer kernels wrap on overflow, matching the fixed-width
//! wraparound semantics of the element type.
//!
//! The `vectorized_*` entry points are strict: they fail with
//! `PlatformUnsupported` when no vector instruction set is available, leaving
//! the fallback decision to the caller. The `simd_*` entry points dispatch
//! automatically and always succeed.

use crate::error::{Error, Result};

/// Sum of f64 values using the best available path
pub fn simd_sum_f64(data: &[f64]) -> f64 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { sum_f64_avx2(data) };
        } else if is_x86_feature_detected!("sse2") {
            return unsafe { sum_f64_sse2(data) };
        }
    }

    // Scalar fallback
    scalar_sum_f64(data)
}

/// Sum of i64 values using the best available path (wrapping)
pub fn simd_sum_i64(data: &[i64]) -> i64 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { sum_i64_avx2(data) };
        } else if is_x86_feature_detected!("sse2") {
            return unsafe { sum_i64_sse2(data) };
        }
    }

    // Scalar fallback
    scalar_sum_i64(data)
}

/// Sum of i32 values using the best available path (wrapping)
pub fn simd_sum_i32(data: &[i32]) -> i32 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { sum_i32_avx2(data) };
        } else if is_x86_feature_detected!("sse2") {
            return unsafe { sum_i32_sse2(data) };
        }
    }

    // Scalar fallback
    scalar_sum_i32(data)
}

/// Strict vectorized f64 sum; no scalar fallback
pub fn vectorized_sum_f64(data: &[f64]) -> Result<f64> {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return Ok(unsafe { sum_f64_avx2(data) });
        }
        if is_x86_feature_detected!("sse2") {
            return Ok(unsafe { sum_f64_sse2(data) });
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = data;

    Err(Error::PlatformUnsupported(
        "vectorized f64 sum requires x86-64 AVX2 or SSE2".to_string(),
    ))
}

/// Strict vectorized i64 sum; no scalar fallback
pub fn vectorized_sum_i64(data: &[i64]) -> Result<i64> {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return Ok(unsafe { sum_i64_avx2(data) });
        }
        if is_x86_feature_detected!("sse2") {
            return Ok(unsafe { sum_i64_sse2(data) });
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = data;

    Err(Error::PlatformUnsupported(
        "vectorized i64 sum requires x86-64 AVX2 or SSE2".to_string(),
    ))
}

/// Strict vectorized i32 sum; no scalar fallback
pub fn vectorized_sum_i32(data: &[i32]) -> Result<i32> {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return Ok(unsafe { sum_i32_avx2(data) });
        }
        if is_x86_feature_detected!("sse2") {
            return Ok(unsafe { sum_i32_sse2(data) });
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = data;

    Err(Error::PlatformUnsupported(
        "vectorized i32 sum requires x86-64 AVX2 or SSE2".to_string(),
    ))
}

// ============================================================================
// Scalar fallback implementations
// ============================================================================

fn scalar_sum_f64(data: &[f64]) -> f64 {
    data.iter().sum()
}

fn scalar_sum_i64(data: &[i64]) -> i64 {
    data.iter().fold(0i64, |acc, &x| acc.wrapping_add(x))
}

fn scalar_sum_i32(data: &[i32]) -> i32 {
    data.iter().fold(0i32, |acc, &x| acc.wrapping_add(x))
}

// ============================================================================
// AVX2 kernels (4 x 64-bit lanes, 8 x 32-bit lanes)
// ============================================================================

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn sum_f64_avx2(data: &[f64]) -> f64 {
    use std::arch::x86_64::*;

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    let mut acc = _mm256_setzero_pd();
    for chunk in chunks {
        let v = _mm256_loadu_pd(chunk.as_ptr());
        acc = _mm256_add_pd(acc, v);
    }

    let mut lanes = [0.0f64; 4];
    _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
    let mut sum = lanes[0] + lanes[1] + lanes[2] + lanes[3];

    for &x in remainder {
        sum += x;
    }
    sum
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn sum_i64_avx2(data: &[i64]) -> i64 {
    use std::arch::x86_64::*;

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    let mut acc = _mm256_setzero_si256();
    for chunk in chunks {
        let v = _mm256_loadu_si256(chunk.as_ptr() as *const __m256i);
        acc = _mm256_add_epi64(acc, v);
    }

    let mut lanes = [0i64; 4];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc);
    let mut sum = lanes[0]
        .wrapping_add(lanes[1])
        .wrapping_add(lanes[2])
        .wrapping_add(lanes[3]);

    for &x in remainder {
        sum = sum.wrapping_add(x);
    }
    sum
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn sum_i32_avx2(data: &[i32]) -> i32 {
    use std::arch::x86_64::*;

    let chunks = data.chunks_exact(8);
    let remainder = chunks.remainder();

    let mut acc = _mm256_setzero_si256();
    for chunk in chunks {
        let v = _mm256_loadu_si256(chunk.as_ptr() as *const __m256i);
        acc = _mm256_add_epi32(acc, v);
    }

    let mut lanes = [0i32; 8];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc);
    let mut sum = lanes.iter().fold(0i32, |s, &x| s.wrapping_add(x));

    for &x in remainder {
        sum = sum.wrapping_add(x);
    }
    sum
}

// ============================================================================
// SSE2 kernels (2 x 64-bit lanes, 4 x 32-bit lanes)
// ============================================================================

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn sum_f64_sse2(data: &[f64]) -> f64 {
    use std::arch::x86_64::*;

    let chunks = data.chunks_exact(2);
    let remainder = chunks.remainder();

    let mut acc = _mm_setzero_pd();
    for chunk in chunks {
        let v = _mm_loadu_pd(chunk.as_ptr());
        acc = _mm_add_pd(acc, v);
    }

    let mut lanes = [0.0f64; 2];
    _mm_storeu_pd(lanes.as_mut_ptr(), acc);
    let mut sum = lanes[0] + lanes[1];

    for &x in remainder {
        sum += x;
    }
    sum
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn sum_i64_sse2(data: &[i64]) -> i64 {
    use std::arch::x86_64::*;

    let chunks = data.chunks_exact(2);
    let remainder = chunks.remainder();

    let mut acc = _mm_setzero_si128();
    for chunk in chunks {
        let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
        acc = _mm_add_epi64(acc, v);
    }

    let mut lanes = [0i64; 2];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc);
    let mut sum = lanes[0].wrapping_add(lanes[1]);

    for &x in remainder {
        sum = sum.wrapping_add(x);
    }
    sum
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn sum_i32_sse2(data: &[i32]) -> i32 {
    use std::arch::x86_64::*;

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    let mut acc = _mm_setzero_si128();
    for chunk in chunks {
        let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
        acc = _mm_add_epi32(acc, v);
    }

    let mut lanes = [0i32; 4];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc);
    let mut sum = lanes.iter().fold(0i32, |s, &x| s.wrapping_add(x));

    for &x in remainder {
        sum = sum.wrapping_add(x);
    }
    sum
}
