//! Vector math for memory retrieval.
//!
//! Every vector that enters the store is L2-normalized first, so cosine
//! similarity reduces to a plain dot product at query time.

use crate::error::{Error, Result};

/// Dot product of two equal-length vectors.
///
/// Returns [`Error::DimensionMismatch`] when the lengths differ.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut sum = 0.0f32;

    // Manual loop unrolling
    let chunks = a.len() / 4;
    let remainder = a.len() % 4;

    for i in 0..chunks {
        let base = i * 4;
        sum += a[base] * b[base]
            + a[base + 1] * b[base + 1]
            + a[base + 2] * b[base + 2]
            + a[base + 3] * b[base + 3];
    }

    let start = chunks * 4;
    for i in 0..remainder {
        let idx = start + i;
        sum += a[idx] * b[idx];
    }

    Ok(sum)
}

/// Euclidean length of a vector.
#[inline]
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale a vector to unit length in place.
///
/// Rejects empty vectors, vectors containing NaN or infinity, and the zero
/// vector (which has no direction).
pub fn normalize(v: &mut [f32]) -> Result<()> {
    if v.is_empty() {
        return Err(Error::InvalidVector("vector is empty".to_string()));
    }
    if v.iter().any(|x| !x.is_finite()) {
        return Err(Error::InvalidVector(
            "vector contains NaN or infinite components".to_string(),
        ));
    }

    let norm = l2_norm(v);
    if norm == 0.0 {
        return Err(Error::InvalidVector("vector has zero norm".to_string()));
    }

    for x in v.iter_mut() {
        *x /= norm;
    }
    Ok(())
}

/// Cosine similarity of two vectors that are already unit length.
#[inline]
pub fn cosine_similarity_normalized(a: &[f32], b: &[f32]) -> Result<f32> {
    dot_product(a, b)
}

/// Round a similarity score to three decimal places.
#[inline]
pub fn round3(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}
