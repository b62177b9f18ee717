//! Sparse vector helpers.
//!
//! A sparse vector is a list of `(feature id, value)` pairs sorted by
//! ascending id. Bag-of-words counts, TF-IDF weights and topic vectors all
//! use this shape, so dot products between any two stages are a single
//! merge join.

/// Sparse vector: `(feature id, value)` pairs, ascending by id.
pub type SparseVector = Vec<(u32, f64)>;

/// Dot product of two id-sorted sparse vectors (merge join).
#[inline]
pub fn dot(a: &[(u32, f64)], b: &[(u32, f64)]) -> f64 {
    let mut result = 0.0;
    let mut ai = a.iter();
    let mut bi = b.iter();
    let mut an = ai.next();
    let mut bn = bi.next();
    while let (Some(&(ia, va)), Some(&(ib, vb))) = (an, bn) {
        match ia.cmp(&ib) {
            std::cmp::Ordering::Equal => {
                result += va * vb;
                an = ai.next();
                bn = bi.next();
            }
            std::cmp::Ordering::Less => an = ai.next(),
            std::cmp::Ordering::Greater => bn = bi.next(),
        }
    }
    result
}

/// Euclidean norm.
#[inline]
pub fn norm(v: &[(u32, f64)]) -> f64 {
    v.iter().map(|&(_, x)| x * x).sum::<f64>().sqrt()
}

/// Return a unit-norm copy. A zero vector stays zero.
#[inline]
pub fn normalized(v: &[(u32, f64)]) -> SparseVector {
    let n = norm(v);
    if n > 0.0 {
        v.iter().map(|&(i, x)| (i, x / n)).collect()
    } else {
        v.to_vec()
    }
}

/// Cosine similarity of two id-sorted sparse vectors.
/// Returns 0.0 when either vector has zero norm.
#[inline]
pub fn cosine(a: &[(u32, f64)], b: &[(u32, f64)]) -> f64 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a > 0.0 && norm_b > 0.0 {
        dot(a, b) / (norm_a * norm_b)
    } else {
        0.0
    }
}
