use num::Num;

use crate::utils::math::vector::SparseVec;

pub trait Compare<N>
where
    N: Num + Copy,
{
    /// dot積
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(a: &SparseVec<N>, b: &SparseVec<N>) -> f64;

    /// ||a|| = sqrt(Σ(a_i^2))
    fn norm(a: &SparseVec<N>) -> f64 {
        Self::dot(a, a).sqrt()
    }
}

/// Cosine from a dot product and both norms.
/// A zero vector is orthogonal to everything (0.0); the result is clamped to [-1, 1].
#[inline]
pub fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Sparse merge-join comparison, accumulated in f64.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    fn dot(a: &SparseVec<N>, b: &SparseVec<N>) -> f64 {
        a.dot::<f64>(b)
    }

    #[inline]
    fn norm(a: &SparseVec<N>) -> f64 {
        a.norm_sq::<f64>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &SparseVec<f32>, b: &SparseVec<f32>) -> f64 {
        cosine_from_parts(
            DefaultCompare::dot(a, b),
            DefaultCompare::norm(a),
            DefaultCompare::norm(b),
        )
    }

    #[test]
    fn cosine_ignores_magnitude() {
        let a = SparseVec::from_pairs(3, vec![0, 1], vec![1.0f32, 1.0]);
        let b = SparseVec::from_pairs(3, vec![0, 1], vec![4.0f32, 4.0]);
        assert!((cosine(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_and_zero_vectors_score_zero() {
        let a = SparseVec::from_pairs(3, vec![0], vec![1.0f32]);
        let b = SparseVec::from_pairs(3, vec![2], vec![1.0f32]);
        let z: SparseVec<f32> = SparseVec::zeros(3);

        assert_eq!(cosine(&a, &b), 0.0);
        assert_eq!(cosine(&a, &z), 0.0);
        assert_eq!(cosine(&z, &z), 0.0);
    }

    #[test]
    fn cosine_is_clamped() {
        assert_eq!(cosine_from_parts(1.000_001, 1.0, 1.0), 1.0);
        assert_eq!(cosine_from_parts(-3.0, 1.0, 1.0), -1.0);
    }
}
