//! Dense pairwise cosine-similarity matrix.

pub mod compare;

use std::time::Instant;

use num::Num;
use rayon::prelude::*;
use tracing::info;

use crate::utils::math::vector::SparseVec;

use compare::{cosine_from_parts, Compare, DefaultCompare};

/// Square, symmetric item x item similarity matrix (row-major, f32).
///
/// Built once from the full vector set. Every entry is in [-1, 1] and the
/// diagonal is exactly 1, including items whose vector is all zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build with [`DefaultCompare`].
    pub fn build<N>(vectors: &[SparseVec<N>]) -> Self
    where
        N: Num + Copy + Into<f64> + Sync,
    {
        Self::build_with::<N, DefaultCompare>(vectors)
    }

    /// Compute every pair once.
    ///
    /// Norms are computed up front; each upper-triangle row is computed in
    /// parallel and then mirrored into the lower triangle.
    pub fn build_with<N, C>(vectors: &[SparseVec<N>]) -> Self
    where
        N: Num + Copy + Sync,
        C: Compare<N>,
    {
        let start = Instant::now();
        let n = vectors.len();
        let norms: Vec<f64> = vectors.par_iter().map(|v| C::norm(v)).collect();

        // upper[i] = sim(i, j) for j in i+1..n
        let upper: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| cosine_from_parts(C::dot(&vectors[i], &vectors[j]), norms[i], norms[j]) as f32)
                    .collect()
            })
            .collect();

        let mut data = vec![0.0f32; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            data[i * n + i] = 1.0;
            for (offset, sim) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                data[i * n + j] = sim;
                data[j * n + i] = sim;
            }
        }

        info!(
            items = n,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "similarity matrix built"
        );
        Self { n, data }
    }

    /// number of rows (= items)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.data[i * self.n + j])
        } else {
            None
        }
    }

    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.n {
            Some(&self.data[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}
