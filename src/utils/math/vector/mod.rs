pub mod math;

use std::fmt::Debug;

use num::Num;

use crate::utils::sort::radix_sort_u32_soa;

/// SparseVec は 0 要素を疎とした疎ベクトルです
/// indices と values を SoA で持ち、
/// indices は昇順でソートされていることを保証します
///
/// `len` は論理的な次元数で、値を持たない次元は 0 として扱います
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// 全要素 0 の `len` 次元ベクトル
    #[inline]
    pub fn zeros(len: usize) -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    #[inline]
    pub fn with_capacity(len: usize, nnz: usize) -> Self {
        Self {
            inds: Vec::with_capacity(nnz),
            vals: Vec::with_capacity(nnz),
            len,
        }
    }

    /// Build from unordered (index, value) pairs.
    /// Zero values are dropped; indices must be unique and `< len`.
    pub fn from_pairs(len: usize, mut inds: Vec<u32>, mut vals: Vec<N>) -> Self
    where
        N: Default,
    {
        debug_assert_eq!(inds.len(), vals.len());
        radix_sort_u32_soa(&mut inds, &mut vals);
        debug_assert!(inds.windows(2).all(|w| w[0] < w[1]), "duplicate index");
        debug_assert!(inds.last().map_or(true, |&i| (i as usize) < len));

        let mut out = Self::with_capacity(len, inds.len());
        for (ind, val) in inds.into_iter().zip(vals) {
            if val != N::zero() {
                out.inds.push(ind);
                out.vals.push(val);
            }
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// `None` when out of range, otherwise the value (0 for sparse slots)
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate stored elements as (index, value), index ascending.
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    #[inline]
    pub(crate) fn vals_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }
}
