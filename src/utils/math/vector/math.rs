use std::{cmp::Ordering, ops::AddAssign};

use num::{Float, Num};

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// ドット積
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// indices の昇順マージで共通次元だけを掛け合わせる
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result += va.into() * vb.into();
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for (_, v) in self.raw_iter() {
            let v: R = v.into();
            result += v * v;
        }
        result
    }
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// L2 正規化 (in place)
    /// ゼロベクトルはそのまま
    pub fn l2_normalize(&mut self) {
        let norm = self
            .raw_iter()
            .fold(N::zero(), |acc, (_, v)| acc + v * v)
            .sqrt();
        if norm > N::zero() {
            for v in self.vals_mut() {
                *v = *v / norm;
            }
        }
    }
}
