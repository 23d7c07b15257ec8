use indexmap::IndexSet;
use num::Float;

use crate::{
    utils::math::vector::SparseVec,
    vectorizer::{corpus::Corpus, token::TermFrequency},
};

/// TF-IDF calculation engine.
/// Plug a different weighting into [`VectorSpace`](crate::vectorizer::VectorSpace)
/// by implementing this trait.
pub trait TfIdfEngine<N>
where
    N: Float,
{
    /// IDFベクトルを生成する
    /// # Arguments
    /// * `corpus` - コーパス
    /// * `vocabulary` - 語彙 (位置 = 次元)
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<f64>;

    /// Weighted document vector over `vocabulary`.
    /// Terms outside the vocabulary are ignored.
    fn tfidf_vec(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>, idf: &[f64]) -> SparseVec<N>;
}

/// Default engine, scikit-learn `TfidfVectorizer` defaults:
/// - tf = raw count
/// - idf = ln((1 + n) / (1 + df)) + 1
/// - rows L2-normalized (empty rows stay zero)
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTfIdfEngine;

impl DefaultTfIdfEngine {
    #[inline]
    pub fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl<N> TfIdfEngine<N> for DefaultTfIdfEngine
where
    N: Float + Default,
{
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| Self::idf(doc_num, corpus.get_term_count(term)))
            .collect()
    }

    fn tfidf_vec(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>, idf: &[f64]) -> SparseVec<N> {
        let mut inds = Vec::with_capacity(freq.term_num());
        let mut weights = Vec::with_capacity(freq.term_num());
        for (term, count) in freq.iter() {
            if let Some(dim) = vocabulary.get_index_of(term) {
                inds.push(dim as u32);
                weights.push(count as f64 * idf[dim]);
            }
        }

        // f64 で正規化してから N に落とす
        let mut weighted = SparseVec::from_pairs(vocabulary.len(), inds, weights);
        weighted.l2_normalize();
        let (inds, vals): (Vec<u32>, Vec<N>) = weighted
            .raw_iter()
            .map(|(i, w)| (i as u32, num::cast::<f64, N>(w).unwrap_or_else(N::zero)))
            .unzip();
        SparseVec::from_pairs(vocabulary.len(), inds, vals)
    }
}
