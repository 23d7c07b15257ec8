pub mod corpus;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;
use std::time::Instant;

use indexmap::IndexSet;
use num::Float;
use rayon::prelude::*;
use tracing::info;

use crate::{
    utils::math::vector::SparseVec,
    vectorizer::{
        corpus::Corpus,
        tfidf::{DefaultTfIdfEngine, TfIdfEngine},
        token::TermFrequency,
    },
};

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Fitted TF-IDF vector space.
///
/// Holds the vocabulary (term -> dimension), the IDF weights and one sparse
/// vector per document. Fitted once over the whole corpus; it is never
/// refitted, so adding a document means fitting a new space.
///
/// `VectorSpace<N, E>` has the following generic parameters:
/// - `N`: vector element type (f32, f64)
/// - `E`: TF-IDF calculation engine (e.g., `DefaultTfIdfEngine`)
#[derive(Debug, Clone)]
pub struct VectorSpace<N = f32, E = DefaultTfIdfEngine>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    /// position = dimension, alphabetical
    vocabulary: IndexSet<Box<str>>,
    idf: Vec<f64>,
    vectors: Vec<SparseVec<N>>,
    _marker: PhantomData<E>,
}

impl<N, E> VectorSpace<N, E>
where
    N: Float + Send + Sync,
    E: TfIdfEngine<N>,
{
    /// Fit the vocabulary over `docs` (at most `max_features` terms) and
    /// project every document into it.
    pub fn fit<S>(docs: &[S], max_features: usize) -> Self
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let freqs: Vec<TermFrequency> = docs
            .par_iter()
            .map(|doc| TermFrequency::from_text(doc.as_ref()))
            .collect();

        let mut corpus = Corpus::new();
        for freq in &freqs {
            corpus.add_doc(freq);
        }
        let vocabulary = corpus.top_terms(max_features);
        let idf = E::idf_vec(&corpus, &vocabulary);
        let vectors = freqs
            .par_iter()
            .map(|freq| E::tfidf_vec(freq, &vocabulary, &idf))
            .collect();

        info!(
            docs = docs.len(),
            corpus_terms = corpus.vocab_size(),
            dims = vocabulary.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "vector space fitted"
        );
        Self {
            vocabulary,
            idf,
            vectors,
            _marker: PhantomData,
        }
    }

    /// Project extra text into the fitted space. The vocabulary is not touched.
    pub fn transform(&self, text: &str) -> SparseVec<N> {
        E::tfidf_vec(&TermFrequency::from_text(text), &self.vocabulary, &self.idf)
    }
}

impl<N, E> VectorSpace<N, E>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    /// vector dimensionality
    #[inline]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(|t| t.as_ref())
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get_index_of(term)
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn vectors(&self) -> &[SparseVec<N>] {
        &self.vectors
    }

    pub fn vector(&self, row: usize) -> Option<&SparseVec<N>> {
        self.vectors.get(row)
    }

    /// number of documents
    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
