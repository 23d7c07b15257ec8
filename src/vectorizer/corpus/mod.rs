use indexmap::{IndexMap, IndexSet};

use crate::vectorizer::token::TermFrequency;

/// Corpus-wide statistics used to select the vocabulary and compute IDF.
/// It does not keep document text:
/// - number of documents
/// - number of documents each term appears in
/// - total occurrences of each term
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    /// term -> document frequency
    doc_freq: IndexMap<Box<str>, u64>,
    /// term -> occurrences over all documents
    term_total: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's terms.
    pub fn add_doc(&mut self, doc: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in doc.iter() {
            *self.doc_freq.entry(term.into()).or_insert(0) += 1;
            *self.term_total.entry(term.into()).or_insert(0) += count;
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of `term` over the whole corpus
    #[inline]
    pub fn get_term_total(&self, term: &str) -> u64 {
        self.term_total.get(term).copied().unwrap_or(0)
    }

    /// number of unique terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }

    /// The `limit` most frequent terms (by total occurrences, ties broken
    /// alphabetically), returned in alphabetical order.
    /// The position of a term in the returned set is its vector dimension.
    pub fn top_terms(&self, limit: usize) -> IndexSet<Box<str>> {
        let mut ranked: Vec<(&Box<str>, u64)> = self.term_total.iter().map(|(t, &c)| (t, c)).collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);

        let mut terms: Vec<Box<str>> = ranked.into_iter().map(|(t, _)| t.clone()).collect();
        terms.sort_unstable();
        terms.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_of(docs: &[&str]) -> Corpus {
        let mut corpus = Corpus::new();
        for doc in docs {
            corpus.add_doc(&TermFrequency::from_text(doc));
        }
        corpus
    }

    #[test]
    fn counts_documents_and_terms() {
        let corpus = corpus_of(&["dream dream heist", "heist crew", "space"]);

        assert_eq!(corpus.get_doc_num(), 3);
        assert_eq!(corpus.vocab_size(), 4);
        assert_eq!(corpus.get_term_count("dream"), 1);
        assert_eq!(corpus.get_term_total("dream"), 2);
        assert_eq!(corpus.get_term_count("heist"), 2);
        assert_eq!(corpus.get_term_count("missing"), 0);
    }

    #[test]
    fn top_terms_by_total_then_alphabetical() {
        let corpus = corpus_of(&["zulu zulu zulu alpha", "mike mike bravo", "charlie"]);

        // zulu=3, mike=2, then alpha/bravo/charlie tie at 1 -> alpha
        let top = corpus.top_terms(3);
        let terms: Vec<&str> = top.iter().map(|t| t.as_ref()).collect();
        assert_eq!(terms, vec!["alpha", "mike", "zulu"]);
    }

    #[test]
    fn top_terms_larger_than_vocabulary() {
        let corpus = corpus_of(&["bravo alpha"]);
        assert_eq!(corpus.top_terms(10).len(), 2);
        assert!(corpus.top_terms(0).is_empty());
    }
}
