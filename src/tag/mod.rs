//! Tag synthesis: one lowercase, stopword-free text blob per item.

pub mod stopwords;

use rayon::prelude::*;

use crate::catalog::Item;

pub use stopwords::StopWords;

/// Builds the tag string fed to the vectorizer.
///
/// Field order is fixed: overview, genres, keywords, cast, director.
/// Multi-word names are not kept together; "Science Fiction" contributes
/// `science` and `fiction`.
#[derive(Debug, Clone, Default)]
pub struct TagSynthesizer {
    stop_words: StopWords,
}

impl TagSynthesizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn english() -> Self {
        Self::new(StopWords::english())
    }

    pub fn synthesize(&self, item: &Item) -> String {
        let raw = [
            item.overview.as_deref().unwrap_or("").to_string(),
            item.genres.join(" "),
            item.keywords.join(" "),
            item.cast.join(" "),
            item.director.join(" "),
        ]
        .join(" ");

        raw.split_whitespace()
            .map(str::to_lowercase)
            .filter(|word| !self.stop_words.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Tags for every item, in item order.
    pub fn synthesize_all(&self, items: &[Item]) -> Vec<String> {
        items.par_iter().map(|item| self.synthesize(item)).collect()
    }
}
