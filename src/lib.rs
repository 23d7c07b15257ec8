//! This crate is a content-based movie recommender built on TF-IDF vectors.
//!
//! Pipeline: catalog (CSV join + metadata normalization) -> tag synthesis
//! -> TF-IDF vector space -> cosine similarity matrix -> top-N recommendation.

use std::path::PathBuf;

use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod evaluate;
pub mod recommender;
pub mod similarity;
pub mod tag;
pub mod utils;
pub mod vectorizer;

pub type Result<T> = std::result::Result<T, RecommendError>;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// The queried title is not in the title index.
    #[error("'{0}' not found.")]
    NotFound(String),

    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Catalog item
/// One movie after the join, with its metadata lists already normalized to
/// plain name lists (genres, keywords, top-3 cast, director).
pub use catalog::Item;

/// Catalog loading
/// Reads the movies and credits CSV tables and inner-joins them on title.
pub use catalog::loader::{load_catalog, load_catalog_from_readers};

/// Tag Synthesizer
/// Turns an item into one lowercased, stop-word-free bag-of-words string.
pub use tag::{stopwords::StopWords, TagSynthesizer};

/// TF-IDF Vector Space
/// Vocabulary capped to the most frequent terms, smoothed IDF, L2-normalized rows.
///
/// `VectorSpace<N, E>` has the following generic parameters:
/// - `N`: vector element type (f32, f64)
/// - `E`: TF-IDF calculation engine (e.g., `DefaultTfIdfEngine`)
pub use vectorizer::{
    corpus::Corpus,
    tfidf::{DefaultTfIdfEngine, TfIdfEngine},
    token::TermFrequency,
    VectorSpace,
};

/// Dense, symmetric cosine similarity matrix over all items.
pub use similarity::{compare::Compare, SimilarityMatrix};

/// Recommend Index
/// Owns everything the pipeline builds; immutable after `build`, so it can be
/// shared between threads for concurrent queries.
pub use recommender::{
    scoring::{HitEntry, Hits},
    BuildOptions, ItemInfo, RecommendIndex,
};

pub use config::Config;
pub use evaluate::{average_similarity, evaluate, Evaluation};
