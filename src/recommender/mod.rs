pub mod scoring;
pub mod title_index;

use std::time::Instant;

use tracing::info;

use crate::{
    catalog::Item,
    similarity::SimilarityMatrix,
    tag::TagSynthesizer,
    vectorizer::{VectorSpace, DEFAULT_MAX_FEATURES},
    RecommendError, Result,
};

use scoring::{HitEntry, Hits};
use title_index::TitleIndex;

pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Parameters for [`RecommendIndex::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// vocabulary cap
    pub max_features: usize,
    /// prefix joined with each item's poster path; `None` disables poster URLs
    pub poster_base_url: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            poster_base_url: Some(DEFAULT_POSTER_BASE_URL.to_string()),
        }
    }
}

/// Display data for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInfo {
    pub title: String,
    pub overview: Option<String>,
    pub release_year: String,
    pub poster_url: Option<String>,
}

/// Immutable recommendation index.
///
/// Owns the items, their tags, the fitted vector space, the similarity
/// matrix and the title index. [`RecommendIndex::build`] constructs all of
/// them before returning, and nothing mutates them afterwards, so a shared
/// reference (or an `Arc`) can serve queries from any number of threads.
#[derive(Debug, Clone)]
pub struct RecommendIndex {
    items: Vec<Item>,
    tags: Vec<String>,
    space: VectorSpace,
    matrix: SimilarityMatrix,
    titles: TitleIndex,
    poster_base_url: Option<String>,
}

impl RecommendIndex {
    /// Run the whole pipeline: tags -> vector space -> similarity matrix -> title index.
    pub fn build(items: Vec<Item>, options: &BuildOptions) -> Result<Self> {
        if items.is_empty() {
            return Err(RecommendError::EmptyCorpus("no items to index".to_string()));
        }
        let start = Instant::now();

        let tags = TagSynthesizer::english().synthesize_all(&items);
        let space: VectorSpace = VectorSpace::fit(&tags, options.max_features);
        let matrix = SimilarityMatrix::build(space.vectors());
        let titles = TitleIndex::from_titles(items.iter().map(|item| item.title.as_str()));

        info!(
            items = items.len(),
            dims = space.vocabulary_len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "recommend index ready"
        );
        Ok(Self {
            items,
            tags,
            space,
            matrix,
            titles,
            poster_base_url: options.poster_base_url.clone(),
        })
    }

    fn row_of(&self, title: &str) -> Result<usize> {
        self.titles
            .position(title)
            .ok_or_else(|| RecommendError::NotFound(title.to_string()))
    }

    /// Every other item ranked by similarity to `title`, best first, cut to `top_n`.
    ///
    /// Ties keep corpus order. Only the query row is excluded; another row
    /// with the same title is ranked like any other item.
    pub fn ranked(&self, title: &str, top_n: usize) -> Result<Hits<&str>> {
        let row = self.row_of(title)?;
        let sims = self
            .matrix
            .row(row)
            .ok_or_else(|| RecommendError::NotFound(title.to_string()))?;

        let list = sims
            .iter()
            .zip(self.items.iter())
            .enumerate()
            .filter(|(j, _)| *j != row)
            .map(|(j, (&score, item))| HitEntry {
                key: item.title.as_str(),
                score: score as f64,
                row: j,
            })
            .collect();

        let mut hits = Hits::new(list);
        hits.sort_by_score().truncate(top_n);
        Ok(hits)
    }

    /// Titles of the `top_n` items most similar to `title`.
    ///
    /// Returns [`RecommendError::NotFound`] for an unknown title. A small
    /// corpus yields fewer than `top_n` titles, never an error.
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(self
            .ranked(title, top_n)?
            .into_keys()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Overview, release year and poster URL of `title` (first match).
    pub fn item_info(&self, title: &str) -> Result<ItemInfo> {
        let item = &self.items[self.row_of(title)?];
        let poster_url = match (&self.poster_base_url, &item.poster_path) {
            (Some(base), Some(path)) => Some(format!("{base}{path}")),
            _ => None,
        };
        Ok(ItemInfo {
            title: item.title.clone(),
            overview: item.overview.clone(),
            release_year: item.release_year.clone(),
            poster_url,
        })
    }

    /// tag string of `title` (first match)
    pub fn tag(&self, title: &str) -> Result<&str> {
        Ok(&self.tags[self.row_of(title)?])
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn vector_space(&self) -> &VectorSpace {
        &self.space
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn title_index(&self) -> &TitleIndex {
        &self.titles
    }

    /// number of items
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
