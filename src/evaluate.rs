//! Offline quality report: how similar are the recommendations to the query?
//! Reads the similarity matrix and title index only; not part of serving.

use std::fmt;

use crate::{recommender::RecommendIndex, RecommendError, Result};

/// Recommendations for one query with their similarity to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub query: String,
    pub top_n: usize,
    /// (title, similarity to the query)
    pub entries: Vec<(String, f32)>,
}

impl Evaluation {
    /// `None` when there were no recommendations.
    pub fn mean_similarity(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: f64 = self.entries.iter().map(|(_, s)| *s as f64).sum();
        Some(sum / self.entries.len() as f64)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mean_similarity() {
            Some(mean) => writeln!(
                f,
                "{} - avg cosine similarity of top {}: {:.4}",
                self.query, self.top_n, mean
            )?,
            None => writeln!(f, "{} - no recommendations", self.query)?,
        }
        for (title, score) in &self.entries {
            writeln!(f, "  {:40}  {:.4}", title, score)?;
        }
        Ok(())
    }
}

fn similarity_by_title(index: &RecommendIndex, query_row: usize, title: &str) -> Result<f32> {
    index
        .title_index()
        .position(title)
        .and_then(|row| index.similarity().get(query_row, row))
        .ok_or_else(|| RecommendError::NotFound(title.to_string()))
}

/// Mean similarity between `query` and each of `titles`, looked up through
/// the title index (first row per title). `None` for an empty list.
pub fn average_similarity<S: AsRef<str>>(
    index: &RecommendIndex,
    query: &str,
    titles: &[S],
) -> Result<Option<f64>> {
    let query_row = index
        .title_index()
        .position(query)
        .ok_or_else(|| RecommendError::NotFound(query.to_string()))?;
    if titles.is_empty() {
        return Ok(None);
    }
    let mut sum = 0.0f64;
    for title in titles {
        sum += similarity_by_title(index, query_row, title.as_ref())? as f64;
    }
    Ok(Some(sum / titles.len() as f64))
}

/// Recommend for `query` and score each result against it.
pub fn evaluate(index: &RecommendIndex, query: &str, top_n: usize) -> Result<Evaluation> {
    let recs = index.recommend(query, top_n)?;
    let query_row = index
        .title_index()
        .position(query)
        .ok_or_else(|| RecommendError::NotFound(query.to_string()))?;
    let entries = recs
        .into_iter()
        .map(|title| similarity_by_title(index, query_row, &title).map(|s| (title, s)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Evaluation {
        query: query.to_string(),
        top_n,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::Item, recommender::BuildOptions};

    fn index() -> RecommendIndex {
        let items = vec![
            Item::new("1", "The Avengers").with_overview("superhero team alien invasion"),
            Item::new("2", "Age of Ultron").with_overview("superhero team robot"),
            Item::new("3", "Notting Hill").with_overview("bookshop romance"),
        ];
        RecommendIndex::build(items, &BuildOptions::default()).unwrap()
    }

    #[test]
    fn evaluation_matches_matrix() {
        let index = index();
        let eval = evaluate(&index, "The Avengers", 2).unwrap();

        assert_eq!(eval.entries.len(), 2);
        assert_eq!(eval.entries[0].0, "Age of Ultron");
        assert_eq!(eval.entries[0].1, index.similarity().get(0, 1).unwrap());
        assert_eq!(eval.entries[1], ("Notting Hill".to_string(), 0.0));

        let mean = eval.mean_similarity().unwrap();
        let expected = average_similarity(&index, "The Avengers", &["Age of Ultron", "Notting Hill"])
            .unwrap()
            .unwrap();
        assert!((mean - expected).abs() < 1e-12);
    }

    #[test]
    fn report_format() {
        let index = index();
        let report = evaluate(&index, "The Avengers", 1).unwrap().to_string();
        let mut lines = report.lines();

        assert!(lines
            .next()
            .unwrap()
            .starts_with("The Avengers - avg cosine similarity of top 1: 0."));
        assert!(lines.next().unwrap().starts_with("  Age of Ultron"));
    }

    #[test]
    fn unknown_titles_are_reported() {
        let index = index();
        assert!(matches!(evaluate(&index, "Nope", 3), Err(RecommendError::NotFound(_))));
        assert!(average_similarity(&index, "The Avengers", &["Nope"]).is_err());
        assert_eq!(average_similarity::<&str>(&index, "The Avengers", &[]).unwrap(), None);
    }
}
