use indexmap::IndexMap;

/// Split text into lowercase terms.
///
/// A term is a maximal run of word characters (alphanumeric or `_`) at least
/// two characters long; single characters and punctuation are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|tok| tok.chars().nth(1).is_some())
        .map(str::to_lowercase)
        .collect()
}

/// TermFrequency struct
/// Counts the occurrences of each term in one document.
/// Terms are kept in first-seen order.
///
/// # Examples
/// ```
/// use tf_idf_recommender::vectorizer::token::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("dream");
/// term_freq.add_term("heist");
/// term_freq.add_term("dream");
///
/// assert_eq!(term_freq.term_count("dream"), 2);
/// assert_eq!(term_freq.term_num(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u64>,
}

impl TermFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `text` and count its terms.
    pub fn from_text(text: &str) -> Self {
        let mut freq = Self::new();
        freq.add_terms(&tokenize(text));
        freq
    }

    /// Add a term
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        *self.term_count.entry(term.to_string()).or_insert(0) += 1;
        self
    }

    /// Add multiple terms
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// occurrences of `term` (0 if absent)
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    /// (term, count) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_short_tokens_and_punctuation() {
        assert_eq!(
            tokenize("A spy's dream-sharing heist, in 3 acts (2010)!"),
            vec!["spy", "dream", "sharing", "heist", "in", "acts", "2010"]
        );
    }

    #[test]
    fn tokenize_lowercases_and_keeps_underscores() {
        assert_eq!(tokenize("Sci_Fi ÉCLAIR"), vec!["sci_fi", "éclair"]);
        assert!(tokenize("a b c . ,").is_empty());
    }

    #[test]
    fn from_text_counts_terms() {
        let freq = TermFrequency::from_text("dream within a dream");
        assert_eq!(freq.term_count("dream"), 2);
        assert_eq!(freq.term_count("within"), 1);
        assert_eq!(freq.term_count("a"), 0);
        assert_eq!(freq.term_num(), 2);
        assert_eq!(freq.iter().map(|(t, _)| t).collect::<Vec<_>>(), vec!["dream", "within"]);
    }
}
