use indexmap::IndexMap;

/// Bidirectional title <-> row mapping.
///
/// Titles are not required to be unique: `position` returns the first row
/// carrying the title, while `title` still answers for every row.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    /// row -> title
    titles: Vec<String>,
    /// title -> first row
    positions: IndexMap<String, usize>,
}

impl TitleIndex {
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        let mut positions = IndexMap::with_capacity(titles.len());
        for (row, title) in titles.iter().enumerate() {
            // 先勝ち
            positions.entry(title.clone()).or_insert(row);
        }
        Self { titles, positions }
    }

    #[inline]
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    #[inline]
    pub fn title(&self, row: usize) -> Option<&str> {
        self.titles.get(row).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    /// number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// titles in row order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// All titles sorted, duplicates kept (selection lists).
    pub fn sorted_titles(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.titles.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_both_directions() {
        let index = TitleIndex::from_titles(["Inception", "Avatar", "Heat"]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.position("Avatar"), Some(1));
        assert_eq!(index.title(2), Some("Heat"));
        assert_eq!(index.position("Up"), None);
        assert_eq!(index.title(3), None);
    }

    #[test]
    fn duplicate_titles_resolve_to_first_row() {
        let index = TitleIndex::from_titles(["Heat", "Avatar", "Heat"]);

        assert_eq!(index.position("Heat"), Some(0));
        assert_eq!(index.title(2), Some("Heat"));
        assert_eq!(index.sorted_titles(), vec!["Avatar", "Heat", "Heat"]);
    }
}
