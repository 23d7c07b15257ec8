use std::fmt::{self, Debug};

/// One ranked item.
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry<K> {
    pub key: K,
    pub score: f64,
    /// row in the similarity matrix
    pub row: usize,
}

/// Ranked results
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    pub fn new(list: Vec<HitEntry<K>>) -> Self {
        Hits { list }
    }

    /// Sort by descending score.
    /// Stable: equal scores keep their current (corpus) order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // NaN は除外
        self.list.retain(|e| !e.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    pub fn truncate(&mut self, len: usize) -> &mut Self {
        self.list.truncate(len);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry<K>> {
        self.list.iter()
    }

    pub fn into_keys(self) -> Vec<K> {
        self.list.into_iter().map(|e| e.key).collect()
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for e in &self.list {
                writeln!(f, "    {:?}: {:.6} (row: {})", e.key, e.score, e.row)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}
