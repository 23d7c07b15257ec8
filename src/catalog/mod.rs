pub mod loader;
pub mod metadata;

use chrono::{Datelike, NaiveDate};

/// Placeholder year for missing or unparseable release dates.
pub const UNKNOWN_YEAR: &str = "N/A";

/// One catalog entry with its metadata already normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub id: String,
    /// Lookup key. Uniqueness is not enforced; lookups use the first match.
    pub title: String,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    /// at most [`metadata::CAST_LIMIT`] names, billing order
    pub cast: Vec<String>,
    /// zero or one director
    pub director: Vec<String>,
    pub release_date: Option<String>,
    pub release_year: String,
    pub poster_path: Option<String>,
}

impl Item {
    /// Minimal item, mostly for building corpora by hand.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_year: UNKNOWN_YEAR.to_string(),
            ..Default::default()
        }
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    pub fn with_genres<S: AsRef<str>>(mut self, genres: &[S]) -> Self {
        self.genres = genres.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.keywords = keywords.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_cast<S: AsRef<str>>(mut self, cast: &[S]) -> Self {
        self.cast = cast.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = vec![director.into()];
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        let date = date.into();
        self.release_year = release_year(Some(&date));
        self.release_date = Some(date);
        self
    }
}

// day-first first, then ISO
const DATE_FORMATS: [&str; 4] = ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Four-digit release year of a date string, or [`UNKNOWN_YEAR`].
///
/// Accepts `dd-mm-yyyy`, `dd/mm/yyyy`, `yyyy-mm-dd`, `yyyy/mm/dd` and a bare year.
pub fn release_year(date: Option<&str>) -> String {
    let date = match date.map(str::trim) {
        Some(d) if !d.is_empty() => d,
        _ => return UNKNOWN_YEAR.to_string(),
    };
    if date.len() == 4 && date.bytes().all(|b| b.is_ascii_digit()) {
        return date.to_string();
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .map(|d| format!("{:04}", d.year()))
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_parses_known_formats() {
        assert_eq!(release_year(Some("2010-07-14")), "2010");
        assert_eq!(release_year(Some("16-07-2010")), "2010");
        assert_eq!(release_year(Some("16/07/2010")), "2010");
        assert_eq!(release_year(Some("1999")), "1999");
    }

    #[test]
    fn release_year_defaults_to_na() {
        assert_eq!(release_year(None), UNKNOWN_YEAR);
        assert_eq!(release_year(Some("")), UNKNOWN_YEAR);
        assert_eq!(release_year(Some("someday")), UNKNOWN_YEAR);
        assert_eq!(release_year(Some("2010-13-45")), UNKNOWN_YEAR);
    }

    #[test]
    fn builder_derives_year() {
        let item = Item::new("27205", "Inception").with_release_date("2010-07-14");
        assert_eq!(item.release_year, "2010");
        assert_eq!(Item::new("1", "x").release_year, UNKNOWN_YEAR);
    }
}
