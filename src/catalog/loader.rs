//! Loading the two catalog collections and joining them on title.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize};
use tracing::{info, warn};

use crate::catalog::metadata::{extract_director, extract_names, extract_top_cast};
use crate::catalog::{release_year, Item};
use crate::{RecommendError, Result};

/// One row of the movie metadata file.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// One row of the credits file.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditRecord {
    #[serde(default)]
    pub movie_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub crew: Option<String>,
}

/// Load and join the movie and credit CSV files.
///
/// Any structural failure (unreadable file, missing `title` column, empty
/// join) is returned as an error and must halt startup.
pub fn load_catalog<P, Q>(movies: P, credits: Q) -> Result<Vec<Item>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let movies: Vec<MovieRecord> = read_path(movies.as_ref())?;
    let credits: Vec<CreditRecord> = read_path(credits.as_ref())?;
    join(movies, credits)
}

/// Same as [`load_catalog`] over arbitrary readers.
pub fn load_catalog_from_readers<M, C>(movies: M, credits: C) -> Result<Vec<Item>>
where
    M: Read,
    C: Read,
{
    let movies: Vec<MovieRecord> = collect_records(csv::Reader::from_reader(movies))?;
    let credits: Vec<CreditRecord> = collect_records(csv::Reader::from_reader(credits))?;
    join(movies, credits)
}

fn read_path<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let load_err = |source| RecommendError::Load {
        path: path.to_path_buf(),
        source,
    };
    let reader = csv::Reader::from_path(path).map_err(load_err)?;
    let records = collect_records(reader).map_err(load_err)?;
    info!(path = %path.display(), rows = records.len(), "read catalog file");
    Ok(records)
}

fn collect_records<T, R>(mut reader: csv::Reader<R>) -> std::result::Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    reader.deserialize().collect()
}

#[derive(Debug, Default)]
struct DegradeCounter {
    genres: usize,
    keywords: usize,
    cast: usize,
    crew: usize,
}

/// Inner join on title, in movie-file order.
/// A title with several credit rows yields one item per credit row.
pub fn join(movies: Vec<MovieRecord>, credits: Vec<CreditRecord>) -> Result<Vec<Item>> {
    let movie_num = movies.len();
    let credit_num = credits.len();

    // title -> credit rows (credit file order)
    let mut by_title: HashMap<&str, Vec<&CreditRecord>> = HashMap::with_capacity(credit_num);
    for credit in &credits {
        by_title.entry(credit.title.as_str()).or_default().push(credit);
    }

    let mut items = Vec::with_capacity(movie_num);
    let mut unmatched = 0usize;
    let mut degraded = DegradeCounter::default();
    for movie in &movies {
        let Some(matches) = by_title.get(movie.title.as_str()) else {
            unmatched += 1;
            continue;
        };
        for credit in matches {
            items.push(normalize(movie, credit, &mut degraded));
        }
    }

    if items.is_empty() {
        return Err(RecommendError::EmptyCorpus(format!(
            "joining {movie_num} movies with {credit_num} credits produced no items"
        )));
    }
    if unmatched > 0 {
        warn!(unmatched, "movies without a credit row were dropped");
    }
    if degraded.genres + degraded.keywords + degraded.cast + degraded.crew > 0 {
        warn!(
            genres = degraded.genres,
            keywords = degraded.keywords,
            cast = degraded.cast,
            crew = degraded.crew,
            "some metadata fields could not be parsed and were left empty"
        );
    }
    info!(items = items.len(), "catalog joined");
    Ok(items)
}

fn normalize(movie: &MovieRecord, credit: &CreditRecord, degraded: &mut DegradeCounter) -> Item {
    let title = movie.title.as_str();

    let genres = extract_names(movie.genres.as_deref());
    degraded.genres += genres.is_degraded() as usize;
    let keywords = extract_names(movie.keywords.as_deref());
    degraded.keywords += keywords.is_degraded() as usize;
    let cast = extract_top_cast(credit.cast.as_deref());
    degraded.cast += cast.is_degraded() as usize;
    let director = extract_director(credit.crew.as_deref());
    degraded.crew += director.is_degraded() as usize;

    Item {
        id: credit
            .movie_id
            .clone()
            .or_else(|| movie.id.clone())
            .unwrap_or_default(),
        title: movie.title.clone(),
        overview: movie.overview.clone().filter(|s| !s.is_empty()),
        genres: genres.into_names_logged(title, "genres"),
        keywords: keywords.into_names_logged(title, "keywords"),
        cast: cast.into_names_logged(title, "cast"),
        director: director.into_names_logged(title, "crew"),
        release_year: release_year(movie.release_date.as_deref()),
        release_date: movie.release_date.clone(),
        poster_path: movie.poster_path.clone().filter(|s| !s.trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES: &str = "\
id,title,overview,genres,keywords,release_date
19995,Avatar,A paraplegic marine dispatched to Pandora.,\"[{\"\"id\"\": 28, \"\"name\"\": \"\"Action\"\"}]\",\"[{\"\"id\"\": 1463, \"\"name\"\": \"\"culture clash\"\"}]\",2009-12-10
27205,Inception,A thief who steals secrets.,not-json,[],16-07-2010
1,Orphan Movie,Nobody credited it.,[],[],
";

    const CREDITS: &str = "\
movie_id,title,cast,crew
19995,Avatar,\"[{\"\"name\"\": \"\"Sam Worthington\"\"}]\",\"[{\"\"job\"\": \"\"Director\"\", \"\"name\"\": \"\"James Cameron\"\"}]\"
27205,Inception,[],\"[{\"\"job\"\": \"\"Director\"\", \"\"name\"\": \"\"Christopher Nolan\"\"}]\"
";

    #[test]
    fn join_keeps_movie_order_and_drops_unmatched() {
        let items = load_catalog_from_readers(MOVIES.as_bytes(), CREDITS.as_bytes()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Avatar");
        assert_eq!(items[0].id, "19995");
        assert_eq!(items[0].genres, vec!["Action"]);
        assert_eq!(items[0].keywords, vec!["culture clash"]);
        assert_eq!(items[0].cast, vec!["Sam Worthington"]);
        assert_eq!(items[0].director, vec!["James Cameron"]);
        assert_eq!(items[0].release_year, "2009");
        assert_eq!(items[1].title, "Inception");
        assert_eq!(items[1].release_year, "2010");
    }

    #[test]
    fn malformed_genres_degrade_to_empty() {
        let items = load_catalog_from_readers(MOVIES.as_bytes(), CREDITS.as_bytes()).unwrap();
        assert!(items[1].genres.is_empty());
        assert_eq!(items[1].director, vec!["Christopher Nolan"]);
    }

    #[test]
    fn duplicate_credit_titles_fan_out() {
        let credits = "movie_id,title,cast,crew\n7,Avatar,[],[]\n8,Avatar,[],[]\n";
        let items = load_catalog_from_readers(MOVIES.as_bytes(), credits.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "7");
        assert_eq!(items[1].id, "8");
    }

    #[test]
    fn empty_join_is_fatal() {
        let credits = "movie_id,title,cast,crew\n9,Unknown,[],[]\n";
        let err = load_catalog_from_readers(MOVIES.as_bytes(), credits.as_bytes()).unwrap_err();
        assert!(matches!(err, RecommendError::EmptyCorpus(_)));
    }

    #[test]
    fn missing_title_column_is_fatal() {
        let movies = "id,name\n1,Avatar\n";
        let err = load_catalog_from_readers(movies.as_bytes(), CREDITS.as_bytes()).unwrap_err();
        assert!(matches!(err, RecommendError::Csv(_)));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_catalog("does/not/exist.csv", "nor/this.csv").unwrap_err();
        assert!(matches!(err, RecommendError::Load { .. }));
    }
}
