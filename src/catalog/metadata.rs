//! Metadata normalization.
//!
//! The raw catalog stores genres, keywords, cast and crew as JSON-encoded
//! arrays of records (`[{"id": 28, "name": "Action"}, ...]`). These helpers
//! pull plain name lists out of them. A field that cannot be read never
//! aborts the load: it yields [`Extraction::Degraded`] and contributes no
//! signal to the item's tag.

use std::fmt;

use serde_json::Value;
use tracing::debug;

/// Number of billed cast members kept per item.
pub const CAST_LIMIT: usize = 3;

/// Job title marking the director in crew records.
pub const DIRECTOR_JOB: &str = "Director";

/// Outcome of extracting a name list from one encoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The field was read; the list may legitimately be empty.
    Parsed(Vec<String>),
    /// The field could not be read; callers fall back to an empty list.
    Degraded(DegradeReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// field absent or blank
    Missing,
    /// not a JSON array of records
    Malformed(String),
    /// a record lacked the named string field
    MissingField(&'static str),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::Missing => write!(f, "field is missing"),
            DegradeReason::Malformed(e) => write!(f, "malformed encoding: {e}"),
            DegradeReason::MissingField(name) => write!(f, "record without string field `{name}`"),
        }
    }
}

impl Extraction {
    #[inline]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Extraction::Degraded(_))
    }

    /// The extracted names, or an empty list when degraded.
    pub fn into_names(self) -> Vec<String> {
        match self {
            Extraction::Parsed(names) => names,
            Extraction::Degraded(_) => Vec::new(),
        }
    }

    /// Log a degraded extraction under `field` and return the names.
    pub(crate) fn into_names_logged(self, title: &str, field: &str) -> Vec<String> {
        if let Extraction::Degraded(reason) = &self {
            debug!(title, field, %reason, "metadata degraded to empty list");
        }
        self.into_names()
    }
}

fn parse_records(encoding: Option<&str>) -> Result<Vec<Value>, DegradeReason> {
    let encoding = match encoding.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(DegradeReason::Missing),
    };
    serde_json::from_str::<Vec<Value>>(encoding).map_err(|e| DegradeReason::Malformed(e.to_string()))
}

fn string_field<'a>(record: &'a Value, field: &'static str) -> Result<&'a str, DegradeReason> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or(DegradeReason::MissingField(field))
}

fn names_of<'a>(records: impl Iterator<Item = &'a Value>) -> Extraction {
    match records
        .map(|r| string_field(r, "name").map(str::to_string))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(names) => Extraction::Parsed(names),
        Err(reason) => Extraction::Degraded(reason),
    }
}

/// Every record's `name`, in order (genres, keywords).
pub fn extract_names(encoding: Option<&str>) -> Extraction {
    match parse_records(encoding) {
        Ok(records) => names_of(records.iter()),
        Err(reason) => Extraction::Degraded(reason),
    }
}

/// Names of the first [`CAST_LIMIT`] cast records, in billing order.
/// Records past the limit are not inspected.
pub fn extract_top_cast(encoding: Option<&str>) -> Extraction {
    match parse_records(encoding) {
        Ok(records) => names_of(records.iter().take(CAST_LIMIT)),
        Err(reason) => Extraction::Degraded(reason),
    }
}

/// The first crew record whose `job` is [`DIRECTOR_JOB`], as a one-element list.
/// Later directors are ignored; records after the first match are not inspected.
pub fn extract_director(encoding: Option<&str>) -> Extraction {
    let records = match parse_records(encoding) {
        Ok(records) => records,
        Err(reason) => return Extraction::Degraded(reason),
    };
    for record in &records {
        let job = match string_field(record, "job") {
            Ok(job) => job,
            Err(reason) => return Extraction::Degraded(reason),
        };
        if job == DIRECTOR_JOB {
            return match string_field(record, "name") {
                Ok(name) => Extraction::Parsed(vec![name.to_string()]),
                Err(reason) => Extraction::Degraded(reason),
            };
        }
    }
    Extraction::Parsed(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_keep_source_order() {
        let enc = r#"[{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}, {"id": 878, "name": "Science Fiction"}]"#;
        assert_eq!(
            extract_names(Some(enc)),
            Extraction::Parsed(vec!["Action".into(), "Adventure".into(), "Science Fiction".into()])
        );
    }

    #[test]
    fn empty_array_is_parsed_not_degraded() {
        let ex = extract_names(Some("[]"));
        assert!(!ex.is_degraded());
        assert!(ex.into_names().is_empty());
    }

    #[test]
    fn malformed_encoding_degrades() {
        let ex = extract_names(Some("not-json"));
        assert!(matches!(ex, Extraction::Degraded(DegradeReason::Malformed(_))));
        assert!(ex.into_names().is_empty());

        // a JSON object is not a list of records
        assert!(extract_names(Some(r#"{"name": "Action"}"#)).is_degraded());
    }

    #[test]
    fn missing_field_degrades() {
        assert_eq!(extract_names(None), Extraction::Degraded(DegradeReason::Missing));
        assert_eq!(extract_names(Some("  ")), Extraction::Degraded(DegradeReason::Missing));
    }

    #[test]
    fn record_without_name_degrades_whole_list() {
        let enc = r#"[{"name": "Action"}, {"id": 3}]"#;
        assert_eq!(
            extract_names(Some(enc)),
            Extraction::Degraded(DegradeReason::MissingField("name"))
        );
    }

    #[test]
    fn cast_keeps_first_three() {
        let enc = r#"[
            {"cast_id": 1, "name": "Leonardo DiCaprio"},
            {"cast_id": 2, "name": "Joseph Gordon-Levitt"},
            {"cast_id": 3, "name": "Ellen Page"},
            {"cast_id": 4, "name": "Tom Hardy"},
            {"cast_id": 5}
        ]"#;
        assert_eq!(
            extract_top_cast(Some(enc)).into_names(),
            vec!["Leonardo DiCaprio", "Joseph Gordon-Levitt", "Ellen Page"]
        );
    }

    #[test]
    fn director_first_match_wins() {
        let enc = r#"[
            {"job": "Producer", "name": "Emma Thomas"},
            {"job": "Director", "name": "Lana Wachowski"},
            {"job": "Director", "name": "Lilly Wachowski"}
        ]"#;
        assert_eq!(
            extract_director(Some(enc)),
            Extraction::Parsed(vec!["Lana Wachowski".into()])
        );
    }

    #[test]
    fn director_absent_is_empty_parse() {
        let enc = r#"[{"job": "Editor", "name": "Lee Smith"}]"#;
        assert_eq!(extract_director(Some(enc)), Extraction::Parsed(vec![]));
        assert!(extract_director(Some("[oops")).is_degraded());
    }
}
