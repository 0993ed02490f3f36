use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// A date-ranged entry on the timeline. Ids are assigned by whoever produced
/// the document and are never reused; `end` is inclusive and never precedes
/// `start` once ingestion has accepted the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub name: String,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

const SAMPLE_ITEMS: &str = include_str!("../assets/items.json");

// Wire shape: dates stay strings until validation has a chance to name the
// offending item and field.
#[derive(Debug, Deserialize)]
struct RawItem {
    id: u64,
    start: String,
    end: String,
    name: String,
}

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed item document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item {id}: invalid {field} date {value:?}: {source}")]
    InvalidDate {
        id: u64,
        field: &'static str,
        value: String,
        source: chrono::ParseError,
    },
    #[error("item {id}: end {end} precedes start {start}")]
    ReversedRange {
        id: u64,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("duplicate item id {0}")]
    DuplicateId(u64),
}

/// Resolve the item set for this run: a JSON document given as the first
/// command line argument, or the built-in sample set.
pub fn load_items() -> Result<Vec<Item>, DataError> {
    match std::env::args().nth(1) {
        Some(path) => load_items_from_path(Path::new(&path)),
        None => parse_items(SAMPLE_ITEMS),
    }
}

fn load_items_from_path(path: &Path) -> Result<Vec<Item>, DataError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_items(&contents)
}

pub fn parse_items(json: &str) -> Result<Vec<Item>, DataError> {
    let raw_items: Vec<RawItem> = serde_json::from_str(json)?;

    let mut items = Vec::with_capacity(raw_items.len());
    let mut seen = HashSet::new();
    for raw in raw_items {
        if !seen.insert(raw.id) {
            return Err(DataError::DuplicateId(raw.id));
        }
        let start = parse_date(raw.id, "start", &raw.start)?;
        let end = parse_date(raw.id, "end", &raw.end)?;
        if end < start {
            return Err(DataError::ReversedRange {
                id: raw.id,
                start,
                end,
            });
        }
        items.push(Item {
            id: raw.id,
            start,
            end,
            name: raw.name,
        });
    }

    Ok(items)
}

fn parse_date(id: u64, field: &'static str, value: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| DataError::InvalidDate {
        id,
        field,
        value: value.to_string(),
        source,
    })
}
