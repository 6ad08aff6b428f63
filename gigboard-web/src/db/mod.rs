//! Store queries and commands
//!
//! Every function takes the caller's connection handle, normally the
//! transaction opened for the current request, and any "now" it compares
//! against. Nothing here opens its own connection.

use serde::Serialize;

pub mod artists;
pub mod shows;
pub mod venues;

/// Search response: matching rows with their upcoming show counts
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

impl SearchResults {
    fn new(data: Vec<SearchMatch>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct SearchMatch {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Id/name pair for select boxes
#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct EntityChoice {
    pub id: i64,
    pub name: String,
}

/// Which side of "now" a detail page partition covers
///
/// Both comparisons are strict: a show starting exactly at `now` is in
/// neither partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowPartition {
    Past,
    Upcoming,
}

impl ShowPartition {
    fn comparison(self) -> &'static str {
        match self {
            ShowPartition::Past => "<",
            ShowPartition::Upcoming => ">",
        }
    }
}
