// ABOUTME: Pure read pipeline over a record snapshot: filter, sort, paginate.
// ABOUTME: Operates on owned data and never touches the persisted collection.

use serde::Serialize;

use crate::model::{Payload, Record};

/// Default page size when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound on page size, to keep responses bounded.
pub const MAX_LIMIT: usize = 100;

/// Sort order over `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a query-string token. Only the literal `desc` selects
    /// descending; every other value sorts ascending.
    pub fn from_param(token: &str) -> Self {
        if token == "desc" { Self::Desc } else { Self::Asc }
    }
}

/// Parameters for one list query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Case-insensitive substring filter over title and variant fields.
    pub q: Option<String>,
    pub sort: SortDirection,
    /// Completion filter; only meaningful for the task variant.
    pub done: Option<bool>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            q: None,
            sort: SortDirection::Desc,
            done: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One page of results plus the envelope counters.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matching records before pagination.
    pub total: usize,
    /// Records in this page.
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Run the full read pipeline over a collection snapshot.
pub fn run_query<P: Payload>(records: Vec<Record<P>>, query: &ListQuery) -> Page<Record<P>> {
    let mut matched = records;

    if let Some(q) = &query.q {
        let needle = q.to_lowercase();
        matched.retain(|r| r.title.to_lowercase().contains(&needle) || r.payload.matches(&needle));
    }

    if let Some(want) = query.done {
        matched.retain(|r| r.payload.done() == Some(want));
    }

    // Stable sort: records with equal timestamps keep their insertion order
    // under both directions.
    match query.sort {
        SortDirection::Asc => matched.sort_by(|a, b| a.created_at.total_cmp(&b.created_at)),
        SortDirection::Desc => matched.sort_by(|a, b| b.created_at.total_cmp(&a.created_at)),
    }

    let total = matched.len();
    let items: Vec<Record<P>> = matched
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect();

    Page {
        total,
        count: items.len(),
        limit: query.limit,
        offset: query.offset,
        items,
    }
}
