// src/controllers/filter.rs

//! Client-side search and dropdown filters.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::models::parse_wire;

/// Records that take part in free-text search.
pub trait Searchable {
    /// Fields matched by the search box.
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match over the record's search fields.
/// A blank term matches everything.
pub fn matches_search<T: Searchable + ?Sized>(record: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Dropdown value: either the `all` sentinel or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => expected == value,
        }
    }
}

impl<T: DeserializeOwned> Choice<T> {
    /// Parses a dropdown value in wire format; `all` (or blank) is the sentinel.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Some(Choice::All);
        }
        parse_wire(raw).map(Choice::Only)
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Search string plus named exact-match filters, recomputed on every read.
pub struct FilterSet<T> {
    search: String,
    predicates: BTreeMap<&'static str, Predicate<T>>,
}

impl<T> Default for FilterSet<T> {
    fn default() -> Self {
        Self {
            search: String::new(),
            predicates: BTreeMap::new(),
        }
    }
}

impl<T> fmt::Debug for FilterSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSet")
            .field("search", &self.search)
            .field("filters", &self.predicates.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Searchable> FilterSet<T> {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Installs (or, for `Choice::All`, removes) the filter `name` comparing `field` to the choice.
    pub fn set_choice<V, F>(&mut self, name: &'static str, choice: Choice<V>, field: F)
    where
        V: PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        match choice {
            Choice::All => {
                self.predicates.remove(name);
            }
            Choice::Only(expected) => {
                self.predicates
                    .insert(name, Box::new(move |record| field(record) == expected));
            }
        }
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.predicates.clear();
    }

    /// True when neither a search term nor any dropdown filter is active.
    pub fn is_idle(&self) -> bool {
        self.search.trim().is_empty() && self.predicates.is_empty()
    }

    pub fn admits(&self, record: &T) -> bool {
        matches_search(record, &self.search) && self.predicates.values().all(|p| p(record))
    }

    pub fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.admits(r)).collect()
    }
}
