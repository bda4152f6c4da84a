//! Record filtering. One predicate-composition utility for every list view.
//!
//! DESIGN
//! ======
//! Each list screen shows a fixed collection narrowed by a free-text search
//! and up to two categorical selectors (status, plan, severity). Record types
//! declare their searchable fields and categorical keys once, as field
//! selectors on the `Record` trait; `RecordFilter` composes the active
//! predicates with logical AND.
//!
//! INVARIANTS
//! ==========
//! - Filtering borrows the collection and never mutates it.
//! - Output preserves collection order (stable filter, not a sort).
//! - A neutral filter (blank search, every selector `all`) is the identity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field selector: borrows one string field of a record.
pub type Field<T> = fn(&T) -> &str;

/// A flat mock record that list views can filter.
pub trait Record: Sized + 'static {
    /// Plural noun used in the empty-state message ("bots", "issues").
    const NOUN: &'static str;
    /// Fields the free-text search looks at.
    const SEARCH_FIELDS: &'static [Field<Self>];
    /// Categorical keys accepted as selectors, with their field.
    const CATEGORIES: &'static [(&'static str, Field<Self>)] = &[];
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter '{key}' (expected one of: {allowed})")]
    UnknownCategory { key: String, allowed: String },
}

// =============================================================================
// FILTER STATE
// =============================================================================

/// Filter values as they arrive from a query string: `?search=faq&status=active`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(flatten)]
    pub categories: BTreeMap<String, String>,
}

#[cfg(test)]
impl FilterState {
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self { search: term.into(), categories: BTreeMap::new() }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.categories.insert(key.into(), value.into());
        self
    }
}

/// A parsed categorical selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Only(String),
}

impl Selection {
    /// `all` and blank values clear the constraint.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_category(raw);
        if normalized.is_empty() || normalized == "all" { Self::All } else { Self::Only(normalized) }
    }

    #[must_use]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => normalize_category(value) == *wanted,
        }
    }
}

/// Lowercase and drop separators so `In Progress`, `in-progress` and
/// `inprogress` compare equal.
#[must_use]
pub fn normalize_category(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// RECORD FILTER
// =============================================================================

pub struct RecordFilter<T: Record> {
    needle: String,
    constraints: Vec<(Field<T>, Selection)>,
}

impl<T: Record> Default for RecordFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordFilter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { needle: String::new(), constraints: Vec::new() }
    }

    /// Build a filter from raw query values.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` if a selector key is not one of the record's
    /// categorical keys.
    pub fn from_state(state: &FilterState) -> Result<Self, FilterError> {
        let mut filter = Self::new().search(&state.search);
        for (key, value) in &state.categories {
            filter = filter.category(key, value)?;
        }
        Ok(filter)
    }

    #[must_use]
    pub fn search(mut self, term: &str) -> Self {
        self.needle = term.trim().to_lowercase();
        self
    }

    /// Add a categorical selector.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` if `key` is not declared by the record type.
    pub fn category(mut self, key: &str, value: &str) -> Result<Self, FilterError> {
        let Some((_, field)) = T::CATEGORIES.iter().find(|(name, _)| *name == key) else {
            let allowed = T::CATEGORIES.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ");
            return Err(FilterError::UnknownCategory { key: key.to_owned(), allowed });
        };
        match Selection::parse(value) {
            Selection::All => {}
            selection => self.constraints.push((*field, selection)),
        }
        Ok(self)
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.needle.is_empty() && self.constraints.is_empty()
    }

    #[must_use]
    pub fn matches(&self, record: &T) -> bool {
        self.matches_search(record) && self.constraints.iter().all(|(field, sel)| sel.admits(field(record)))
    }

    fn matches_search(&self, record: &T) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        T::SEARCH_FIELDS
            .iter()
            .any(|field| field(record).to_lowercase().contains(&self.needle))
    }

    /// Visible subset, in collection order.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

// =============================================================================
// LISTING
// =============================================================================

/// A filtered list view, with an explicit empty state.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub visible: usize,
    pub empty_state: Option<String>,
}

impl<T: Record + Clone> Listing<T> {
    #[must_use]
    pub fn build(records: &[T], filter: &RecordFilter<T>) -> Self {
        let items: Vec<T> = filter.apply(records).into_iter().cloned().collect();
        let empty_state = items
            .is_empty()
            .then(|| format!("No {} match your current filters.", T::NOUN));
        Self { total: records.len(), visible: items.len(), items, empty_state }
    }

    /// Parse `state` and build the listing in one step.
    ///
    /// # Errors
    ///
    /// Propagates `FilterError` from an unknown selector key.
    pub fn from_state(records: &[T], state: &FilterState) -> Result<Self, FilterError> {
        let filter = RecordFilter::from_state(state)?;
        Ok(Self::build(records, &filter))
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
