//! Client-side filtering of stored snapshots.
//!
//! Filtering is a stable selection: the result is the list of indices of
//! matching elements, in snapshot order.

use api_types::{stock::StockEntry, user::User};

/// Entity-specific fields the filters look at.
pub trait Filterable {
    /// Fields searched by the text predicate.
    fn text_fields(&self) -> Vec<Option<&str>>;

    /// Field matched by the categorical predicate.
    fn facet(&self) -> Option<&str> {
        None
    }
}

impl Filterable for StockEntry {
    fn text_fields(&self) -> Vec<Option<&str>> {
        let kind = self.equipment_type.as_ref();
        vec![
            kind.map(|t| t.nome.as_str()),
            kind.and_then(|t| t.marca.as_deref()),
            kind.and_then(|t| t.modelo.as_deref()),
        ]
    }
}

impl Filterable for User {
    fn text_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.nome.as_str()),
            self.cpf.as_deref(),
            self.matricula.as_deref(),
        ]
    }

    fn facet(&self) -> Option<&str> {
        self.cidade.as_deref()
    }
}

/// Text and categorical predicates, combined with AND. Empty strings mean
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub text: String,
    pub facet: String,
}

impl Predicate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            facet: String::new(),
        }
    }

    pub fn facet(facet: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            facet: facet.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.facet.is_empty()
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        matches_text(item, &self.text) && matches_facet(item, &self.facet)
    }
}

fn matches_text<T: Filterable>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    item.text_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_facet<T: Filterable>(item: &T, facet: &str) -> bool {
    facet.is_empty() || item.facet() == Some(facet)
}

/// Indices of `items` matching `predicate`, in original order.
pub fn visible_indices<T: Filterable>(items: &[T], predicate: &Predicate) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| predicate.matches(*item))
        .map(|(idx, _)| idx)
        .collect()
}

/// Distinct non-empty facet values, in first-appearance order.
pub fn distinct_facets<T: Filterable>(items: &[T]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in items.iter().filter_map(Filterable::facet) {
        if !value.is_empty() && !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// One entry of a categorical selector. The first option is always "all",
/// whose value is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub label: String,
    pub value: String,
}

pub fn facet_options<T: Filterable>(items: &[T], all_label: &str) -> Vec<FacetOption> {
    std::iter::once(FacetOption {
        label: all_label.to_string(),
        value: String::new(),
    })
    .chain(distinct_facets(items).into_iter().map(|value| FacetOption {
        label: value.clone(),
        value,
    }))
    .collect()
}
