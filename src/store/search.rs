//! Fuzzy matching and result ordering for deal listings.
//!
//! Each candidate field is ranked against the query on a ladder running
//! from an exact case-sensitive hit down to a loose in-order subsequence.
//! Anything ranked [`Ranking::NoMatch`] is dropped; the rank itself does
//! not influence the final order, which is always restaurant then age.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::deal::Deal;

/// Deal field the search query is matched against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchKey {
    /// `Deal::title`.
    Title,
    /// `Deal::restaurant`.
    Restaurant,
    /// `Deal::price`.
    Price,
}

impl SearchKey {
    /// Field value for this key, if the deal has one.
    #[must_use]
    pub fn value(self, deal: &Deal) -> Option<&str> {
        match self {
            Self::Title => deal.title.as_deref(),
            Self::Restaurant => deal.restaurant.as_deref(),
            Self::Price => deal.price.as_deref(),
        }
    }
}

/// How closely a field matched the query. Later variants rank higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ranking {
    /// Query characters do not all appear in order.
    NoMatch,
    /// Query characters appear in order, possibly spread out.
    Matches,
    /// Query is contained in the field's word initials.
    Acronym,
    /// Query appears anywhere in the field.
    Contains,
    /// Query begins one of the field's later words.
    WordStartsWith,
    /// Field begins with the query.
    StartsWith,
    /// Field equals the query ignoring case.
    Equal,
    /// Field equals the query exactly.
    CaseSensitiveEqual,
}

/// Rank a single field value against `query`.
///
/// Accents are stripped from both sides first, so `cafe` matches `Café`.
#[must_use]
pub fn rank_str(candidate: &str, query: &str) -> Ranking {
    let candidate = fold_diacritics(candidate);
    let query = fold_diacritics(query);

    let query_len = query.chars().count();
    if candidate.chars().count() < query_len {
        return Ranking::NoMatch;
    }
    if candidate == query {
        return Ranking::CaseSensitiveEqual;
    }

    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();

    if candidate == query {
        return Ranking::Equal;
    }
    if candidate.starts_with(&query) {
        return Ranking::StartsWith;
    }
    if candidate.contains(&format!(" {query}")) {
        return Ranking::WordStartsWith;
    }
    if candidate.contains(&query) {
        return Ranking::Contains;
    }
    if query_len == 1 {
        return Ranking::NoMatch;
    }
    if acronym(&candidate).contains(&query) {
        return Ranking::Acronym;
    }
    if is_subsequence(&candidate, &query) {
        Ranking::Matches
    } else {
        Ranking::NoMatch
    }
}

/// Best ranking of `deal` across `keys`.
#[must_use]
pub fn rank_deal(deal: &Deal, query: &str, keys: &[SearchKey]) -> Ranking {
    keys.iter()
        .filter_map(|key| key.value(deal))
        .map(|value| rank_str(value, query))
        .max()
        .unwrap_or(Ranking::NoMatch)
}

/// Keep only the deals that match `query` on at least one key.
#[must_use]
pub fn filter_deals(deals: Vec<Deal>, query: &str, keys: &[SearchKey]) -> Vec<Deal> {
    deals
        .into_iter()
        .filter(|deal| rank_deal(deal, query, keys) >= Ranking::Matches)
        .collect()
}

/// Listing order: restaurant ascending (deals without one last), then
/// creation time ascending.
#[must_use]
pub fn listing_order(a: &Deal, b: &Deal) -> Ordering {
    let by_restaurant = match (&a.restaurant, &b.restaurant) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_restaurant.then_with(|| a.created_at.cmp(&b.created_at))
}

/// Decompose to NFD and drop combining marks.
fn fold_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// First letter of every word, splitting on spaces and hyphens.
fn acronym(s: &str) -> String {
    s.split(' ')
        .flat_map(|word| word.split('-'))
        .filter_map(|part| part.chars().next())
        .collect()
}

fn is_subsequence(candidate: &str, query: &str) -> bool {
    let mut remaining = candidate.chars();
    query
        .chars()
        .all(|wanted| remaining.by_ref().any(|c| c == wanted))
}
