//! crates/daily_literature_core/src/search.rs
//!
//! Filtering, scoring and ordering over the in-memory catalog and over a
//! user's favorites list. Nothing here mutates its input; every call returns
//! a freshly ordered vector.

use std::cmp::{Ordering, Reverse};

use crate::domain::{FavoriteRecord, FavoriteSort, Quote, SortMode, ALL_ERAS};

//=========================================================================================
// Relevance Weights
//=========================================================================================

const AUTHOR_WEIGHT: u32 = 10;
const TEXT_OCCURRENCE_WEIGHT: u32 = 5;
const WORK_WEIGHT: u32 = 8;
const KEYWORD_WORD_WEIGHT: u32 = 6;
const KEYWORD_MEANING_WEIGHT: u32 = 3;

//=========================================================================================
// Catalog Search
//=========================================================================================

/// Filters and orders the catalog.
///
/// A blank `query` matches every quote and leaves relevance order untouched.
/// `era` is matched exactly unless it is `"all"`.
pub fn search(catalog: &[Quote], query: &str, era: &str, sort_mode: SortMode) -> Vec<Quote> {
    let needle = (!query.trim().is_empty()).then(|| query.to_lowercase());

    let mut results: Vec<Quote> = catalog
        .iter()
        .filter(|q| needle.as_deref().map_or(true, |n| matches_query(q, n)))
        .filter(|q| era == ALL_ERAS || q.era.as_deref() == Some(era))
        .cloned()
        .collect();

    match sort_mode {
        SortMode::Author => results.sort_by(|a, b| locale_compare(&a.author, &b.author)),
        SortMode::Era => results.sort_by(|a, b| {
            locale_compare(
                a.era.as_deref().unwrap_or_default(),
                b.era.as_deref().unwrap_or_default(),
            )
        }),
        SortMode::Length => results.sort_by_key(|q| q.text.encode_utf16().count()),
        SortMode::Relevance => {
            if let Some(needle) = needle.as_deref() {
                results.sort_by_cached_key(|q| Reverse(score_lowered(q, needle)));
            }
        }
    }

    results
}

/// Weighted substring score of `quote` against `query`, case-insensitive.
pub fn relevance_score(quote: &Quote, query: &str) -> u32 {
    score_lowered(quote, &query.to_lowercase())
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches_query(quote: &Quote, needle: &str) -> bool {
    contains(&quote.text, needle)
        || contains(&quote.author, needle)
        || quote.work.as_deref().is_some_and(|w| contains(w, needle))
        || quote.meaning.as_deref().is_some_and(|m| contains(m, needle))
        || quote.keywords.as_deref().is_some_and(|keywords| {
            keywords
                .iter()
                .any(|k| contains(&k.word, needle) || contains(&k.meaning, needle))
        })
}

fn score_lowered(quote: &Quote, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }

    let mut score = 0;
    if contains(&quote.author, needle) {
        score += AUTHOR_WEIGHT;
    }

    let occurrences = quote.text.to_lowercase().matches(needle).count() as u32;
    score += occurrences * TEXT_OCCURRENCE_WEIGHT;

    if quote.work.as_deref().is_some_and(|w| contains(w, needle)) {
        score += WORK_WEIGHT;
    }

    if let Some(keywords) = quote.keywords.as_deref() {
        if keywords.iter().any(|k| contains(&k.word, needle)) {
            score += KEYWORD_WORD_WEIGHT;
        }
        if keywords.iter().any(|k| contains(&k.meaning, needle)) {
            score += KEYWORD_MEANING_WEIGHT;
        }
    }

    score
}

//=========================================================================================
// Locale-aware Ordering
//=========================================================================================

/// Orders strings the way a Japanese reader expects.
///
/// Katakana is folded onto Hiragana and letters are case-folded before
/// comparing; equal keys fall back to code point order so the result is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(collation_key(b)).then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(fold_kana)
}

fn fold_kana(c: char) -> char {
    match c {
        'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}

//=========================================================================================
// Favorites View
//=========================================================================================

/// Filters the favorites list by text, author or work and orders it.
pub fn filter_favorites(
    favorites: &[FavoriteRecord],
    query: &str,
    sort: FavoriteSort,
) -> Vec<FavoriteRecord> {
    let needle = query.to_lowercase();

    let mut results: Vec<FavoriteRecord> = favorites
        .iter()
        .filter(|f| {
            contains(&f.text, &needle) || contains(&f.author, &needle) || contains(&f.work, &needle)
        })
        .cloned()
        .collect();

    match sort {
        FavoriteSort::Newest => results.sort_by_key(|f| Reverse(f.added_at)),
        FavoriteSort::Oldest => results.sort_by_key(|f| f.added_at),
        FavoriteSort::Author => results.sort_by(|a, b| locale_compare(&a.author, &b.author)),
        FavoriteSort::Era => results.sort_by(|a, b| locale_compare(&a.era, &b.era)),
    }

    results
}
