//! Daily and random quote selection.
//!
//! The day-of-year is taken from the host's local calendar date, so the quote
//! flips at local midnight rather than at a fixed UTC instant.

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;

use crate::domain::Quote;

/// Day-of-year used for selection: 1 on January 1st, up to 366.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Picks the quote for `date`. Returns `None` only for an empty catalog.
pub fn quote_of_the_day(catalog: &[Quote], date: NaiveDate) -> Option<&Quote> {
    if catalog.is_empty() {
        return None;
    }
    let index = day_of_year(date) as usize % catalog.len();
    catalog.get(index)
}

/// Picks the quote for today's local date.
pub fn quote_of_today(catalog: &[Quote]) -> Option<&Quote> {
    quote_of_the_day(catalog, Local::now().date_naive())
}

/// Uniformly random quote. May repeat the current one.
pub fn random_quote(catalog: &[Quote]) -> Option<&Quote> {
    random_quote_with(catalog, &mut rand::rng())
}

/// Same as [`random_quote`] but drawing from the given generator.
pub fn random_quote_with<'a, R: Rng + ?Sized>(catalog: &'a [Quote], rng: &mut R) -> Option<&'a Quote> {
    if catalog.is_empty() {
        return None;
    }
    catalog.get(rng.random_range(0..catalog.len()))
}
