//! Favorite Identity: the key that deduplicates quotes across favorites.

use crate::domain::Quote;

/// Number of leading UTF-16 code units of `text` that take part in the identity.
pub const IDENTITY_TEXT_PREFIX: usize = 20;

/// Derives the favorite identity of a quote.
///
/// `author`, `_` and the first 20 UTF-16 code units of `text` are joined, then every
/// character outside ASCII alphanumerics, Hiragana, Katakana, `ー` and the
/// common Kanji block is dropped (the underscore included). Two quotes sharing
/// author and text prefix get the same identity even if the rest differs.
pub fn identity_of(quote: &Quote) -> String {
    // A surrogate pair cut in half decodes to U+FFFD, which the filter drops.
    let units: Vec<u16> = quote.text.encode_utf16().take(IDENTITY_TEXT_PREFIX).collect();
    let prefix = String::from_utf16_lossy(&units);
    format!("{}_{}", quote.author, prefix)
        .chars()
        .filter(|c| is_identity_char(*c))
        .collect()
}

fn is_identity_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ('ぁ'..='ん').contains(&c)
        || ('ァ'..='ヶ').contains(&c)
        || c == 'ー'
        || ('一'..='龯').contains(&c)
}
