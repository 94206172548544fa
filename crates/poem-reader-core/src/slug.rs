#![forbid(unsafe_code)]

//! URL-safe identifiers derived from poem titles.
//!
//! # Example
//! ```
//! use poem_reader_core::slug::slugify;
//!
//! assert_eq!(slugify("Chladnými jak kus ledu rty"), "chladnymi-jak-kus-ledu-rty");
//! assert_eq!(slugify("  --Já, ty & on!-- "), "ja-ty-on");
//! assert_eq!(slugify(""), "");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block (U+0300..=U+036F).
const fn is_combining_diacritic(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

/// Derive the slug for `title`.
///
/// NFD-decomposes, drops combining diacritics, lowercases, then collapses
/// every run of characters outside `[a-z0-9]` into a single `-`. Leading and
/// trailing separators are never emitted.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_separator = false;

    let folded = title
        .nfd()
        .filter(|&c| !is_combining_diacritic(c))
        .flat_map(char::to_lowercase);

    for c in folded {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Whether `candidate` has the shape [`slugify`] produces.
///
/// Empty strings qualify (the slug of an empty title).
#[must_use]
pub fn is_slug(candidate: &str) -> bool {
    if candidate.starts_with('-') || candidate.ends_with('-') || candidate.contains("--") {
        return false;
    }
    candidate
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
