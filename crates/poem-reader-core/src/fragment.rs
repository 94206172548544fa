#![forbid(unsafe_code)]

//! The `#poem/<slug>` URL fragment protocol.

/// Prefix shared by every poem-selection fragment.
pub const POEM_FRAGMENT_PREFIX: &str = "#poem/";

/// Fragment selecting the poem with `slug`.
#[must_use]
pub fn poem_fragment(slug: &str) -> String {
    let mut out = String::with_capacity(POEM_FRAGMENT_PREFIX.len() + slug.len());
    out.push_str(POEM_FRAGMENT_PREFIX);
    out.push_str(slug);
    out
}

/// Whether `fragment` is a poem selection, i.e. whether closing the overlay
/// may clear it.
#[must_use]
pub fn is_poem_fragment(fragment: &str) -> bool {
    fragment.starts_with(POEM_FRAGMENT_PREFIX)
}

/// Extract the slug from `#poem/<slug>`.
///
/// The slug must be non-empty and free of line terminators; anything else is
/// not a poem selection.
#[must_use]
pub fn parse_poem_fragment(fragment: &str) -> Option<&str> {
    let slug = fragment.strip_prefix(POEM_FRAGMENT_PREFIX)?;
    if slug.is_empty() || slug.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return None;
    }
    Some(slug)
}
