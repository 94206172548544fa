#![forbid(unsafe_code)]

//! Poem texts embedded in the page, and their rendering into the overlay body.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Result;

/// Slug → poem text, parsed once from the page's embedded JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedContent {
    poems: HashMap<String, String>,
}

impl EmbeddedContent {
    /// An empty map: every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `slug: text` pairs.
    ///
    /// A valid JSON value that is not an object yields an empty map, and
    /// non-string members are skipped; only malformed JSON is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(members) = value else {
            debug!("embedded poem data is not a JSON object; treating as empty");
            return Ok(Self::empty());
        };
        let poems = members
            .into_iter()
            .filter_map(|(slug, text)| match text {
                serde_json::Value::String(text) => Some((slug, text)),
                _ => None,
            })
            .collect();
        Ok(Self { poems })
    }

    /// Parse the raw text of the embedded data element, degrading to an empty
    /// map when the element is absent or its contents do not parse.
    #[must_use]
    pub fn from_embedded(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::empty();
        };
        let raw = if raw.trim().is_empty() { "{}" } else { raw };
        match Self::from_json(raw) {
            Ok(content) => {
                debug!(poems = content.len(), "loaded embedded poem data");
                content
            }
            Err(err) => {
                warn!(error = %err, "embedded poem data is unparsable; treating as empty");
                Self::empty()
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.poems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }

    /// Text stored under `slug`. Empty strings count as missing.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.poems
            .get(slug)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EmbeddedContent {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            poems: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Fixed corrections for slugs whose title and data key drifted apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugAliasTable {
    pairs: &'static [(&'static str, &'static str)],
}

const BUILTIN_ALIASES: &[(&str, &str)] =
    &[("chladnymi-jak-kus-ledu-rty", "chladnymi-jak-kus-ledu-rety")];

impl SlugAliasTable {
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            pairs: BUILTIN_ALIASES,
        }
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(from, _)| *from == slug)
            .map(|&(_, to)| to)
    }
}

impl Default for SlugAliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// What the overlay body shows for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoemBody<'a> {
    Text(&'a str),
    Placeholder,
}

impl<'a> PoemBody<'a> {
    /// Resolve the body for `slug`: direct lookup, then the alias, then the
    /// placeholder when nothing non-blank is found.
    #[must_use]
    pub fn resolve(content: &'a EmbeddedContent, aliases: &SlugAliasTable, slug: &str) -> Self {
        let text = content
            .get(slug)
            .or_else(|| aliases.get(slug).and_then(|alias| content.get(alias)));
        match text {
            Some(text) if !text.trim().is_empty() => Self::Text(text),
            _ => Self::Placeholder,
        }
    }

    /// Body markup. `placeholder` is inserted as text.
    #[must_use]
    pub fn to_html(&self, placeholder: &str) -> String {
        match self {
            Self::Text(text) => format!("<p>{}</p>", render_lines(text)),
            Self::Placeholder => format!("<p>{}</p>", escape_text(placeholder)),
        }
    }
}

/// Escape `&` and `<` so poem text cannot introduce markup.
#[must_use]
pub fn escape_text(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape each line and join with `<br>`, keeping blank lines.
#[must_use]
pub fn render_lines(text: &str) -> String {
    text.split('\n')
        .map(escape_text)
        .collect::<Vec<_>>()
        .join("<br>")
}
