#![forbid(unsafe_code)]

//! Poem entries discovered in the page.

use tracing::trace;

use crate::fragment::poem_fragment;
use crate::page::Page;
use crate::slug::slugify;

/// One linked poem title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<L> {
    title: String,
    slug: String,
    link: L,
}

impl<L> Entry<L> {
    /// Build an entry for an already trimmed `title`.
    #[must_use]
    pub fn new(title: impl Into<String>, link: L) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self { title, slug, link }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The link element this entry was rendered into.
    #[must_use]
    pub const fn link(&self) -> &L {
        &self.link
    }
}

/// Entries in document order. Fixed after discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCollection<L> {
    entries: Vec<Entry<L>>,
}

impl<L> EntryCollection<L> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry<L>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry<L>> {
        self.entries.iter()
    }

    /// Index of the first entry whose slug is `slug`.
    ///
    /// Titles that slugify identically collide; the earliest one wins.
    #[must_use]
    pub fn position_of_slug(&self, slug: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.slug == slug)
    }
}

impl<L> FromIterator<Entry<L>> for EntryCollection<L> {
    fn from_iter<I: IntoIterator<Item = Entry<L>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, L> IntoIterator for &'a EntryCollection<L> {
    type Item = &'a Entry<L>;
    type IntoIter = std::slice::Iter<'a, Entry<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Link every non-blank poem-list item in `page`.
///
/// Returns `None` when the page has no poem lists at all. Blank items are
/// skipped and left as they are.
pub fn discover<P: Page>(page: &mut P) -> Option<EntryCollection<P::Link>> {
    let lists = page.poem_lists();
    if lists.is_empty() {
        return None;
    }

    let mut entries = Vec::new();
    for list in &lists {
        for item in page.list_items(list) {
            let text = page.item_text(&item);
            let title = text.trim();
            if title.is_empty() {
                continue;
            }
            let slug = slugify(title);
            let link = page.replace_with_link(&item, title, &poem_fragment(&slug));
            trace!(index = entries.len(), slug = %slug, "linked poem entry");
            entries.push(Entry {
                title: title.to_owned(),
                slug,
                link,
            });
        }
    }
    Some(EntryCollection { entries })
}
