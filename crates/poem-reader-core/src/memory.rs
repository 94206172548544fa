#![forbid(unsafe_code)]

//! In-memory [`Page`] for deterministic hosting and tests.
//!
//! Every effect the reader has on the page is recorded in public fields so a
//! test can assert on the exact observable state after a sequence of events.

use crate::error::{ReaderError, Result};
use crate::page::{OverlayOrigin, Page};
use crate::scroll_hint::ScrollMetrics;

/// Handle to a link created by [`MemoryPage::replace_with_link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryItem {
    pub text: String,
    /// Set once the item's text has been replaced by a link.
    pub link: Option<LinkId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLink {
    pub title: String,
    pub href: String,
    pub active: bool,
}

/// Overlay shell present before the reader mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    #[default]
    Absent,
    /// Pre-rendered by the page and complete.
    Prerendered,
    /// Pre-rendered but missing its body container.
    Broken,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryPage {
    pub lists: Vec<Vec<MemoryItem>>,
    pub links: Vec<MemoryLink>,
    pub embedded: Option<String>,
    pub shell: ShellState,
    /// Number of overlay shells this page had to build.
    pub overlay_builds: usize,
    pub fragment: String,
    /// Number of history replacements (set or clear).
    pub history_replacements: usize,
    pub overlay_open: bool,
    pub title: String,
    pub body_html: String,
    pub position: String,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub close_focused: bool,
    pub page_scroll_locked: bool,
    pub scroll_hint_visible: bool,
    pub metrics: ScrollMetrics,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// A page with no poem lists and an overlay that fits its content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: Vec::new(),
            links: Vec::new(),
            embedded: None,
            shell: ShellState::Absent,
            overlay_builds: 0,
            fragment: String::new(),
            history_replacements: 0,
            overlay_open: false,
            title: String::new(),
            body_html: String::new(),
            position: String::new(),
            previous_disabled: false,
            next_disabled: false,
            close_focused: false,
            page_scroll_locked: false,
            scroll_hint_visible: false,
            metrics: ScrollMetrics::new(0.0, 600.0, 600.0),
        }
    }

    /// Add a poem list whose items carry `texts`.
    #[must_use]
    pub fn with_list<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists.push(
            texts
                .into_iter()
                .map(|text| MemoryItem {
                    text: text.into(),
                    link: None,
                })
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn with_embedded(mut self, raw: impl Into<String>) -> Self {
        self.embedded = Some(raw.into());
        self
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }

    #[must_use]
    pub const fn with_shell(mut self, shell: ShellState) -> Self {
        self.shell = shell;
        self
    }

    /// Overlay content height and viewport height, scrolled to the top.
    #[must_use]
    pub const fn with_overlay_size(mut self, scroll_height: f64, client_height: f64) -> Self {
        self.metrics = ScrollMetrics::new(0.0, scroll_height, client_height);
        self
    }

    #[must_use]
    pub fn link(&self, id: LinkId) -> Option<&MemoryLink> {
        self.links.get(id.0)
    }

    /// Links currently marked active.
    #[must_use]
    pub fn active_links(&self) -> Vec<LinkId> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.active)
            .map(|(i, _)| LinkId(i))
            .collect()
    }

    /// Simulate the user scrolling the overlay to `scroll_top`.
    pub fn scroll_to(&mut self, scroll_top: f64) {
        self.metrics.scroll_top = scroll_top.clamp(0.0, self.metrics.max_scroll_top());
    }

    /// Simulate navigation that changes the fragment (`hashchange`).
    pub fn navigate_to_fragment(&mut self, fragment: impl Into<String>) {
        self.fragment = fragment.into();
    }
}

impl Page for MemoryPage {
    type List = usize;
    type Item = (usize, usize);
    type Link = LinkId;

    fn poem_lists(&self) -> Vec<usize> {
        (0..self.lists.len()).collect()
    }

    fn list_items(&self, list: &usize) -> Vec<(usize, usize)> {
        self.lists
            .get(*list)
            .map(|items| (0..items.len()).map(|i| (*list, i)).collect())
            .unwrap_or_default()
    }

    fn item_text(&self, &(list, item): &(usize, usize)) -> String {
        self.lists
            .get(list)
            .and_then(|items| items.get(item))
            .map(|slot| slot.text.clone())
            .unwrap_or_default()
    }

    fn replace_with_link(&mut self, &(list, item): &(usize, usize), title: &str, href: &str) -> LinkId {
        let id = LinkId(self.links.len());
        self.links.push(MemoryLink {
            title: title.to_owned(),
            href: href.to_owned(),
            active: false,
        });
        if let Some(slot) = self.lists.get_mut(list).and_then(|items| items.get_mut(item)) {
            title.clone_into(&mut slot.text);
            slot.link = Some(id);
        }
        id
    }

    fn ensure_overlay(&mut self) -> Result<OverlayOrigin> {
        match self.shell {
            ShellState::Absent => {
                self.overlay_builds += 1;
                self.shell = ShellState::Prerendered;
                Ok(OverlayOrigin::Created)
            }
            ShellState::Prerendered => Ok(OverlayOrigin::Reused),
            ShellState::Broken => Err(ReaderError::missing_element("#poem-body")),
        }
    }

    fn embedded_content(&self) -> Option<String> {
        self.embedded.clone()
    }

    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_owned();
        self.history_replacements += 1;
    }

    fn clear_fragment(&mut self) {
        self.fragment.clear();
        self.history_replacements += 1;
    }

    fn set_overlay_open(&mut self, open: bool) {
        self.overlay_open = open;
        if !open {
            self.close_focused = false;
        }
    }

    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn set_body_html(&mut self, html: &str) {
        html.clone_into(&mut self.body_html);
    }

    fn set_position(&mut self, text: &str) {
        text.clone_into(&mut self.position);
    }

    fn set_nav_disabled(&mut self, previous: bool, next: bool) {
        self.previous_disabled = previous;
        self.next_disabled = next;
    }

    fn set_link_active(&mut self, link: &LinkId, active: bool) {
        if let Some(link) = self.links.get_mut(link.0) {
            link.active = active;
        }
    }

    fn reset_overlay_scroll(&mut self) {
        self.metrics.scroll_top = 0.0;
    }

    fn focus_close(&mut self) {
        self.close_focused = true;
    }

    fn set_page_scroll_locked(&mut self, locked: bool) {
        self.page_scroll_locked = locked;
    }

    fn overlay_metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn set_scroll_hint_visible(&mut self, visible: bool) {
        self.scroll_hint_visible = visible;
    }

    fn scroll_overlay_by(&mut self, dy: f64) {
        self.scroll_to(self.metrics.scroll_top + dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_replace_item_text() {
        let mut page = MemoryPage::new().with_list(["  Jaro  "]);
        let id = page.replace_with_link(&(0, 0), "Jaro", "#poem/jaro");
        assert_eq!(page.lists[0][0].link, Some(id));
        assert_eq!(page.lists[0][0].text, "Jaro");
        assert_eq!(page.link(id).map(|l| l.href.as_str()), Some("#poem/jaro"));
    }

    #[test]
    fn overlay_is_built_once() {
        let mut page = MemoryPage::new();
        assert_eq!(page.ensure_overlay().ok(), Some(OverlayOrigin::Created));
        assert_eq!(page.ensure_overlay().ok(), Some(OverlayOrigin::Reused));
        assert_eq!(page.overlay_builds, 1);
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut page = MemoryPage::new().with_overlay_size(1000.0, 400.0);
        page.scroll_overlay_by(250.0);
        assert_eq!(page.metrics.scroll_top, 250.0);
        page.scroll_overlay_by(1000.0);
        assert_eq!(page.metrics.scroll_top, 600.0);
        page.scroll_to(-5.0);
        assert_eq!(page.metrics.scroll_top, 0.0);
    }
}
