#![forbid(unsafe_code)]

//! The poem reader state machine.
//!
//! [`PoemReader`] owns the discovered entries, the embedded poem texts and the
//! only mutable view state: the selected entry and whether the overlay is
//! open. It is host-driven: the embedding environment forwards
//! [`ReaderEvent`]s and the reader answers by calling back into its [`Page`].

use tracing::{debug, trace};

use crate::config::ReaderConfig;
use crate::content::{EmbeddedContent, PoemBody, SlugAliasTable};
use crate::entry::{EntryCollection, discover};
use crate::error::Result;
use crate::fragment::{is_poem_fragment, parse_poem_fragment, poem_fragment};
use crate::input::{NavKey, ReaderEvent};
use crate::page::{OverlayOrigin, Page};
use crate::scroll_hint::ScrollHintConfig;

/// Overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Open,
}

impl OverlayState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

pub struct PoemReader<P: Page> {
    page: P,
    entries: EntryCollection<P::Link>,
    content: EmbeddedContent,
    aliases: SlugAliasTable,
    placeholder: String,
    scroll_hint: ScrollHintConfig,
    /// Last successfully shown entry. Kept across close.
    current: Option<usize>,
    overlay: OverlayState,
}

impl<P: Page> PoemReader<P> {
    /// Discover entries, build or adopt the overlay, and load embedded texts.
    ///
    /// Returns `Ok(None)` when the page has no poem lists; the page is left
    /// untouched in that case. The fragment is not consulted here so the host
    /// can bind its listeners first and then call
    /// [`restore_from_fragment`](Self::restore_from_fragment).
    pub fn mount(mut page: P, config: &ReaderConfig) -> Result<Option<Self>> {
        let Some(entries) = discover(&mut page) else {
            debug!("no poem lists on page; reader stays inert");
            return Ok(None);
        };
        let origin = page.ensure_overlay()?;
        let content = EmbeddedContent::from_embedded(page.embedded_content().as_deref());
        debug!(
            entries = entries.len(),
            poems = content.len(),
            overlay_reused = origin == OverlayOrigin::Reused,
            "poem reader mounted"
        );

        Ok(Some(Self {
            page,
            entries,
            content,
            aliases: SlugAliasTable::builtin(),
            placeholder: config.labels.placeholder.clone(),
            scroll_hint: config.scroll_hint,
            current: None,
            overlay: OverlayState::Closed,
        }))
    }

    #[must_use]
    pub const fn entries(&self) -> &EntryCollection<P::Link> {
        &self.entries
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub const fn overlay_state(&self) -> OverlayState {
        self.overlay
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Display entry `index` in the overlay, opening it if needed.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn show(&mut self, index: usize) -> bool {
        let count = self.entries.len();
        let Some(entry) = self.entries.get(index) else {
            debug!(index, count, "ignoring out-of-range show");
            return false;
        };
        trace!(index, slug = entry.slug(), "show poem");

        self.current = Some(index);
        let body =
            PoemBody::resolve(&self.content, &self.aliases, entry.slug()).to_html(&self.placeholder);
        self.page.set_title(entry.title());
        self.page.set_body_html(&body);

        self.overlay = OverlayState::Open;
        self.page.set_overlay_open(true);
        self.page.reset_overlay_scroll();
        self.page.focus_close();
        self.page.set_page_scroll_locked(true);
        let metrics = self.page.overlay_metrics();
        self.page
            .set_scroll_hint_visible(self.scroll_hint.is_visible(metrics, true));

        self.page.set_nav_disabled(index == 0, index + 1 == count);
        for (i, other) in self.entries.iter().enumerate() {
            self.page.set_link_active(other.link(), i == index);
        }
        self.page.set_position(&format!("{} / {}", index + 1, count));

        let fragment = poem_fragment(entry.slug());
        if self.page.fragment() != fragment {
            self.page.replace_fragment(&fragment);
        }
        true
    }

    /// Close the overlay. Only a poem fragment is cleared from the URL.
    pub fn close(&mut self) {
        trace!("close overlay");
        self.overlay = OverlayState::Closed;
        self.page.set_overlay_open(false);
        if is_poem_fragment(&self.page.fragment()) {
            self.page.clear_fragment();
        }
        self.page.set_page_scroll_locked(false);
        self.page.set_scroll_hint_visible(false);
    }

    /// Show the entry before the current one, if there is one.
    pub fn previous(&mut self) -> bool {
        match self.current {
            Some(index) if index > 0 => self.show(index - 1),
            _ => false,
        }
    }

    /// Show the entry after the current one; with no selection yet, the first.
    pub fn next(&mut self) -> bool {
        let target = self.current.map_or(0, |index| index + 1);
        if target < self.entries.len() {
            self.show(target)
        } else {
            false
        }
    }

    /// Show the entry named by the current `#poem/<slug>` fragment.
    ///
    /// Returns `false` (and changes nothing) when the fragment is not a poem
    /// selection or names no entry.
    pub fn restore_from_fragment(&mut self) -> bool {
        let fragment = self.page.fragment();
        let Some(slug) = parse_poem_fragment(&fragment) else {
            return false;
        };
        match self.entries.position_of_slug(slug) {
            Some(index) => self.show(index),
            None => {
                debug!(slug, "fragment names no known poem");
                false
            }
        }
    }

    /// Recompute scroll-hint visibility from the overlay's scroll position.
    pub fn update_scroll_hint(&mut self) {
        let metrics = self.page.overlay_metrics();
        let visible = self.scroll_hint.is_visible(metrics, self.overlay.is_open());
        self.page.set_scroll_hint_visible(visible);
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: ReaderEvent) {
        match event {
            ReaderEvent::LinkClicked(index) => {
                self.show(index);
            }
            ReaderEvent::PreviousClicked => {
                self.previous();
            }
            ReaderEvent::NextClicked => {
                self.next();
            }
            ReaderEvent::CloseClicked | ReaderEvent::BackdropClicked => self.close(),
            ReaderEvent::KeyDown(key) => self.handle_key(key),
            ReaderEvent::FragmentChanged => {
                self.restore_from_fragment();
            }
            ReaderEvent::OverlayScrolled => self.update_scroll_hint(),
            ReaderEvent::ScrollHintClicked => {
                let step = self.scroll_hint.step(self.page.overlay_metrics());
                self.page.scroll_overlay_by(step);
            }
        }
    }

    fn handle_key(&mut self, key: NavKey) {
        if !self.overlay.is_open() {
            return;
        }
        match key {
            NavKey::Previous => {
                self.previous();
            }
            NavKey::Next => {
                self.next();
            }
            NavKey::Close => self.close(),
            NavKey::Other => {}
        }
    }
}

impl<P> std::fmt::Debug for PoemReader<P>
where
    P: Page + std::fmt::Debug,
    P::Link: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoemReader")
            .field("entries", &self.entries)
            .field("poems", &self.content.len())
            .field("current", &self.current)
            .field("overlay", &self.overlay)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
