#![forbid(unsafe_code)]

//! The host surface the reader drives.
//!
//! Implementations own every platform detail (element lookup, class names,
//! history API). The reader only speaks in terms of poem lists, links, the
//! overlay and the location fragment, which keeps its state machine testable
//! without a browser.

use crate::error::Result;
use crate::scroll_hint::ScrollMetrics;

/// Whether the overlay shell was built or found already in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOrigin {
    Created,
    Reused,
}

/// Page operations needed by [`crate::reader::PoemReader`].
pub trait Page {
    /// A poem-list container.
    type List;
    /// A list item inside a container.
    type Item;
    /// A link rendered in place of an item's text.
    type Link;

    /// Poem-list containers in document order.
    fn poem_lists(&self) -> Vec<Self::List>;

    /// Items of `list` in document order.
    fn list_items(&self, list: &Self::List) -> Vec<Self::Item>;

    /// Text content of `item`, untrimmed.
    fn item_text(&self, item: &Self::Item) -> String;

    /// Replace the content of `item` with a link showing `title` and pointing
    /// at `href`.
    fn replace_with_link(&mut self, item: &Self::Item, title: &str, href: &str) -> Self::Link;

    /// Build the overlay and scroll hint, or adopt ones already present.
    fn ensure_overlay(&mut self) -> Result<OverlayOrigin>;

    /// Raw text of the embedded poem data element, if the page has one.
    fn embedded_content(&self) -> Option<String>;

    /// Current location fragment including the leading `#`, or empty.
    fn fragment(&self) -> String;

    /// Replace the current history entry's fragment without scrolling.
    fn replace_fragment(&mut self, fragment: &str);

    /// Drop the fragment from the current history entry without scrolling.
    fn clear_fragment(&mut self);

    fn set_overlay_open(&mut self, open: bool);
    fn set_title(&mut self, title: &str);
    fn set_body_html(&mut self, html: &str);

    /// Position indicator text (`"2 / 7"`). Hosts without an indicator ignore it.
    fn set_position(&mut self, text: &str);

    fn set_nav_disabled(&mut self, previous: bool, next: bool);
    fn set_link_active(&mut self, link: &Self::Link, active: bool);
    fn reset_overlay_scroll(&mut self);
    fn focus_close(&mut self);

    /// Suppress or restore scrolling of the page behind the overlay.
    fn set_page_scroll_locked(&mut self, locked: bool);

    fn overlay_metrics(&self) -> ScrollMetrics;
    fn set_scroll_hint_visible(&mut self, visible: bool);

    /// Smoothly scroll the overlay down by `dy` pixels.
    fn scroll_overlay_by(&mut self, dy: f64);
}
