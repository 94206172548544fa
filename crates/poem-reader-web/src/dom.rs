#![forbid(unsafe_code)]

//! `web-sys` implementation of [`Page`].
//!
//! Only compiled on `wasm32` targets.

use poem_reader_core::{OverlayOrigin, Page, ReaderConfig, ReaderError, Result, ScrollMetrics};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions,
    Window,
};

use crate::markup::{CLOSE_CLASS, MODAL_CLASS, class_selector, overlay_inner_html};

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Log a failed DOM call that the reader can carry on without.
fn soft<T>(context: &'static str, result: std::result::Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            let err = ReaderError::dom(context, js_message(&err));
            debug!(error = %err, "ignoring DOM failure");
            None
        }
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Handles to the overlay elements the reader writes to.
#[derive(Debug, Clone)]
pub struct OverlayParts {
    pub overlay: HtmlElement,
    /// The dialog panel; clicks inside it never reach the backdrop.
    pub modal: Element,
    pub close: HtmlElement,
    pub title: Element,
    pub body: Element,
    pub prev: HtmlButtonElement,
    pub next: HtmlButtonElement,
    pub count: Option<Element>,
    pub scroll_hint: HtmlElement,
}

/// The live document as seen by the reader.
#[derive(Debug)]
pub struct DomPage {
    window: Window,
    document: Document,
    config: ReaderConfig,
    parts: Option<OverlayParts>,
}

impl DomPage {
    pub fn new(config: ReaderConfig) -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| ReaderError::dom("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| ReaderError::dom("document", "window has no document"))?;
        Ok(Self {
            window,
            document,
            config,
            parts: None,
        })
    }

    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// Overlay handles, available once [`Page::ensure_overlay`] succeeded.
    #[must_use]
    pub const fn parts(&self) -> Option<&OverlayParts> {
        self.parts.as_ref()
    }

    fn body(&self) -> Result<HtmlElement> {
        self.document
            .body()
            .ok_or_else(|| ReaderError::missing_element("body"))
    }

    fn find_or_create_overlay(&self) -> Result<(HtmlElement, OverlayOrigin)> {
        let ids = &self.config.ids;
        if let Some(existing) = self.document.get_element_by_id(&ids.overlay) {
            let overlay = existing
                .dyn_into::<HtmlElement>()
                .map_err(|_| ReaderError::missing_element(format!("#{}", ids.overlay)))?;
            return Ok((overlay, OverlayOrigin::Reused));
        }

        let overlay = self
            .document
            .create_element("div")
            .map_err(|err| ReaderError::dom("create overlay", js_message(&err)))?;
        overlay.set_class_name(&self.config.classes.overlay);
        overlay.set_id(&ids.overlay);
        overlay.set_inner_html(&overlay_inner_html(&self.config));
        self.body()?
            .append_child(&overlay)
            .map_err(|err| ReaderError::dom("append overlay", js_message(&err)))?;
        let overlay = overlay
            .dyn_into::<HtmlElement>()
            .map_err(|_| ReaderError::dom("create overlay", "not an HTMLElement"))?;
        Ok((overlay, OverlayOrigin::Created))
    }

    fn find_or_create_scroll_hint(&self) -> Result<HtmlElement> {
        let id = &self.config.ids.scroll_hint;
        let hint = match self.document.get_element_by_id(id) {
            Some(existing) => existing,
            None => {
                let classes = &self.config.classes;
                let labels = &self.config.labels;
                let hint = self
                    .document
                    .create_element("button")
                    .map_err(|err| ReaderError::dom("create scroll hint", js_message(&err)))?;
                hint.set_id(id);
                hint.set_class_name(&format!("overlay-scroll-tip {}", classes.hidden));
                soft("scroll hint type", hint.set_attribute("type", "button"));
                soft(
                    "scroll hint label",
                    hint.set_attribute("aria-label", &labels.scroll_hint_aria),
                );
                hint.set_text_content(Some(&labels.scroll_hint));
                self.body()?
                    .append_child(&hint)
                    .map_err(|err| ReaderError::dom("append scroll hint", js_message(&err)))?;
                hint
            }
        };
        hint.dyn_into::<HtmlElement>()
            .map_err(|_| ReaderError::missing_element(format!("#{id}")))
    }

    fn toggle_class(element: &Element, class: &str, on: bool) {
        soft("toggle class", element.class_list().toggle_with_force(class, on));
    }
}

/// Required descendant of `root` matching `selector`.
fn require(root: &Element, selector: &str) -> Result<Element> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| ReaderError::missing_element(selector))
}

fn require_as<T: JsCast>(root: &Element, selector: &str) -> Result<T> {
    require(root, selector)?
        .dyn_into::<T>()
        .map_err(|_| ReaderError::missing_element(selector))
}

impl Page for DomPage {
    type List = Element;
    type Item = Element;
    type Link = Element;

    fn poem_lists(&self) -> Vec<Element> {
        soft(
            "query poem lists",
            self.document
                .query_selector_all(&self.config.selectors.poem_list),
        )
        .map(elements)
        .unwrap_or_default()
    }

    fn list_items(&self, list: &Element) -> Vec<Element> {
        soft(
            "query list items",
            list.query_selector_all(&self.config.selectors.item),
        )
        .map(elements)
        .unwrap_or_default()
    }

    fn item_text(&self, item: &Element) -> String {
        item.text_content().unwrap_or_default()
    }

    fn replace_with_link(&mut self, item: &Element, title: &str, href: &str) -> Element {
        let Some(link) = soft("create link", self.document.create_element("a")) else {
            warn!(title, "could not create poem link; item left as is");
            return item.clone();
        };
        link.set_text_content(Some(title));
        soft("link href", link.set_attribute("href", href));
        link.set_class_name(&self.config.classes.link);
        soft("link data-title", link.set_attribute("data-title", title));
        item.set_text_content(Some(""));
        soft("append link", item.append_child(&link));
        link
    }

    fn ensure_overlay(&mut self) -> Result<OverlayOrigin> {
        let (overlay, origin) = self.find_or_create_overlay()?;
        let ids = &self.config.ids;
        let root: &Element = overlay.as_ref();
        let parts = OverlayParts {
            modal: require(root, &class_selector(MODAL_CLASS))?,
            close: require_as(root, &class_selector(CLOSE_CLASS))?,
            title: require(root, &format!("#{}", ids.title))?,
            body: require(root, &format!("#{}", ids.body))?,
            prev: require_as(root, &format!("#{}", ids.prev))?,
            next: require_as(root, &format!("#{}", ids.next))?,
            count: root.query_selector(&format!("#{}", ids.count)).ok().flatten(),
            scroll_hint: self.find_or_create_scroll_hint()?,
            overlay,
        };
        self.parts = Some(parts);
        Ok(origin)
    }

    fn embedded_content(&self) -> Option<String> {
        self.document
            .get_element_by_id(&self.config.ids.embedded_content)
            .map(|element| element.text_content().unwrap_or_default())
    }

    fn fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        if let Some(history) = soft("history", self.window.history()) {
            soft(
                "replace fragment",
                history.replace_state_with_url(&JsValue::NULL, "", Some(fragment)),
            );
        }
    }

    fn clear_fragment(&mut self) {
        let location = self.window.location();
        let url = format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        );
        if let Some(history) = soft("history", self.window.history()) {
            soft(
                "clear fragment",
                history.replace_state_with_url(&JsValue::NULL, "", Some(&url)),
            );
        }
    }

    fn set_overlay_open(&mut self, open: bool) {
        if let Some(parts) = &self.parts {
            Self::toggle_class(&parts.overlay, &self.config.classes.open, open);
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Some(parts) = &self.parts {
            parts.title.set_text_content(Some(title));
        }
    }

    fn set_body_html(&mut self, html: &str) {
        if let Some(parts) = &self.parts {
            parts.body.set_inner_html(html);
        }
    }

    fn set_position(&mut self, text: &str) {
        if let Some(count) = self.parts.as_ref().and_then(|parts| parts.count.as_ref()) {
            count.set_text_content(Some(text));
        }
    }

    fn set_nav_disabled(&mut self, previous: bool, next: bool) {
        if let Some(parts) = &self.parts {
            parts.prev.set_disabled(previous);
            parts.next.set_disabled(next);
        }
    }

    fn set_link_active(&mut self, link: &Element, active: bool) {
        Self::toggle_class(link, &self.config.classes.active, active);
    }

    fn reset_overlay_scroll(&mut self) {
        if let Some(parts) = &self.parts {
            parts.overlay.set_scroll_top(0);
        }
    }

    fn focus_close(&mut self) {
        if let Some(parts) = &self.parts {
            soft("focus close", parts.close.focus());
        }
    }

    fn set_page_scroll_locked(&mut self, locked: bool) {
        if let Some(root) = self.document.document_element() {
            Self::toggle_class(&root, &self.config.classes.no_scroll, locked);
        }
    }

    fn overlay_metrics(&self) -> ScrollMetrics {
        self.parts.as_ref().map_or_else(ScrollMetrics::default, |parts| {
            ScrollMetrics::new(
                f64::from(parts.overlay.scroll_top()),
                f64::from(parts.overlay.scroll_height()),
                f64::from(parts.overlay.client_height()),
            )
        })
    }

    fn set_scroll_hint_visible(&mut self, visible: bool) {
        if let Some(parts) = &self.parts {
            Self::toggle_class(&parts.scroll_hint, &self.config.classes.hidden, !visible);
        }
    }

    fn scroll_overlay_by(&mut self, dy: f64) {
        if let Some(parts) = &self.parts {
            let options = ScrollToOptions::new();
            options.set_top(dy);
            options.set_behavior(ScrollBehavior::Smooth);
            parts.overlay.scroll_by_with_scroll_to_options(&options);
        }
    }
}
