#![forbid(unsafe_code)]

//! Markup for the overlay shell.
//!
//! Kept free of JS types so the generated structure is testable natively.

use poem_reader_core::ReaderConfig;

/// Escape text for use inside a double-quoted attribute or element content.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Inner HTML of a freshly built overlay container.
///
/// The dialog panel is `.modal`; the close control is `.modal-close`. Both
/// are looked up by class, everything else by the configured ids.
#[must_use]
pub fn overlay_inner_html(config: &ReaderConfig) -> String {
    let ids = &config.ids;
    let labels = &config.labels;
    let title_id = escape_attr(&ids.title);
    format!(
        r#"
      <div class="{MODAL_CLASS}" role="dialog" aria-modal="true" aria-labelledby="{title_id}">
        <div class="modal-header">
          <span></span>
          <button class="{CLOSE_CLASS}" aria-label="{close}">×</button>
        </div>
        <h2 class="poem-title" id="{title_id}"></h2>
        <div class="poem-body" id="{body}">
          <p></p>
        </div>
        <div class="modal-nav">
          <button class="btn" id="{prev}">{previous}</button>
          <button class="btn" id="{next_id}">{next}</button>
        </div>
        <div class="page-meta"><span id="{count}"></span></div>
      </div>"#,
        close = escape_attr(&labels.close),
        body = escape_attr(&ids.body),
        prev = escape_attr(&ids.prev),
        previous = escape_attr(&labels.previous),
        next_id = escape_attr(&ids.next),
        next = escape_attr(&labels.next),
        count = escape_attr(&ids.count),
    )
}

/// Class of the dialog panel inside the overlay.
pub const MODAL_CLASS: &str = "modal";
/// Class of the close control inside the overlay.
pub const CLOSE_CLASS: &str = "modal-close";

/// CSS selector for an element with `class`.
#[must_use]
pub fn class_selector(class: &str) -> String {
    format!(".{class}")
}
