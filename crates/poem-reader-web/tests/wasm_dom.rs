#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use poem_reader_web::{PoemReaderHandle, mount_poem_reader, slugify_title};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const EMBEDDED: &str = r#"<script type="application/json" id="poems-json">{"jaro": "a < b\ndruhy", "chladnymi-jak-kus-ledu-rety": "z aliasu"}</script>"#;

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
}

fn set_hash(fragment: &str) {
    let window = web_sys::window().expect("window");
    let location = window.location();
    let url = if fragment.is_empty() {
        format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        )
    } else {
        fragment.to_owned()
    };
    window
        .history()
        .expect("history")
        .replace_state_with_url(&JsValue::NULL, "", Some(&url))
        .expect("replaceState");
}

fn hash() -> String {
    web_sys::window()
        .expect("window")
        .location()
        .hash()
        .unwrap_or_default()
}

/// Detach a reader an earlier test left mounted.
///
/// Runs against an empty body, so it never mounts a new reader. A failed
/// assertion aborts the wasm instance without unwinding, so teardown cannot
/// rely on `Drop`.
fn unmount_leftover() {
    document().body().expect("body").set_inner_html("");
    if let Some(stale) = mount_poem_reader(None).expect("default config is valid") {
        stale.close();
        stale.destroy();
    }
    if let Some(root) = document().document_element() {
        let _ = root.class_list().remove_1("no-scroll");
    }
}

/// Fresh body with `html`, no fragment and no mounted reader.
fn page(html: &str) {
    unmount_leftover();
    set_hash("");
    document().body().expect("body").set_inner_html(html);
}

fn mount() -> PoemReaderHandle {
    mount_poem_reader(None)
        .expect("default config is valid")
        .expect("page has poem lists")
}

fn by_id(id: &str) -> Element {
    document().get_element_by_id(id).expect(id)
}

fn click(element: &Element) {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

// =============================================================================
// Mounting
// =============================================================================

#[wasm_bindgen_test]
fn page_without_lists_stays_untouched() {
    page("<p>nic</p>");
    let handle = mount_poem_reader(None).expect("valid config");
    assert!(handle.is_none());
    assert!(document().get_element_by_id("poem-overlay").is_none());
}

#[wasm_bindgen_test]
fn invalid_config_throws() {
    page("<ul class=\"poem-list\"><li>Jaro</li></ul>");
    assert!(mount_poem_reader(Some("{\"scroll_hint\": 3}".to_owned())).is_err());
}

#[wasm_bindgen_test]
fn items_become_links_and_overlay_is_built() {
    page("<ul class=\"poem-list\"><li> Jaro </li><li>Zimní noc</li></ul>");
    let handle = mount();
    assert_eq!(handle.entry_count(), 2);
    assert_eq!(handle.slug_at(1).as_deref(), Some("zimni-noc"));

    let links = document()
        .query_selector_all(".poem-list li a.poem-link")
        .expect("query");
    assert_eq!(links.length(), 2);
    let first = links.get(0).and_then(|n| n.dyn_into::<Element>().ok()).expect("link");
    assert_eq!(first.get_attribute("href").as_deref(), Some("#poem/jaro"));
    assert_eq!(first.get_attribute("data-title").as_deref(), Some("Jaro"));
    assert!(document().get_element_by_id("poem-overlay").is_some());
    assert!(document().get_element_by_id("overlay-scroll-tip").is_some());

    handle.destroy();
}

#[wasm_bindgen_test]
fn prerendered_overlay_is_reused() {
    page(concat!(
        "<ul class=\"poem-list\"><li>Jaro</li></ul>",
        "<div class=\"modal-overlay\" id=\"poem-overlay\"><div class=\"modal\">",
        "<button class=\"modal-close\">x</button><h2 id=\"poem-title\"></h2>",
        "<div id=\"poem-body\"></div>",
        "<button id=\"modal-prev\">p</button><button id=\"modal-next\">n</button>",
        "</div></div>",
    ));
    let handle = mount();
    let overlays = document().query_selector_all("#poem-overlay").expect("query");
    assert_eq!(overlays.length(), 1);

    assert!(handle.show(0));
    assert_eq!(by_id("poem-title").text_content().as_deref(), Some("Jaro"));
    handle.destroy();
}

#[wasm_bindgen_test]
fn second_mount_returns_the_same_reader() {
    page("<ul class=\"poem-list\"><li>Jaro</li></ul>");
    let first = mount();
    assert!(first.show(0));
    let second = mount();
    assert_eq!(second.current_index(), Some(0));
    assert_eq!(document().query_selector_all("a.poem-link").expect("query").length(), 1);
    first.destroy();
}

#[wasm_bindgen_test]
fn config_passed_to_a_second_mount_is_ignored() {
    page("<ul class=\"poem-list\"><li>Jaro</li></ul>");
    let first = mount();
    let second = mount_poem_reader(Some(r#"{"selectors": {"item": "p"}}"#.to_owned()))
        .expect("valid config")
        .expect("reader already mounted");
    assert_eq!(second.entry_count(), 1);
    assert!(second.show(0));
    assert_eq!(first.current_index(), Some(0));
    first.close();
    first.destroy();
}

#[wasm_bindgen_test]
fn leftover_reader_is_unmounted_by_the_next_page() {
    page("<ul class=\"poem-list\"><li>Jaro</li></ul>");
    let leftover = mount();
    assert!(leftover.show(0));

    page("<p>nic</p>");
    assert!(!leftover.is_open());
    assert!(mount_poem_reader(None).expect("valid config").is_none());
    let root = document().document_element().expect("root");
    assert!(!has_class(&root, "no-scroll"));
}

// =============================================================================
// Reading
// =============================================================================

#[wasm_bindgen_test]
fn clicking_a_link_opens_the_poem() {
    page(&format!(
        "<ul class=\"poem-list\"><li>Jaro</li><li>Léto</li></ul>{EMBEDDED}"
    ));
    let handle = mount();
    let link = document().query_selector("a.poem-link").ok().flatten().expect("link");
    click(&link);

    assert!(handle.is_open());
    assert_eq!(handle.current_index(), Some(0));
    assert!(has_class(&by_id("poem-overlay"), "open"));
    assert!(has_class(&link, "active"));
    assert_eq!(by_id("poem-body").inner_html(), "<p>a &lt; b<br>druhy</p>");
    assert_eq!(by_id("page-count").text_content().as_deref(), Some("1 / 2"));
    assert_eq!(hash(), "#poem/jaro");
    let root = document().document_element().expect("root");
    assert!(has_class(&root, "no-scroll"));

    click(&by_id("modal-next"));
    assert_eq!(handle.current_index(), Some(1));
    assert_eq!(hash(), "#poem/leto");
    assert!(!has_class(&link, "active"));

    handle.close();
    assert!(!has_class(&root, "no-scroll"));
    assert_eq!(hash(), "");
    handle.destroy();
}

#[wasm_bindgen_test]
fn alias_and_placeholder() {
    page(&format!(
        "<ul class=\"poem-list\"><li>Chladnými jak kus ledu rty</li><li>Podzim</li></ul>{EMBEDDED}"
    ));
    let handle = mount();
    assert!(handle.show(0));
    assert_eq!(by_id("poem-body").inner_html(), "<p>z aliasu</p>");
    assert!(handle.show(1));
    let body = by_id("poem-body").inner_html();
    assert!(body.contains("zatím není k dispozici"), "{body}");
    handle.destroy();
}

#[wasm_bindgen_test]
fn backdrop_click_closes_but_panel_click_does_not() {
    page("<ul class=\"poem-list\"><li>Jaro</li></ul>");
    let handle = mount();
    assert!(handle.show(0));

    click(&by_id("poem-title"));
    assert!(handle.is_open());

    click(&by_id("poem-overlay"));
    assert!(!handle.is_open());
    handle.destroy();
}

#[wasm_bindgen_test]
fn fragment_present_at_mount_opens_the_poem() {
    page("<ul class=\"poem-list\"><li>Jaro</li><li>Léto</li></ul>");
    set_hash("#poem/leto");
    let handle = mount();
    assert!(handle.is_open());
    assert_eq!(handle.current_index(), Some(1));
    assert_eq!(by_id("poem-title").text_content().as_deref(), Some("Léto"));
    handle.close();
    handle.destroy();
}

#[wasm_bindgen_test]
fn destroy_detaches_listeners() {
    page("<ul class=\"poem-list\"><li>Jaro</li></ul>");
    let handle = mount();
    handle.destroy();
    let link = document().query_selector("a.poem-link").ok().flatten().expect("link");
    click(&link);
    assert!(!handle.is_open());
    set_hash("");
}

#[wasm_bindgen_test]
fn slugify_is_exported() {
    assert_eq!(slugify_title("Zimní noc!"), "zimni-noc");
    assert_eq!(slugify_title("  "), "");
}
