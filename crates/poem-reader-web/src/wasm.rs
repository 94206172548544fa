#![forbid(unsafe_code)]

//! `wasm-bindgen` exports: mounting, event wiring and the JS handle.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use poem_reader_core::{NavKey, PoemReader, ReaderConfig, ReaderError, ReaderEvent, Result};
use tracing::{debug, error, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent};

use crate::console::{init_logging, install_panic_hook};
use crate::dom::DomPage;
use crate::listeners::ListenerSet;

type SharedReader = Rc<RefCell<PoemReader<DomPage>>>;

fn dispatch(reader: &SharedReader, event: ReaderEvent) {
    match reader.try_borrow_mut() {
        Ok(mut reader) => reader.handle(event),
        Err(_) => trace!(?event, "reader busy; event dropped"),
    }
}

/// Wire every reader input to its DOM source.
fn bind(reader: &SharedReader) -> Result<ListenerSet> {
    let (parts, links, window) = {
        let reader = reader.borrow();
        let page = reader.page();
        let parts = page
            .parts()
            .cloned()
            .ok_or_else(|| ReaderError::missing_element("overlay"))?;
        let links: Vec<_> = reader.entries().iter().map(|e| e.link().clone()).collect();
        (parts, links, page.window().clone())
    };

    let mut listeners = ListenerSet::new();

    for (index, link) in links.iter().enumerate() {
        let r = Rc::clone(reader);
        listeners.listen(link.as_ref(), "click", move |event: Event| {
            event.prevent_default();
            dispatch(&r, ReaderEvent::LinkClicked(index));
        })?;
    }

    let buttons: [(&EventTarget, ReaderEvent); 4] = [
        (parts.prev.as_ref(), ReaderEvent::PreviousClicked),
        (parts.next.as_ref(), ReaderEvent::NextClicked),
        (parts.close.as_ref(), ReaderEvent::CloseClicked),
        (parts.scroll_hint.as_ref(), ReaderEvent::ScrollHintClicked),
    ];
    for (target, event) in buttons {
        let r = Rc::clone(reader);
        listeners.listen(target, "click", move |_| dispatch(&r, event))?;
    }

    let overlay_value: JsValue = parts.overlay.clone().into();
    let r = Rc::clone(reader);
    listeners.listen(parts.overlay.as_ref(), "click", move |event: Event| {
        if event.target().map(JsValue::from).as_ref() == Some(&overlay_value) {
            dispatch(&r, ReaderEvent::BackdropClicked);
        }
    })?;

    listeners.listen(parts.modal.as_ref(), "click", |event: Event| {
        event.stop_propagation();
    })?;

    let r = Rc::clone(reader);
    listeners.listen(window.as_ref(), "keydown", move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        match NavKey::from_dom_key(&key) {
            NavKey::Other => {}
            nav => dispatch(&r, ReaderEvent::KeyDown(nav)),
        }
    })?;

    let r = Rc::clone(reader);
    listeners.listen(window.as_ref(), "hashchange", move |_| {
        dispatch(&r, ReaderEvent::FragmentChanged);
    })?;

    let r = Rc::clone(reader);
    listeners.listen_passive(parts.overlay.as_ref(), "scroll", move |_| {
        dispatch(&r, ReaderEvent::OverlayScrolled);
    })?;

    debug!(listeners = listeners.len(), "reader events bound");
    Ok(listeners)
}

struct Mounted {
    reader: SharedReader,
    listeners: RefCell<ListenerSet>,
}

thread_local! {
    static MOUNTED: RefCell<Option<Rc<Mounted>>> = const { RefCell::new(None) };
}

fn mount(config: &ReaderConfig) -> Result<Option<Rc<Mounted>>> {
    let page = DomPage::new(config.clone())?;
    let Some(reader) = PoemReader::mount(page, config)? else {
        return Ok(None);
    };
    let reader = Rc::new(RefCell::new(reader));
    let listeners = bind(&reader)?;
    reader.borrow_mut().restore_from_fragment();
    Ok(Some(Rc::new(Mounted {
        reader,
        listeners: RefCell::new(listeners),
    })))
}

/// Enhance the current page. Returns `undefined` when there is nothing to do.
///
/// `config_json` is an optional JSON object overriding parts of the default
/// configuration; an invalid one throws. Mounting twice returns a handle to
/// the already mounted reader, which keeps its original configuration; a
/// config passed to the second call is validated and then ignored. Call
/// `destroy()` first to remount with a different one.
#[wasm_bindgen(js_name = mountPoemReader)]
pub fn mount_poem_reader(
    config_json: Option<String>,
) -> std::result::Result<Option<PoemReaderHandle>, JsValue> {
    install_panic_hook();
    let config = match config_json.as_deref() {
        Some(json) => ReaderConfig::from_json(json)
            .map_err(|err| JsValue::from_str(&err.to_string()))?,
        None => ReaderConfig::default(),
    };
    init_logging(config.log_level.as_tracing());

    if let Some(existing) = MOUNTED.with(|slot| slot.borrow().clone()) {
        debug!(
            config_ignored = config_json.is_some(),
            "poem reader already mounted; reusing it"
        );
        return Ok(Some(PoemReaderHandle { mounted: existing }));
    }

    match mount(&config) {
        Ok(Some(mounted)) => {
            MOUNTED.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&mounted)));
            Ok(Some(PoemReaderHandle { mounted }))
        }
        Ok(None) => Ok(None),
        Err(err) => {
            error!(error = %err, "poem reader could not mount");
            Ok(None)
        }
    }
}

/// Slug used in `#poem/<slug>` fragments for `title`.
#[wasm_bindgen(js_name = slugify)]
pub fn slugify_title(title: &str) -> String {
    poem_reader_core::slugify(title)
}

/// JS handle to the mounted reader.
#[wasm_bindgen]
pub struct PoemReaderHandle {
    mounted: Rc<Mounted>,
}

impl PoemReaderHandle {
    fn with_reader<T>(&self, fallback: T, f: impl FnOnce(&mut PoemReader<DomPage>) -> T) -> T {
        match self.mounted.reader.try_borrow_mut() {
            Ok(mut reader) => f(&mut reader),
            Err(_) => fallback,
        }
    }
}

#[wasm_bindgen]
impl PoemReaderHandle {
    /// Show entry `index`. Returns `false` when out of range.
    pub fn show(&self, index: u32) -> bool {
        let index = index as usize;
        self.with_reader(false, |reader| reader.show(index))
    }

    pub fn close(&self) {
        self.with_reader((), PoemReader::close);
    }

    pub fn next(&self) -> bool {
        self.with_reader(false, PoemReader::next)
    }

    pub fn previous(&self) -> bool {
        self.with_reader(false, PoemReader::previous)
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<u32> {
        self.with_reader(None, |reader| {
            reader.current_index().and_then(|i| u32::try_from(i).ok())
        })
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.with_reader(false, |reader| reader.is_open())
    }

    #[wasm_bindgen(js_name = entryCount)]
    pub fn entry_count(&self) -> u32 {
        self.with_reader(0, |reader| {
            u32::try_from(reader.entries().len()).unwrap_or(u32::MAX)
        })
    }

    #[wasm_bindgen(js_name = slugAt)]
    pub fn slug_at(&self, index: u32) -> Option<String> {
        self.with_reader(None, |reader| {
            reader
                .entries()
                .get(index as usize)
                .map(|entry| entry.slug().to_owned())
        })
    }

    /// Detach all listeners. The page keeps its links and overlay; a later
    /// `mountPoemReader` call mounts afresh.
    pub fn destroy(&self) {
        self.mounted.listeners.borrow_mut().clear();
        MOUNTED.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot
                .as_ref()
                .is_some_and(|current| Rc::ptr_eq(current, &self.mounted))
            {
                *slot = None;
            }
        });
    }
}
