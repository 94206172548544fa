#![forbid(unsafe_code)]

//! Owned DOM event listeners with explicit teardown.

use poem_reader_core::{ReaderError, Result};
use tracing::trace;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Listeners registered by the reader. Removed by [`ListenerSet::clear`].
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn listen<F>(&mut self, target: &EventTarget, kind: &'static str, handler: F) -> Result<()>
    where
        F: FnMut(Event) + 'static,
    {
        self.register(target, kind, handler, false)
    }

    /// Like [`listen`](Self::listen) but marked passive, for scroll handlers.
    pub fn listen_passive<F>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(Event) + 'static,
    {
        self.register(target, kind, handler, true)
    }

    fn register<F>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: F,
        passive: bool,
    ) -> Result<()>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        let added = if passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind, function, &options,
            )
        } else {
            target.add_event_listener_with_callback(kind, function)
        };
        added.map_err(|err| {
            ReaderError::dom(
                "add event listener",
                err.as_string().unwrap_or_else(|| kind.to_owned()),
            )
        })?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }

    /// Detach every listener and drop its closure.
    pub fn clear(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        trace!("event listeners removed");
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
