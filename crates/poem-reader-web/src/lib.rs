#![forbid(unsafe_code)]

//! Browser frontend for the poem reader.
//!
//! This crate hosts [`poem_reader_core::PoemReader`] on the live document:
//! a `web-sys` [`Page`](poem_reader_core::Page) implementation, DOM event
//! wiring and `tracing` output routed to the browser console. JavaScript
//! calls `mountPoemReader()` once the document has loaded.

pub mod markup;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomPage, OverlayParts};
#[cfg(target_arch = "wasm32")]
pub use wasm::{PoemReaderHandle, mount_poem_reader, slugify_title};
