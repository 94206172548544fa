#![forbid(unsafe_code)]

//! `poem-reader-core` turns the poem title lists of a static poetry site into
//! a navigable reading overlay.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment forwards events and the
//!   reader calls back through the [`Page`] trait. No JS types live here.
//! - **Fail-open**: missing poem data, unknown fragments and out-of-range
//!   navigation degrade to a placeholder or a no-op, never an error.
//! - **Deterministic**: [`memory::MemoryPage`] records every page effect, so
//!   the whole state machine is testable natively.
//!
//! The `poem-reader-web` crate binds this to the browser DOM.

pub mod config;
pub mod content;
pub mod entry;
pub mod error;
pub mod fragment;
pub mod input;
pub mod memory;
pub mod page;
pub mod reader;
pub mod scroll_hint;
pub mod slug;

pub use config::ReaderConfig;
pub use content::{EmbeddedContent, PoemBody, SlugAliasTable};
pub use entry::{Entry, EntryCollection};
pub use error::{ReaderError, Result};
pub use input::{NavKey, ReaderEvent};
pub use page::{OverlayOrigin, Page};
pub use reader::{OverlayState, PoemReader};
pub use scroll_hint::{ScrollHintConfig, ScrollMetrics};
pub use slug::slugify;
