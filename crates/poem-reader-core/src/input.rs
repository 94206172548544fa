#![forbid(unsafe_code)]

//! Host input delivered to [`crate::reader::PoemReader::handle`].

/// Keys the reader reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Previous,
    Next,
    Close,
    Other,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::Previous,
            "ArrowRight" | "Right" => Self::Next,
            "Escape" | "Esc" => Self::Close,
            _ => Self::Other,
        }
    }
}

/// One host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderEvent {
    /// A discovered poem link was activated.
    LinkClicked(usize),
    PreviousClicked,
    NextClicked,
    CloseClicked,
    /// A click landed on the overlay background, outside the dialog panel.
    BackdropClicked,
    KeyDown(NavKey),
    /// The location fragment changed (`hashchange`).
    FragmentChanged,
    OverlayScrolled,
    ScrollHintClicked,
}
