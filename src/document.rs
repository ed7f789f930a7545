//! The host page the lightbox lives in.
//!
//! A [`Document`] models just the three pieces of page state the lightbox
//! touches: the overlay slot at the end of `<body>`, the body scroll lock
//! (`overflow: hidden`), and the global [`KeyboardStream`]. Everything else on
//! the page is somebody else's concern.

use crate::keyboard::KeyboardStream;

#[derive(Debug, Default)]
pub struct Document {
    overlay: Option<String>,
    scroll_locked: bool,
    keyboard: KeyboardStream,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `html` in the overlay slot, replacing whatever was there.
    pub fn mount_overlay(&mut self, html: String) {
        self.overlay = Some(html);
    }

    /// Remove the overlay. Returns `false` if none was mounted.
    pub fn unmount_overlay(&mut self) -> bool {
        self.overlay.take().is_some()
    }

    /// Markup currently in the overlay slot.
    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    pub fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn keyboard(&self) -> &KeyboardStream {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardStream {
        &mut self.keyboard
    }
}
