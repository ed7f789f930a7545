//! Shared test utilities.
//!
//! Collection builders, input-event shorthands, and assertions on the state a
//! closed or open lightbox must leave the document in.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut lightbox = Lightbox::new(collection_of(5));
//! let mut doc = Document::new();
//! lightbox.dispatch(&mut doc, activate(3));
//! lightbox.dispatch(&mut doc, key(Key::Escape));
//! assert_idle(&lightbox, &doc);
//! ```

use std::path::Path;

use crate::document::Document;
use crate::keyboard::Key;
use crate::lightbox::{ClickTarget, InputEvent, Lightbox};
use crate::types::{GalleryCollection, GalleryItem};

// =========================================================================
// Collections
// =========================================================================

/// `len` items named `img/0.jpg`, `img/1.jpg`, … titled `Photo 0`, `Photo 1`, …
pub fn collection_of(len: usize) -> GalleryCollection {
    (0..len)
        .map(|i| {
            let title = format!("Photo {i}");
            GalleryItem::new(format!("img/{i}.jpg"), Some(title.as_str()), None)
        })
        .collect()
}

/// One item per title, in order.
pub fn titled_collection(titles: &[&str]) -> GalleryCollection {
    titles
        .iter()
        .enumerate()
        .map(|(i, t)| GalleryItem::new(format!("img/{i}.jpg"), Some(*t), None))
        .collect()
}

/// Create empty files (image stand-ins and sidecars) under `dir`.
pub fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"").unwrap();
    }
}

// =========================================================================
// Input shorthands
// =========================================================================

pub fn activate(index: usize) -> InputEvent {
    InputEvent::Activate { index }
}

pub fn click(target: ClickTarget) -> InputEvent {
    InputEvent::Click { target }
}

pub fn key(key: Key) -> InputEvent {
    InputEvent::KeyDown { key }
}

// =========================================================================
// Assertions
// =========================================================================

/// No session, no overlay, no scroll lock, no keyboard listener.
pub fn assert_idle(lightbox: &Lightbox, doc: &Document) {
    assert!(!lightbox.is_open(), "session still open");
    assert_eq!(lightbox.current_index(), None);
    assert!(doc.overlay().is_none(), "overlay still mounted");
    assert!(!doc.is_scroll_locked(), "scroll still locked");
    assert_eq!(
        doc.keyboard().listener_count(),
        0,
        "keyboard listener leaked"
    );
}

/// The mounted overlay shows the item at `index`.
pub fn assert_overlay_index(doc: &Document, index: usize) {
    let html = doc.overlay().expect("no overlay mounted");
    let marker = format!(r#"data-index="{index}""#);
    assert!(html.contains(&marker), "overlay does not show index {index}: {html}");
}
