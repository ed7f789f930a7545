//! # Gallery Lightbox
//!
//! The photo gallery of a small restaurant site: a grid of dishes and rooms,
//! and a lightbox that shows one picture at a time in a modal overlay.
//!
//! The lightbox is modelled headlessly. A [`document::Document`] stands in for
//! the page (overlay slot, body scroll lock, global keyboard stream) and a
//! [`lightbox::Lightbox`] drives it, so every interaction contract is testable
//! without a browser.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      gallery/  →  manifest.json   (images + sidecars + config.toml)
//! 2. Page      manifest  →  dist/index.html + dist/N.html (grid, one overlay page per image)
//! 3. Replay    manifest  +  script          (headless walk through the lightbox)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `GalleryItem`, `GalleryCollection`, `Manifest` |
//! | [`metadata`] | Titles from filenames, descriptions from sidecar files |
//! | [`scan`] | Builds the manifest from a gallery directory |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`keyboard`] | Key names, bindings, the keyboard stream and its subscriptions |
//! | [`document`] | The host page state the lightbox touches |
//! | [`lightbox`] | The controller: open, next, previous, close, input dispatch |
//! | [`render`] | Overlay and gallery page HTML via Maud |
//! | [`replay`] | Scripted input sequences run headlessly |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Image references live in the data
//!
//! Each [`types::GalleryItem`] carries its image reference from the moment it
//! is built. The overlay never reads an image back from rendered markup, so
//! render order cannot change what the lightbox shows.
//!
//! ## Keyboard listening is a held resource
//!
//! Opening the lightbox subscribes to the keyboard stream and stores the
//! [`keyboard::Subscription`] in the session. Closing hands it back. There is
//! no ambient listener and nothing watching the page for the overlay to
//! disappear; after close, key presses reach nothing.
//!
//! ## Backdrop means the backdrop
//!
//! Only a click whose target is exactly the backdrop root dismisses the
//! overlay. Clicks inside the content panel never do, regardless of where the
//! panel's painted edges are.

pub mod config;
pub mod document;
pub mod keyboard;
pub mod lightbox;
pub mod metadata;
pub mod output;
pub mod render;
pub mod replay;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
