//! HTML rendering for the gallery page and the lightbox overlay.
//!
//! Uses [maud](https://maud.lambda.xyz/) so every interpolated title,
//! description, and image reference is escaped at compile-time-checked
//! boundaries. Captions come from filenames and sidecar files, so they are
//! treated as untrusted text.
//!
//! ## Output files
//!
//! ```text
//! dist/
//! ├── index.html      # Gallery grid; item N links to N.html
//! ├── 1.html          # Overlay page for the first image
//! ├── 2.html
//! └── ...
//! ```
//!
//! Each overlay page is the gallery's lightbox without script: close and the
//! backdrop link back to `index.html`, prev/next link to the neighbouring
//! pages and wrap around at either end.
//!
//! ## Overlay structure
//!
//! ```text
//! div.lightbox[data-index]            ← backdrop root (click target "backdrop")
//! ├── a.lightbox-backdrop             ← covers the backdrop, links to index.html
//! └── div.lightbox-content            ← panel (click target "panel")
//!     ├── a.lightbox-close            ← index.html
//!     ├── a.lightbox-prev             ← previous page, wrapping
//!     ├── a.lightbox-next             ← next page, wrapping
//!     ├── div.lightbox-image          ← background-image: url(<image ref>)
//!     └── div.lightbox-caption
//!         ├── h3                      ← title
//!         └── div.lightbox-description
//! ```
//!
//! Styling lives in `static/lightbox.css`, driven by the CSS custom
//! properties from [`config::generate_overlay_css`].

use crate::config::{self, LightboxConfig};
use crate::lightbox::{next_index, previous_index};
use crate::types::{GalleryItem, Manifest};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/lightbox.css");

/// The gallery grid page.
pub const INDEX_PAGE: &str = "index.html";

/// File name of the overlay page for the image at `index` (1-based on disk).
pub fn image_page_name(index: usize) -> String {
    format!("{}.html", index + 1)
}

/// Overlay markup for the item at `index` of a `total`-item collection.
pub fn overlay(item: &GalleryItem, index: usize, total: usize) -> Markup {
    let counter = format!("{} / {}", index + 1, total);
    let prev_url = image_page_name(previous_index(index, total));
    let next_url = image_page_name(next_index(index, total));
    html! {
        div.lightbox role="dialog" aria-modal="true" aria-label=(item.title()) data-index=(index) {
            a.lightbox-backdrop href=(INDEX_PAGE) tabindex="-1" aria-hidden="true" {}
            div.lightbox-content {
                a.lightbox-close href=(INDEX_PAGE) aria-label="Close" { "×" }
                a.lightbox-prev href=(prev_url) aria-label="Previous" { "❮" }
                a.lightbox-next href=(next_url) aria-label="Next" { "❯" }
                div.lightbox-image style=(background_image(item.image_ref())) {}
                div.lightbox-caption {
                    h3 { (item.title()) }
                    div.lightbox-description { (item.description()) }
                    span.lightbox-counter { (counter) }
                }
            }
        }
    }
}

/// Full stylesheet: config-driven custom properties followed by the static rules.
pub fn stylesheet(config: &LightboxConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_overlay_css(&config.overlay),
        CSS_STATIC
    )
}

fn base_document(
    title: &str,
    config: &LightboxConfig,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    let css = stylesheet(config);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// The gallery page: one `.gallery-item` per image, in collection order.
///
/// Each item carries `data-index`, which is the index a click on it activates,
/// and links to that image's overlay page.
pub fn gallery_page(manifest: &Manifest) -> Markup {
    let content = html! {
        main.gallery {
            h2.gallery-title { (manifest.title) }
            div.gallery-grid {
                @for (index, item) in manifest.items.iter().enumerate() {
                    (gallery_item(item, index))
                }
            }
        }
    };
    base_document(&manifest.title, &manifest.config, None, content)
}

/// Standalone page showing the overlay for the image at `index`.
///
/// Returns `None` when `index` is out of range.
pub fn image_page(manifest: &Manifest, index: usize) -> Option<Markup> {
    let item = manifest.items.get(index)?;
    let title = format!("{} - {}", manifest.title, item.title());
    let content = overlay(item, index, manifest.items.len());
    Some(base_document(
        &title,
        &manifest.config,
        Some("lightbox-open"),
        content,
    ))
}

fn gallery_item(item: &GalleryItem, index: usize) -> Markup {
    html! {
        a.gallery-item href=(image_page_name(index)) data-index=(index) {
            div.gallery-image style=(background_image(item.image_ref())) {}
            div.gallery-overlay {
                h4 { (item.title()) }
                @if !item.description().is_empty() {
                    p { (item.description()) }
                }
            }
        }
    }
}

fn background_image(image_ref: &str) -> String {
    format!("background-image: url(\"{}\");", escape_css_string(image_ref))
}

/// Escape a value for a double-quoted CSS string.
fn escape_css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\a "),
            '\r' | '\u{c}' => {}
            c => out.push(c),
        }
    }
    out
}
