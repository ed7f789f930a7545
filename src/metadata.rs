//! Caption resolution for scanned images.
//!
//! Each field is resolved independently, first non-empty source wins:
//!
//! - **Title**: filename (`010-Wood-Fired-Oven.jpg` → "Wood Fired Oven") →
//!   configured placeholder
//! - **Description**: sidecar `.txt` with the same stem → empty
//!
//! The placeholder is applied when the [`GalleryItem`](crate::types::GalleryItem)
//! is built, so a missing title is never an error.

use std::path::Path;

/// First non-blank value among `sources`, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// Contents of the `.txt` sidecar next to `image_path`, if present and non-blank.
pub fn read_sidecar(image_path: &Path) -> Option<String> {
    let text = std::fs::read_to_string(image_path.with_extension("txt")).ok()?;
    resolve(&[Some(text.as_str())])
}

/// Numeric ordering prefix of a filename (`010-terrace.jpg` → 10).
///
/// The digits must be followed by `-`, `.`, or the end of the name, so
/// `2nd-floor.jpg` is unnumbered.
pub fn number_prefix(name: &str) -> Option<u32> {
    let end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    match name[end..].chars().next() {
        None | Some('-') | Some('.') => name[..end].parse().ok(),
        Some(_) => None,
    }
}

/// Display title carried by a filename stem, if any.
///
/// - `010-Wood-Fired-Oven` → "Wood Fired Oven"
/// - `terrace_at_dusk` → "terrace at dusk"
/// - `010` / `010-` → `None`
pub fn title_from_stem(stem: &str) -> Option<String> {
    let rest = match stem.split_once('-') {
        Some((prefix, rest)) if is_all_digits(prefix) => rest,
        _ if is_all_digits(stem) => "",
        _ => stem,
    };
    let title = rest.replace(['-', '_'], " ");
    resolve(&[Some(title.as_str())])
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
