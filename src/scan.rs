//! Gallery directory scanning.
//!
//! Turns a directory of images into a [`Manifest`]. The layout is flat:
//!
//! ```text
//! gallery/                       # Source directory (title = directory name)
//! ├── config.toml                # Lightbox config (optional)
//! ├── 010-Wood-Fired-Oven.jpg    # Numbered = ordered by number
//! ├── 010-Wood-Fired-Oven.txt    # Sidecar description (optional)
//! ├── 020-Terrace.webp
//! ├── 030.jpg                    # No title in the name = placeholder title
//! └── chef_at_work.png           # Unnumbered = after numbered, by filename
//! ```
//!
//! ## Validation
//!
//! - Two images with the same number are an error.
//! - Subdirectories and non-image files are skipped.
//!
//! An empty gallery is a valid scan result; the `check` command reports it.

use crate::config::{self, ConfigError};
use crate::metadata;
use crate::types::{GalleryCollection, GalleryItem, Manifest};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Duplicate image number {number}: {} and {}", .first.display(), .second.display())]
    DuplicateNumber {
        number: u32,
        first: PathBuf,
        second: PathBuf,
    },
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif", "gif"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let images = ordered_images(root)?;

    let items: GalleryCollection = images
        .iter()
        .map(|path| build_item(root, path, &config.placeholder_title))
        .collect();

    Ok(Manifest {
        title: gallery_title(root),
        items,
        config,
    })
}

/// Image files in display order: numbered by number, then unnumbered by name.
fn ordered_images(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut numbered: BTreeMap<u32, PathBuf> = BTreeMap::new();
    let mut unnumbered = Vec::new();

    for path in collect_entries(root)? {
        let name = file_name(&path);
        match metadata::number_prefix(&name) {
            Some(number) => {
                if let Some(first) = numbered.get(&number) {
                    return Err(ScanError::DuplicateNumber {
                        number,
                        first: first.clone(),
                        second: path,
                    });
                }
                numbered.insert(number, path);
            }
            None => unnumbered.push(path),
        }
    }

    // collect_entries sorts, so unnumbered files are already in filename order
    Ok(numbered.into_values().chain(unnumbered).collect())
}

fn collect_entries(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !file_name(p).starts_with('.') && is_image(p))
        .collect();
    entries.sort();
    Ok(entries)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn build_item(root: &Path, path: &Path, placeholder: &str) -> GalleryItem {
    let image_ref = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = metadata::title_from_stem(&stem);
    let description = metadata::read_sidecar(path);
    GalleryItem::with_placeholder(image_ref, title.as_deref(), description.as_deref(), placeholder)
}

fn gallery_title(root: &Path) -> String {
    let name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_default();
    metadata::title_from_stem(&name).unwrap_or_else(|| "Gallery".to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
