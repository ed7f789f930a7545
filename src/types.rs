//! Gallery data shared by every stage.
//!
//! A [`GalleryCollection`] is built once (by [`crate::scan`] or by loading a
//! manifest) and is read-only afterwards. The lightbox only ever reads from it.

use crate::config::LightboxConfig;
use serde::{Deserialize, Serialize};

/// Title shown when an item carries none of its own.
pub const DEFAULT_TITLE: &str = "Gallery Image";

/// One displayable image with its caption.
///
/// The image reference is carried explicitly. Nothing downstream ever reads
/// it back from rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawItem")]
pub struct GalleryItem {
    image: String,
    title: String,
    description: String,
}

/// Serialized shape of an item, where title and description may be absent.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawItem {
    image: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<RawItem> for GalleryItem {
    fn from(raw: RawItem) -> Self {
        GalleryItem::new(raw.image, raw.title.as_deref(), raw.description.as_deref())
    }
}

impl GalleryItem {
    /// Build an item, substituting [`DEFAULT_TITLE`] for a missing or blank title.
    pub fn new(image: impl Into<String>, title: Option<&str>, description: Option<&str>) -> Self {
        Self::with_placeholder(image, title, description, DEFAULT_TITLE)
    }

    /// Like [`GalleryItem::new`] with a caller-chosen placeholder title.
    pub fn with_placeholder(
        image: impl Into<String>,
        title: Option<&str>,
        description: Option<&str>,
        placeholder: &str,
    ) -> Self {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(placeholder);
        Self {
            image: image.into(),
            title: title.to_string(),
            description: description.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    pub fn image_ref(&self) -> &str {
        &self.image
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Empty when the item has no description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Ordered, fixed list of items for one gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryCollection {
    items: Vec<GalleryItem>,
}

impl GalleryCollection {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GalleryItem> {
        self.items.iter()
    }
}

impl FromIterator<GalleryItem> for GalleryCollection {
    fn from_iter<I: IntoIterator<Item = GalleryItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a GalleryCollection {
    type Item = &'a GalleryItem;
    type IntoIter = std::slice::Iter<'a, GalleryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Manifest written by `scan` and consumed by `page`, `overlay` and `replay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Gallery heading, taken from the source directory name.
    pub title: String,
    pub items: GalleryCollection,
    #[serde(default)]
    pub config: LightboxConfig,
}
