//! Product URLs and responsive image sources.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ids::ImageId;

static REPEATED_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("slash regex should compile"));

/// Any character but a line terminator, then `jpg`, repeated.
static JPG_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([^\n\r\x{2028}\x{2029}]jpg)+").expect("jpg regex should compile")
});

/// Image renditions offered to the browser, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    XLarge,
    Full,
}

impl ImageSize {
    /// All sizes in ascending width.
    pub const ALL: [ImageSize; 5] = [
        ImageSize::Small,
        ImageSize::Medium,
        ImageSize::Large,
        ImageSize::XLarge,
        ImageSize::Full,
    ];

    /// Rendition width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            ImageSize::Small => 360,
            ImageSize::Medium => 720,
            ImageSize::Large => 1080,
            ImageSize::XLarge => 1440,
            ImageSize::Full => 2048,
        }
    }

    /// Size token the image CDN expects before the file extension.
    pub fn suffix(&self) -> String {
        format!("{}x", self.width())
    }
}

/// Storefront path of a product.
///
/// ```
/// use wdlk_commerce::catalog::product_slug;
/// assert_eq!(product_slug("/oak-board"), "/products/oak-board");
/// ```
pub fn product_slug(handle: &str) -> String {
    let raw = format!("/products/{}", handle);
    REPEATED_SLASHES.replace_all(&raw, "/").into_owned()
}

/// One source URL per [`ImageSize`], derived from the original upload.
///
/// Every `.jpg` extension (any character other than a line terminator
/// followed by `jpg`, case-insensitive, repeated runs collapsed) becomes
/// `_{size}.jpg`.
pub fn image_src_set(original_src: &str) -> Vec<String> {
    ImageSize::ALL
        .iter()
        .map(|size| replace_jpg(original_src, &format!("_{}.jpg", size.suffix())))
        .collect()
}

fn replace_jpg(src: &str, replacement: &str) -> String {
    JPG_EXTENSION
        .replace_all(src, regex::NoExpand(replacement))
        .into_owned()
}

/// Build an HTML `srcset` value, pairing each source with the size ladder
/// in order. Sources beyond the ladder are dropped.
pub fn srcset_attribute(src_set: &[String]) -> String {
    src_set
        .iter()
        .zip(ImageSize::ALL.iter())
        .map(|(src, size)| format!("{} {}w,", src, size.width()))
        .collect()
}

/// A product image with its responsive renditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: ImageId,
    pub alt_text: Option<String>,
    pub original_src: String,
    pub src_set: Vec<String>,
}

impl ProductImage {
    /// Create an image and derive its renditions from `original_src`.
    pub fn new(id: impl Into<ImageId>, original_src: impl Into<String>) -> Self {
        let original_src = original_src.into();
        Self {
            id: id.into(),
            alt_text: None,
            src_set: image_src_set(&original_src),
            original_src,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    /// The `srcset` attribute for this image.
    pub fn srcset(&self) -> String {
        srcset_attribute(&self.src_set)
    }
}
