//! Image URL helpers.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_EXTENSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(jpg|jpeg|png|webp|avif|gif|svg)$").expect("valid image extension regex")
});

pub const PLACEHOLDER_SIZE: u32 = 300;

/// Placeholder image URL for records without an image.
pub fn placeholder_image_url(width: u32, height: u32) -> String {
    format!("https://via.placeholder.com/{width}x{height}")
}

/// Whether `url` ends in a known image extension.
///
/// Matching is case-sensitive; `photo.PNG` is rejected.
pub fn is_valid_image_url(url: &str) -> bool {
    IMAGE_EXTENSION_RE.is_match(url)
}
