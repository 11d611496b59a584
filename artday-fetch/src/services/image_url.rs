//! IIIF image URL composition
//!
//! AIC recommends requesting images 843px wide. Asking for that width on a
//! smaller source upscales it, so narrower images are requested at full size.

pub use artday_common::config::DEFAULT_TARGET_WIDTH;

/// Build `{base}{path}/full/{size}0/default.jpg`
///
/// `size` is `"{target_width},/"` when `width >= target_width`, otherwise
/// `"pct:100/"`.
pub fn compose_image_url(base_url: &str, path: &str, width: u32, target_width: u32) -> String {
    let size = if width < target_width {
        "pct:100/".to_string()
    } else {
        format!("{},/", target_width)
    };

    format!("{}{}/full/{}0/default.jpg", base_url, path, size)
}
