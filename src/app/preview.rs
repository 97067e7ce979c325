//! Decoded preview of the current winner's first image.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Longest edge kept after downscaling; plenty for a terminal panel.
const PREVIEW_MAX_PX: u32 = 256;

#[derive(Debug, Clone)]
pub struct Preview {
    pub path: PathBuf,
    /// Content-sniffed MIME type, e.g. `image/jpeg`.
    pub mime: Option<String>,
    /// Downscaled pixels, or why decoding failed.  The image match is a loose
    /// name check, so a "photo.jpegraphy" that is not an image ends up here.
    pub pixels: Result<Arc<image::RgbaImage>, String>,
}

impl Preview {
    pub fn load(path: &Path) -> Self {
        let mime = tree_magic_mini::from_filepath(path).map(str::to_string);
        let pixels = image::open(path)
            .map(|img| Arc::new(img.thumbnail(PREVIEW_MAX_PX, PREVIEW_MAX_PX).to_rgba8()))
            .map_err(|e| {
                tracing::debug!("preview decode failed for {}: {e}", path.display());
                e.to_string()
            });
        Self {
            path: path.to_path_buf(),
            mime,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_downscales_png() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cover.png");
        image::RgbaImage::from_pixel(600, 300, image::Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();

        let preview = Preview::load(&path);
        let pixels = preview.pixels.unwrap();
        assert!(pixels.width() <= PREVIEW_MAX_PX && pixels.height() <= PREVIEW_MAX_PX);
        assert_eq!(pixels.get_pixel(0, 0), &image::Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn non_image_reports_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("photo.jpegraphy");
        std::fs::write(&path, b"definitely not pixels").unwrap();

        let preview = Preview::load(&path);
        assert!(preview.pixels.is_err());
        assert_eq!(preview.path, path);
    }
}
