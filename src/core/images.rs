//! Picking the preview image out of a drawn directory.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use super::listing::DirLister;

/// Substrings that mark a file name as an image.
///
/// Matching is a case-sensitive `contains`, not an extension check: a name
/// like `photo.jpegraphy` counts, `PHOTO.JPG` does not.
pub const IMAGE_MARKERS: &[&str] = &[".png", ".jpg", ".jpeg"];

pub fn is_image(name: impl AsRef<OsStr>) -> bool {
    // Markers are ASCII, so a lossy view cannot invent or hide a match.
    let name = name.as_ref().to_string_lossy();
    IMAGE_MARKERS.iter().any(|marker| name.contains(marker))
}

/// First non-directory entry of `dir` that looks like an image, in listing
/// order.  An unreadable directory simply has no image.
pub fn first_image(lister: &dyn DirLister, dir: &Path) -> Option<OsString> {
    let entries = match lister.list(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::debug!("image scan skipped: {} ({e})", dir.display());
            return None;
        }
    };

    entries
        .into_iter()
        .find(|e| !e.is_dir && is_image(&e.name))
        .map(|e| e.name)
}
