//! "Open with the default application" boundary.

use std::io;
use std::path::Path;

pub trait Opener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Delegates to the platform handler (`xdg-open`, `open`, `explorer`...)
/// through the `open` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        tracing::debug!("opening {}", path.display());
        open::that(path)
    }
}
