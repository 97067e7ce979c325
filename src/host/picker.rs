//! Directory-choice boundary: the native folder dialog, or a path that was
//! already given on the command line.

use std::panic::AssertUnwindSafe;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickError {
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dialog unavailable: {0}")]
    Unavailable(String),
}

/// Options handed to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOptions {
    pub title: String,
    pub can_create_directories: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            title: "Choose a directory containing sub-dirs".to_string(),
            can_create_directories: true,
        }
    }
}

pub trait DirectoryPicker {
    /// `Ok(None)` means the user cancelled.
    fn pick(&mut self, options: &PickOptions) -> Result<Option<PathBuf>, PickError>;
}

/// Modal native folder dialog (`rfd`).
#[derive(Debug, Default)]
pub struct DialogPicker;

impl DirectoryPicker for DialogPicker {
    fn pick(&mut self, options: &PickOptions) -> Result<Option<PathBuf>, PickError> {
        // A backend with no display to talk to can panic instead of
        // returning `None`; surface that as a dialog failure.
        let picked = std::panic::catch_unwind(AssertUnwindSafe(|| {
            rfd::FileDialog::new()
                .set_title(options.title.as_str())
                .set_can_create_directories(options.can_create_directories)
                .pick_folder()
        }))
        .map_err(|_| PickError::Unavailable("folder dialog backend failed".to_string()))?;
        match &picked {
            Some(path) => tracing::debug!("dialog picked {}", path.display()),
            None => tracing::debug!("dialog cancelled"),
        }
        Ok(picked)
    }
}

/// Hands out a command-line path once, canonicalised, then falls back to
/// another picker for every later pick.
pub struct ArgPicker {
    pending: Option<PathBuf>,
    fallback: Box<dyn DirectoryPicker>,
}

impl ArgPicker {
    pub fn new(path: PathBuf, fallback: Box<dyn DirectoryPicker>) -> Self {
        Self {
            pending: Some(path),
            fallback,
        }
    }
}

impl DirectoryPicker for ArgPicker {
    fn pick(&mut self, options: &PickOptions) -> Result<Option<PathBuf>, PickError> {
        match self.pending.take() {
            Some(path) => path
                .canonicalize()
                .map(Some)
                .map_err(|source| PickError::Resolve { path, source }),
            None => self.fallback.pick(options),
        }
    }
}
