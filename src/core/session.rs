//! The draw session: a root folder, the pool of subdirectories not yet drawn
//! from it, and the most recent winner.
//!
//! All collaborators are passed in per call, so a [`Session`] is plain data
//! owned by whoever drives it (the TUI state, or the print-mode loop).

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rand::{CryptoRng, RngCore};

use super::error::SessionError;
use super::images;
use super::listing::DirLister;
use super::random;
use crate::host::opener::Opener;

/// Oldest records are dropped past this many draws.
pub const HISTORY_LIMIT: usize = 500;

/// One successful draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// Absolute path: the root joined with the drawn name.
    pub path: PathBuf,
    /// First image found directly inside `path`, as the raw file name.
    pub image: Option<OsString>,
    pub drawn_at: DateTime<Local>,
}

impl DrawRecord {
    /// Drawn directory name (last component of `path`), lossy for display.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Full path of the preview image, if there is one.
    pub fn image_path(&self) -> Option<PathBuf> {
        self.image.as_ref().map(|img| self.path.join(img))
    }
}

#[derive(Debug, Default)]
pub struct Session {
    root: Option<PathBuf>,
    /// Names still in the pool, in listing order minus drawn ones.
    remaining: Vec<OsString>,
    last_winner: Option<PathBuf>,
    /// Draws since the root was selected, oldest first, at most
    /// [`HISTORY_LIMIT`] long.
    history: Vec<DrawRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn remaining(&self) -> &[OsString] {
        &self.remaining
    }

    pub fn last_winner(&self) -> Option<&Path> {
        self.last_winner.as_deref()
    }

    pub fn history(&self) -> &[DrawRecord] {
        &self.history
    }

    /// Newest draw record.
    pub fn current(&self) -> Option<&DrawRecord> {
        self.history.last()
    }

    /// Make `path` the root folder.  Everything drawn from the previous root
    /// is discarded.
    pub fn select_root(&mut self, path: &Path) -> Result<(), SessionError> {
        if path.as_os_str().is_empty() || !path.is_absolute() {
            return Err(SessionError::InvalidPath);
        }

        tracing::info!("root folder: {}", path.display());
        self.root = Some(path.to_path_buf());
        self.remaining.clear();
        self.last_winner = None;
        self.history.clear();
        Ok(())
    }

    /// Refill the pool with every immediate subdirectory of the root.
    ///
    /// Only a root with no entries at all is `EmptyFolder`; a root holding
    /// nothing but files populates an empty pool.
    pub fn populate(&mut self, lister: &dyn DirLister) -> Result<usize, SessionError> {
        let root = self.root.as_deref().ok_or(SessionError::NoRootFolder)?;
        let entries = lister.list(root).map_err(SessionError::ListingError)?;
        if entries.is_empty() {
            return Err(SessionError::EmptyFolder);
        }

        self.remaining = entries
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| e.name)
            .collect();
        tracing::debug!("populated {} subdirs from {}", self.remaining.len(), root.display());
        Ok(self.remaining.len())
    }

    /// Draw one name out of the pool, refilling it first when it is empty.
    pub fn draw<R>(
        &mut self,
        lister: &dyn DirLister,
        rng: &mut R,
    ) -> Result<DrawRecord, SessionError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if self.root.is_none() {
            return Err(SessionError::NoRootFolder);
        }

        if self.remaining.is_empty() {
            if let Err(e) = self.populate(lister) {
                tracing::warn!("populate failed: {e}");
                return Err(SessionError::NoSubdirectoriesFound);
            }
            if self.remaining.is_empty() {
                return Err(SessionError::NoSubdirectoriesFound);
            }
        }

        let idx = random::uniform_index(rng, self.remaining.len()).map_err(|e| {
            tracing::warn!("random source failed: {e}");
            SessionError::RandomSourceError
        })?;
        let name = self.remaining.remove(idx);

        let root = self.root.as_deref().ok_or(SessionError::NoRootFolder)?;
        let path = root.join(&name);
        let image = images::first_image(lister, &path);

        let record = DrawRecord {
            path: path.clone(),
            image,
            drawn_at: Local::now(),
        };
        tracing::info!(
            "drew {} ({} left, image: {})",
            path.display(),
            self.remaining.len(),
            record.image.as_deref().map_or("-".into(), OsStr::to_string_lossy),
        );

        self.last_winner = Some(path);
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(record.clone());
        Ok(record)
    }

    /// Go back to the winner before the current one.  The abandoned name
    /// stays out of the pool.
    pub fn step_back(&mut self) -> Result<&DrawRecord, SessionError> {
        if self.history.len() < 2 {
            return Err(SessionError::NoWinner);
        }
        self.history.pop();
        let previous = self.history.last().ok_or(SessionError::NoWinner)?;
        self.last_winner = Some(previous.path.clone());
        Ok(previous)
    }

    /// Hand the last winner to the OS.
    pub fn open_winner(&self, opener: &dyn Opener) -> Result<(), SessionError> {
        let winner = self
            .last_winner
            .as_deref()
            .filter(|p| p.is_absolute())
            .ok_or(SessionError::NoWinner)?;
        opener.open(winner).map_err(|e| {
            tracing::warn!("open failed for {}: {e}", winner.display());
            SessionError::OpenFailed(e)
        })
    }

    /// Hand the current winner's preview image to the OS.
    pub fn open_image(&self, opener: &dyn Opener) -> Result<(), SessionError> {
        let image = self
            .current()
            .and_then(DrawRecord::image_path)
            .ok_or(SessionError::NoWinner)?;
        opener.open(&image).map_err(|e| {
            tracing::warn!("open failed for {}: {e}", image.display());
            SessionError::OpenFailed(e)
        })
    }

    pub fn reset(&mut self) {
        tracing::info!("session reset");
        self.root = None;
        self.remaining = Vec::new();
        self.last_winner = None;
        self.history.clear();
    }
}
