//! Favourite winners, persisted one absolute path per line at
//! `$XDG_CONFIG_HOME/dir-draw/favourites`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::config_dir;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Favourites {
    paths: BTreeSet<PathBuf>,
    file: PathBuf,
}

impl Favourites {
    pub fn load() -> Self {
        Self::load_from(config_dir().join("favourites"))
    }

    /// A missing or unreadable file is an empty set.
    pub fn load_from(file: PathBuf) -> Self {
        let paths = match std::fs::read_to_string(&file) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(PathBuf::from)
                .collect(),
            Err(e) => {
                tracing::debug!("no favourites at {} ({e})", file.display());
                BTreeSet::new()
            }
        };
        Self { paths, file }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Add or remove `path`, then persist.  Returns whether it is now a
    /// favourite.
    pub fn toggle(&mut self, path: &Path) -> anyhow::Result<bool> {
        let now_favourite = if self.paths.remove(path) {
            false
        } else {
            self.paths.insert(path.to_path_buf());
            true
        };
        self.save()?;
        Ok(now_favourite)
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body: Vec<String> = self.paths.iter().map(|p| p.display().to_string()).collect();
        std::fs::write(&self.file, body.join("\n"))?;
        Ok(())
    }
}
