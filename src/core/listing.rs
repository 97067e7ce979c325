//! Immediate-children listing behind a small trait.
//!
//! The session only ever needs one level of a directory, tagged file or
//! directory.  [`WalkLister`] answers that with `walkdir` capped at depth 1;
//! tests swap in an in-memory lister.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// One immediate child of a listed directory.
///
/// `name` is the raw OS name; it is only made lossy for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: OsString,
    pub is_dir: bool,
}

#[cfg(test)]
impl ListedEntry {
    pub fn dir(name: impl Into<OsString>) -> Self {
        Self { name: name.into(), is_dir: true }
    }

    pub fn file(name: impl Into<OsString>) -> Self {
        Self { name: name.into(), is_dir: false }
    }
}

/// Enumerates the immediate children of a directory.
pub trait DirLister {
    /// Entries in the order the underlying source yields them.  No sorting
    /// is promised.
    fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>>;
}

/// Real filesystem lister.
///
/// Symlinks are not followed, so a link pointing at a directory is reported
/// as a file.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkLister;

impl DirLister for WalkLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1) // only immediate children
            .follow_links(false);

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            entries.push(ListedEntry {
                name: entry.file_name().to_os_string(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walk_lister_tags_dirs_and_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        fs::create_dir(tmp.path().join("beta")).unwrap();
        fs::write(tmp.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(tmp.path().join("alpha").join("nested")).unwrap();

        let mut entries = WalkLister.list(tmp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![
                ListedEntry::dir("alpha"),
                ListedEntry::dir("beta"),
                ListedEntry::file("notes.txt"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn walk_lister_keeps_non_utf8_names_intact() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"caf\xe9");
        fs::create_dir(tmp.path().join(raw)).unwrap();

        let entries = WalkLister.list(tmp.path()).unwrap();
        assert_eq!(entries, vec![ListedEntry::dir(raw)]);
        assert!(tmp.path().join(&entries[0].name).is_dir());
    }

    #[test]
    fn walk_lister_empty_dir_lists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(WalkLister.list(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn walk_lister_missing_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(WalkLister.list(&tmp.path().join("gone")).is_err());
    }
}
