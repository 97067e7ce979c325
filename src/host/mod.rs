//! Host boundary — the operations a UI calls, wired to real collaborators.
//!
//! [`Host`] owns the [`Session`] plus the picker, lister, opener and random
//! source.  Typed methods return `Result<_, SessionError>` for the TUI; the
//! envelope methods wrap the same calls for callers that want
//! `{succeed, data, reason}` JSON.

pub mod envelope;
pub mod opener;
pub mod picker;

use std::path::PathBuf;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::core::error::SessionError;
use crate::core::listing::{DirLister, WalkLister};
use crate::core::session::{DrawRecord, Session};

use self::envelope::Envelope;
use self::opener::{Opener, SystemOpener};
use self::picker::{DirectoryPicker, PickOptions};

pub struct Host<R = OsRng> {
    session: Session,
    picker: Box<dyn DirectoryPicker>,
    lister: Box<dyn DirLister>,
    opener: Box<dyn Opener>,
    rng: R,
    pub pick_options: PickOptions,
}

impl Host<OsRng> {
    /// Real filesystem, OS opener and OS entropy.
    pub fn system(picker: Box<dyn DirectoryPicker>, pick_options: PickOptions) -> Self {
        Self::new(
            picker,
            Box::new(WalkLister),
            Box::new(SystemOpener),
            OsRng,
            pick_options,
        )
    }
}

impl<R: RngCore + CryptoRng> Host<R> {
    pub fn new(
        picker: Box<dyn DirectoryPicker>,
        lister: Box<dyn DirLister>,
        opener: Box<dyn Opener>,
        rng: R,
        pick_options: PickOptions,
    ) -> Self {
        Self {
            session: Session::new(),
            picker,
            lister,
            opener,
            rng,
            pick_options,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── typed operations ───────────────────────────────────────

    /// Ask the picker for a root folder and select it.
    pub fn select_folder(&mut self) -> Result<PathBuf, SessionError> {
        let picked = self.picker.pick(&self.pick_options).map_err(|e| {
            tracing::warn!("folder picker failed: {e}");
            SessionError::DialogError
        })?;
        let path = picked.ok_or(SessionError::InvalidPath)?;
        self.session.select_root(&path)?;
        Ok(path)
    }

    pub fn draw(&mut self) -> Result<DrawRecord, SessionError> {
        self.session.draw(self.lister.as_ref(), &mut self.rng)
    }

    pub fn open_winner(&self) -> Result<(), SessionError> {
        self.session.open_winner(self.opener.as_ref())
    }

    pub fn open_image(&self) -> Result<(), SessionError> {
        self.session.open_image(self.opener.as_ref())
    }

    pub fn step_back(&mut self) -> Result<DrawRecord, SessionError> {
        self.session.step_back().cloned()
    }

    // ── envelope operations ────────────────────────────────────

    /// Payload: the chosen absolute path.
    pub fn set_folder(&mut self) -> Envelope<String> {
        self.select_folder()
            .map(|p| p.display().to_string())
            .into()
    }

    /// Payload: `[winner_path, image_name_or_empty]`.
    pub fn get_random_subdir_path(&mut self) -> Envelope<[String; 2]> {
        self.draw()
            .map(|rec| {
                let image = rec
                    .image
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                [rec.path.display().to_string(), image]
            })
            .into()
    }

    pub fn open_winner_envelope(&self) -> Envelope<()> {
        Envelope::status(self.open_winner())
    }

    pub fn reset_folder(&mut self) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::opener::fake::RecordingOpener;
    use super::picker::fake::ScriptedPicker;
    use super::picker::PickError;
    use super::*;

    fn host_with(
        answers: Vec<Result<Option<PathBuf>, PickError>>,
        opener: RecordingOpener,
    ) -> Host<StdRng> {
        Host::new(
            Box::new(ScriptedPicker::with(answers)),
            Box::new(WalkLister),
            Box::new(opener),
            StdRng::seed_from_u64(3),
            PickOptions::default(),
        )
    }

    /// `<tmp>/a/photo.jpg`, `<tmp>/b/readme.md`, `<tmp>/loose.txt`.
    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::write(tmp.path().join("a").join("photo.jpg"), b"jpg").unwrap();
        fs::write(tmp.path().join("b").join("readme.md"), b"md").unwrap();
        fs::write(tmp.path().join("loose.txt"), b"txt").unwrap();
        tmp
    }

    #[test]
    fn set_folder_reports_dialog_failure_and_cancel() {
        let mut host = host_with(
            vec![Err(PickError::Unavailable("headless".into())), Ok(None)],
            RecordingOpener::default(),
        );
        assert_eq!(
            host.set_folder().marshal(),
            r#"{"succeed":false,"reason":"couldn't open dialog"}"#
        );
        assert_eq!(
            host.set_folder().marshal(),
            r#"{"succeed":false,"reason":"invalid path"}"#
        );
        assert!(host.session().root().is_none());
    }

    #[test]
    fn set_folder_rejects_relative_answers() {
        let mut host = host_with(
            vec![Ok(Some(PathBuf::from("relative/dir")))],
            RecordingOpener::default(),
        );
        let env = host.set_folder();
        assert!(!env.succeed);
        assert_eq!(env.reason.as_deref(), Some("invalid path"));
    }

    #[test]
    fn full_cycle_over_real_directories() {
        let tmp = fixture();
        let root = tmp.path().to_path_buf();
        let mut host = host_with(vec![Ok(Some(root.clone()))], RecordingOpener::default());

        assert_eq!(host.open_winner_envelope().reason.as_deref(), Some("no winner"));

        let env = host.set_folder();
        assert!(env.succeed);
        assert_eq!(env.data.as_deref(), Some(root.display().to_string().as_str()));

        let a = [root.join("a").display().to_string(), "photo.jpg".to_string()];
        let b = [root.join("b").display().to_string(), String::new()];

        let first = host.get_random_subdir_path().data.unwrap();
        let second = host.get_random_subdir_path().data.unwrap();
        assert!(first == a || first == b);
        assert!(second == a || second == b);
        assert_ne!(first, second);

        let third = host.get_random_subdir_path().data.unwrap();
        assert!(third == a || third == b);

        assert_eq!(host.open_winner_envelope().marshal(), r#"{"succeed":true}"#);
        assert_eq!(
            host.session().last_winner(),
            Some(Path::new(&third[0]))
        );
    }

    #[test]
    fn open_failure_is_reported() {
        let tmp = fixture();
        let mut host = host_with(
            vec![Ok(Some(tmp.path().to_path_buf()))],
            RecordingOpener::failing(),
        );
        host.select_folder().unwrap();
        host.draw().unwrap();
        let env = host.open_winner_envelope();
        assert!(!env.succeed);
        assert!(env.reason.unwrap().starts_with("error when opening the path"));
    }

    #[test]
    fn reset_folder_returns_to_fresh_state() {
        let tmp = fixture();
        let mut host = host_with(
            vec![Ok(Some(tmp.path().to_path_buf()))],
            RecordingOpener::default(),
        );
        host.select_folder().unwrap();
        host.draw().unwrap();

        host.reset_folder();
        assert_eq!(
            host.get_random_subdir_path().marshal(),
            r#"{"succeed":false,"reason":"no root folder"}"#
        );
        assert_eq!(host.open_winner_envelope().reason.as_deref(), Some("no winner"));
    }

    #[test]
    fn files_only_root_has_no_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.png"), b"png").unwrap();
        let mut host = host_with(
            vec![Ok(Some(tmp.path().to_path_buf()))],
            RecordingOpener::default(),
        );
        host.select_folder().unwrap();
        assert_eq!(
            host.get_random_subdir_path().reason.as_deref(),
            Some("no subdirectories found")
        );
    }
}
