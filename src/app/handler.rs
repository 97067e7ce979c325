//! Input handling — maps key events to session operations and state changes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Action;
use crate::core::error::SessionError;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Draw => {
            if let Some(action) = state.config.match_key(key) {
                apply(state, action);
            }
        }
        ActiveView::Help => handle_help_key(state, key),
    }
}

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    let closes = matches!(key.code, KeyCode::Esc | KeyCode::Enter)
        || state.config.match_key(key) == Some(Action::Help);
    if closes {
        state.active_view = ActiveView::Draw;
    }
}

/// Run one action against the session and report the outcome in the
/// status bar.
pub fn apply(state: &mut AppState, action: Action) {
    let message = match action {
        Action::Draw => match state.host.draw() {
            Ok(rec) => {
                state.refresh_preview();
                let left = state.host.session().remaining().len();
                Ok(format!("Drew {} ({left} left)", rec.name()))
            }
            Err(e) => Err(e),
        },
        Action::OpenWinner => state.host.open_winner().map(|()| {
            let winner = state.host.session().last_winner().map(|p| p.display().to_string());
            format!("Opened {}", winner.unwrap_or_default())
        }),
        Action::OpenImage => state.host.open_image().map(|()| "Opened preview image".to_string()),
        Action::SelectFolder => match state.host.select_folder() {
            Ok(root) => {
                state.preview = None;
                Ok(format!("Root folder: {}", root.display()))
            }
            Err(e) => Err(e),
        },
        Action::StepBack => match state.host.step_back() {
            Ok(rec) => {
                state.refresh_preview();
                Ok(format!("Back to {}", rec.name()))
            }
            Err(e) => Err(e),
        },
        Action::ToggleFavourite => toggle_favourite(state),
        Action::TogglePreview => {
            state.config.show_preview = !state.config.show_preview;
            state.refresh_preview();
            let shown = if state.config.show_preview { "on" } else { "off" };
            match state.config.save() {
                Ok(()) => Ok(format!("Preview {shown}")),
                Err(e) => Ok(format!("Preview {shown} (not saved: {e})")),
            }
        }
        Action::Reset => {
            state.host.reset_folder();
            state.preview = None;
            Ok("Session reset".to_string())
        }
        Action::Help => {
            state.active_view = ActiveView::Help;
            return;
        }
        Action::Quit => {
            state.should_quit = true;
            return;
        }
    };

    state.status_message = Some(match message {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("{action:?} failed: {e}");
            format!("{}: {e}", action.label())
        }
    });
}

fn toggle_favourite(state: &mut AppState) -> Result<String, SessionError> {
    let winner = state
        .host
        .session()
        .last_winner()
        .map(|p| p.to_path_buf())
        .ok_or(SessionError::NoWinner)?;
    Ok(match state.favourites.toggle(&winner) {
        Ok(true) => format!("★ {}", winner.display()),
        Ok(false) => format!("Unstarred {}", winner.display()),
        Err(e) => format!("Favourites not saved: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use rand::rngs::OsRng;

    use super::*;
    use crate::config::AppConfig;
    use crate::core::listing::WalkLister;
    use crate::favourites::Favourites;
    use crate::host::opener::fake::RecordingOpener;
    use crate::host::picker::fake::ScriptedPicker;
    use crate::host::picker::PickOptions;
    use crate::host::Host;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// State rooted at a temp dir holding `one/` (with `a.png`) and `two/`.
    fn state_with_root(tmp: &tempfile::TempDir) -> AppState {
        fs::create_dir(tmp.path().join("one")).unwrap();
        fs::create_dir(tmp.path().join("two")).unwrap();
        fs::write(tmp.path().join("one").join("a.png"), b"not really a png").unwrap();

        let host = Host::new(
            Box::new(ScriptedPicker::with(vec![Ok(Some(tmp.path().to_path_buf()))])),
            Box::new(WalkLister),
            Box::new(RecordingOpener::default()),
            OsRng,
            PickOptions::default(),
        );
        let mut config = AppConfig::default();
        config.show_preview = false;
        let favourites = Favourites::load_from(tmp.path().join("cfg").join("favourites"));
        AppState::new(host, config, favourites)
    }

    #[test]
    fn select_then_draw_updates_session_and_status() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_with_root(&tmp);

        handle_key(&mut state, press(KeyCode::Char('o')));
        assert_eq!(state.host.session().root(), Some(tmp.path()));

        handle_key(&mut state, press(KeyCode::Char(' ')));
        let status = state.status_message.clone().unwrap();
        assert!(status.starts_with("Drew "), "{status}");
        assert!(status.ends_with("(1 left)"), "{status}");
        assert_eq!(state.host.session().history().len(), 1);
    }

    #[test]
    fn errors_surface_in_status_bar() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_with_root(&tmp);

        handle_key(&mut state, press(KeyCode::Char('r')));
        assert_eq!(
            state.status_message.as_deref(),
            Some("Draw a folder: no root folder")
        );

        handle_key(&mut state, press(KeyCode::Enter));
        assert_eq!(state.status_message.as_deref(), Some("Open winner: no winner"));
    }

    #[test]
    fn favourite_toggle_needs_a_winner_and_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_with_root(&tmp);

        handle_key(&mut state, press(KeyCode::Char('f')));
        assert_eq!(
            state.status_message.as_deref(),
            Some("Toggle favourite: no winner")
        );

        apply(&mut state, Action::SelectFolder);
        apply(&mut state, Action::Draw);
        apply(&mut state, Action::ToggleFavourite);

        let winner: PathBuf = state.host.session().last_winner().unwrap().to_path_buf();
        assert!(state.favourites.contains(&winner));
        let reloaded = Favourites::load_from(tmp.path().join("cfg").join("favourites"));
        assert!(reloaded.contains(&winner));
    }

    #[test]
    fn reset_clears_session_and_preview() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_with_root(&tmp);
        apply(&mut state, Action::SelectFolder);
        apply(&mut state, Action::Draw);

        handle_key(&mut state, press(KeyCode::Char('x')));
        assert!(state.host.session().root().is_none());
        assert!(state.host.session().last_winner().is_none());
        assert!(state.preview.is_none());
        assert_eq!(state.status_message.as_deref(), Some("Session reset"));
    }

    #[test]
    fn help_view_opens_and_closes() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_with_root(&tmp);

        handle_key(&mut state, press(KeyCode::Char('?')));
        assert_eq!(state.active_view, ActiveView::Help);

        // Draw keys do nothing while help is up.
        handle_key(&mut state, press(KeyCode::Char(' ')));
        assert!(state.host.session().history().is_empty());

        handle_key(&mut state, press(KeyCode::Esc));
        assert_eq!(state.active_view, ActiveView::Draw);
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_with_root(&tmp);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);

        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_with_root(&tmp);
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);
    }
}
