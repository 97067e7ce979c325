//! Central application state.
//!
//! Rendering reads `&AppState`, key handling mutates `&mut AppState`; the
//! draw session itself lives inside [`Host`].

use crate::config::AppConfig;
use crate::favourites::Favourites;
use crate::host::Host;

use super::preview::Preview;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Draw,
    Help,
}

pub struct AppState {
    pub host: Host,
    pub config: AppConfig,
    pub favourites: Favourites,
    /// Decoded image of the current winner, when it has one.
    pub preview: Option<Preview>,
    /// Shown in the bottom bar instead of the key hint.
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(host: Host, config: AppConfig, favourites: Favourites) -> Self {
        Self {
            host,
            config,
            favourites,
            preview: None,
            status_message: None,
            active_view: ActiveView::default(),
            should_quit: false,
        }
    }

    /// Re-decode the preview for the current winner (or drop it).
    pub fn refresh_preview(&mut self) {
        if !self.config.show_preview {
            self.preview = None;
            return;
        }
        let wanted = self.host.session().current().and_then(|rec| rec.image_path());
        self.preview = match wanted {
            Some(path) if self.preview.as_ref().is_some_and(|p| p.path == path) => {
                self.preview.take()
            }
            Some(path) => Some(Preview::load(&path)),
            None => None,
        };
    }
}
