//! User configuration — keybindings, dialog options and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/dir-draw/config.toml` (default `~/.config/dir-draw/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::host::picker::PickOptions;

// ───────────────────────────────────────── actions ───────────

/// Every rebindable action of the draw view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Draw,
    OpenWinner,
    OpenImage,
    SelectFolder,
    StepBack,
    ToggleFavourite,
    TogglePreview,
    Reset,
    Help,
    Quit,
}

impl Action {
    /// Display order for the help popup and the config file.
    pub const ALL: &'static [Action] = &[
        Action::Draw,
        Action::OpenWinner,
        Action::OpenImage,
        Action::SelectFolder,
        Action::StepBack,
        Action::ToggleFavourite,
        Action::TogglePreview,
        Action::Reset,
        Action::Help,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Draw => "Draw a folder",
            Action::OpenWinner => "Open winner",
            Action::OpenImage => "Open preview image",
            Action::SelectFolder => "Choose root folder",
            Action::StepBack => "Previous winner",
            Action::ToggleFavourite => "Toggle favourite",
            Action::TogglePreview => "Toggle preview",
            Action::Reset => "Reset session",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::Draw => "draw",
            Action::OpenWinner => "open_winner",
            Action::OpenImage => "open_image",
            Action::SelectFolder => "select_folder",
            Action::StepBack => "step_back",
            Action::ToggleFavourite => "toggle_favourite",
            Action::TogglePreview => "toggle_preview",
            Action::Reset => "reset",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys: (config spelling, display spelling, code).
const NAMED_KEYS: &[(&str, &str, KeyCode)] = &[
    ("Up", "↑", KeyCode::Up),
    ("Down", "↓", KeyCode::Down),
    ("Left", "←", KeyCode::Left),
    ("Right", "→", KeyCode::Right),
    ("Enter", "Enter", KeyCode::Enter),
    ("Esc", "Esc", KeyCode::Esc),
    ("Tab", "Tab", KeyCode::Tab),
    ("Backspace", "Bksp", KeyCode::Backspace),
    ("Delete", "Del", KeyCode::Delete),
    ("Home", "Home", KeyCode::Home),
    ("End", "End", KeyCode::End),
    ("PageUp", "PgUp", KeyCode::PageUp),
    ("PageDown", "PgDn", KeyCode::PageDown),
    ("Space", "Space", KeyCode::Char(' ')),
];

/// A key code plus CTRL/ALT/SHIFT modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Platform modifiers such as SUPER are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & Self::MASK) == (event.modifiers & Self::MASK)
    }

    /// For the help popup, e.g. `"Alt+↑"`, `"Space"`, `"q"`.
    pub fn display(&self) -> String {
        self.render(|k| k.1)
    }

    /// For the config file, e.g. `"Alt+Up"`, `"Space"`, `"q"`.
    fn to_config_string(&self) -> String {
        self.render(|k| k.0)
    }

    fn render(&self, pick: fn(&(&'static str, &'static str, KeyCode)) -> &'static str) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        match NAMED_KEYS.iter().find(|k| k.2 == self.code) {
            Some(named) => s.push_str(pick(named)),
            None => match self.code {
                KeyCode::Char(c) => s.push(c),
                KeyCode::F(n) => s.push_str(&format!("F{n}")),
                other => s.push_str(&format!("{other:?}")),
            },
        }
        s
    }

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`, `"F5"`.
    fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let lower = key_part.to_lowercase();
        let code = if let Some(named) = NAMED_KEYS
            .iter()
            .find(|(written, shown, _)| written.to_lowercase() == lower || shown.to_lowercase() == lower)
        {
            named.2
        } else if key_part.chars().count() == 1 {
            KeyCode::Char(key_part.chars().next()?)
        } else if let Some(n) = lower.strip_prefix('f') {
            KeyCode::F(n.parse().ok()?)
        } else {
            return None;
        };

        Some(Self { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Render the half-block image preview in the winner panel.
    pub show_preview: bool,
    /// Title of the native folder dialog.
    pub dialog_title: String,
    /// Let the dialog create new folders (honoured where the platform allows).
    pub can_create_directories: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let pick = PickOptions::default();
        Self {
            bindings: Self::default_bindings(),
            show_preview: true,
            dialog_title: pick.title,
            can_create_directories: pick.can_create_directories,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let mut m = HashMap::new();

        m.insert(Draw, vec![KeyBind::plain(Char(' ')), KeyBind::plain(Char('r'))]);
        m.insert(OpenWinner, vec![KeyBind::plain(Enter)]);
        m.insert(OpenImage, vec![KeyBind::plain(Char('i'))]);
        m.insert(SelectFolder, vec![KeyBind::plain(Char('o'))]);
        m.insert(StepBack, vec![KeyBind::plain(Backspace), KeyBind::plain(Char('b'))]);
        m.insert(ToggleFavourite, vec![KeyBind::plain(Char('f'))]);
        m.insert(TogglePreview, vec![KeyBind::plain(Char('p'))]);
        m.insert(Reset, vec![KeyBind::plain(Char('x'))]);
        m.insert(Help, vec![KeyBind::plain(Char('?'))]);
        m.insert(Quit, vec![KeyBind::plain(Char('q')), KeyBind::plain(Esc)]);

        m
    }

    pub fn pick_options(&self) -> PickOptions {
        PickOptions {
            title: self.dialog_title.clone(),
            can_create_directories: self.can_create_directories,
        }
    }

    /// When several bindings match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, bmc)| mc > bmc) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// e.g. `"Space/r"`.
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: draw | {}: open | {}: folder | {}: reset | {}: help",
            self.short_binding(Action::Draw),
            self.short_binding(Action::OpenWinner),
            self.short_binding(Action::SelectFolder),
            self.short_binding(Action::Reset),
            self.short_binding(Action::Help),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_dir().join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                tracing::debug!("no config at {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_dir().join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "show_preview" => {
                    if let Some(b) = parse_bool(key, value) {
                        config.show_preview = b;
                    }
                    continue;
                }
                "can_create_directories" => {
                    if let Some(b) = parse_bool(key, value) {
                        config.can_create_directories = b;
                    }
                    continue;
                }
                "dialog_title" => {
                    let title = value.trim_matches('"');
                    if !title.is_empty() {
                        config.dialog_title = title.to_string();
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("ignoring unknown config key {key:?}");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# dir-draw configuration".to_string(),
            String::new(),
            format!("show_preview = {}", self.show_preview),
            format!("dialog_title = \"{}\"", self.dialog_title),
            format!("can_create_directories = {}", self.can_create_directories),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// `true` / `false`; anything else keeps the default.
fn parse_bool(key: &str, value: &str) -> Option<bool> {
    match value.parse() {
        Ok(b) => Some(b),
        Err(_) => {
            tracing::debug!("ignoring {key} = {value:?}, expected true or false");
            None
        }
    }
}

/// `$XDG_CONFIG_HOME/dir-draw`, or `~/.config/dir-draw`.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    base.join(env!("CARGO_PKG_NAME"))
}
