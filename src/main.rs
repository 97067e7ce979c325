//! Draw a random, not-yet-drawn subdirectory of a chosen folder.
//!
//! Run the binary to launch the interactive view.
//! Run with `--print` to emit one JSON envelope per operation instead.

mod app;
mod config;
mod core;
mod favourites;
mod host;
mod ui;

use std::io::{self, stderr, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{CryptoRng, RngCore};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::favourites::Favourites;
use crate::host::picker::{ArgPicker, DialogPicker, DirectoryPicker};
use crate::host::Host;
use crate::ui::{
    history::HistoryWidget, layout::AppLayout, popup::HelpPopup, theme::Theme,
    winner::WinnerWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Draw a random subdirectory, without repeats")]
struct Cli {
    /// Root folder (opens a folder dialog when omitted).
    path: Option<PathBuf>,

    /// Print JSON envelopes to stdout instead of starting the TUI.
    #[arg(long)]
    print: bool,

    /// Number of draws in `--print` mode.
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Open the last winner after drawing (`--print` mode).
    #[arg(long)]
    open: bool,
}

// ───────────────────────────────────────── print mode ───────

/// One envelope per line: the folder pick, `count` draws, then the open.
/// Later lines are still written after a failed pick.
fn run_print<R: RngCore + CryptoRng>(
    host: &mut Host<R>,
    count: usize,
    open: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "{}", host.set_folder().marshal())?;
    for _ in 0..count {
        writeln!(out, "{}", host.get_random_subdir_path().marshal())?;
    }
    if open {
        writeln!(out, "{}", host.open_winner_envelope().marshal())?;
    }
    out.flush()
}

// ───────────────────────────────────────── header ───────────

fn header_text(state: &AppState) -> String {
    let session = state.host.session();
    match session.root() {
        Some(root) => format!(
            " {}  ·  {} drawn  ·  {} left in pool  ·  {} favourites",
            root.display(),
            session.history().len(),
            session.remaining().len(),
            state.favourites.len(),
        ),
        None => " no root folder selected".to_string(),
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stdout carries --print output
        .init();

    let cli = Cli::parse();
    let user_config = AppConfig::load();

    let picker: Box<dyn DirectoryPicker> = match cli.path.clone() {
        Some(path) => Box::new(ArgPicker::new(path, Box::new(DialogPicker))),
        None => Box::new(DialogPicker),
    };
    let mut host = Host::system(picker, user_config.pick_options());

    // ── print mode ────────────────────────────────────────────
    if cli.print {
        run_print(&mut host, cli.count, cli.open, &mut io::stdout().lock())?;
        return Ok(());
    }

    let mut state = AppState::new(host, user_config, Favourites::load());
    if cli.path.is_some() {
        handler::apply(&mut state, config::Action::SelectFolder);
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stderr(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(250));

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            frame.render_widget(
                Paragraph::new(header_text(&state)).style(Theme::header_style()),
                layout.header_area,
            );

            let current = state.host.session().current();
            frame.render_widget(
                WinnerWidget {
                    record: current,
                    preview: state.preview.as_ref(),
                    show_preview: state.config.show_preview,
                    is_favourite: current.is_some_and(|r| state.favourites.contains(&r.path)),
                },
                layout.winner_area,
            );
            frame.render_widget(
                HistoryWidget {
                    history: state.host.session().history(),
                    favourites: &state.favourites,
                },
                layout.history_area,
            );

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            frame.render_widget(
                Paragraph::new(status_text).style(Theme::status_bar_style()),
                layout.status_area,
            );

            if state.active_view == ActiveView::Help {
                frame.render_widget(HelpPopup { config: &state.config }, frame.area());
            }
        })?;

        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
            Some(AppEvent::Resize) | Some(AppEvent::Tick) => {}
            None => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::core::listing::WalkLister;
    use crate::host::opener::fake::RecordingOpener;
    use crate::host::picker::fake::ScriptedPicker;
    use crate::host::picker::PickOptions;

    fn host_answering(answer: Option<PathBuf>) -> Host<StdRng> {
        Host::new(
            Box::new(ScriptedPicker::with(vec![Ok(answer)])),
            Box::new(WalkLister),
            Box::new(RecordingOpener::default()),
            StdRng::seed_from_u64(9),
            PickOptions::default(),
        )
    }

    fn print_lines(host: &mut Host<StdRng>, count: usize, open: bool) -> Vec<String> {
        let mut out = Vec::new();
        run_print(host, count, open, &mut out).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn cancelled_pick_still_prints_every_line() {
        let mut host = host_answering(None);
        let lines = print_lines(&mut host, 2, true);
        assert_eq!(
            lines,
            [
                r#"{"succeed":false,"reason":"invalid path"}"#,
                r#"{"succeed":false,"reason":"no root folder"}"#,
                r#"{"succeed":false,"reason":"no root folder"}"#,
                r#"{"succeed":false,"reason":"no winner"}"#,
            ]
        );
    }

    #[test]
    fn draws_then_opens_the_last_winner() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("only")).unwrap();
        let root = tmp.path().to_path_buf();

        let mut host = host_answering(Some(root.clone()));
        let lines = print_lines(&mut host, 1, true);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(r#"{"succeed":true,"data":"#));

        let winner = root.join("only").display().to_string();
        let drawn: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(drawn["data"][0], winner.as_str());
        assert_eq!(drawn["data"][1], "");
        assert_eq!(lines[2], r#"{"succeed":true}"#);
    }

    #[test]
    fn open_line_only_when_asked() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("only")).unwrap();

        let mut host = host_answering(Some(tmp.path().to_path_buf()));
        assert_eq!(print_lines(&mut host, 3, false).len(), 4);
    }
}
