//! History panel: every draw since the root was chosen, newest first.

use std::ffi::OsStr;
use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

use crate::core::session::DrawRecord;
use crate::favourites::Favourites;

use super::theme::Theme;

pub struct HistoryWidget<'a> {
    pub history: &'a [DrawRecord],
    pub favourites: &'a Favourites,
}

impl<'a> Widget for HistoryWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" History ({}) ", self.history.len()))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());

        let items: Vec<ListItem> = self
            .history
            .iter()
            .rev()
            .enumerate()
            .map(|(i, rec)| ListItem::new(history_line(rec, i == 0, self.favourites.contains(&rec.path))))
            .collect();

        List::new(items).block(block).render(area, buf);
    }
}

fn history_line(rec: &DrawRecord, is_current: bool, is_favourite: bool) -> Line<'static> {
    let name_style = if is_current {
        Theme::winner_style()
    } else {
        Theme::detail_style()
    };
    let mut spans = vec![
        Span::styled(if is_favourite { "★ " } else { "  " }, Theme::favourite_style()),
        Span::styled(rec.drawn_at.format("%H:%M:%S ").to_string(), Theme::dim_style()),
        Span::styled(rec.name(), name_style),
    ];
    if let Some(image) = rec.image.as_deref() {
        spans.push(Span::styled(
            format!("  {}", short_ext(image)),
            Theme::dim_style().add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

/// `"cover.jpeg"` → `"jpeg"`; falls back to the whole name.
fn short_ext(name: &OsStr) -> String {
    Path::new(name)
        .extension()
        .unwrap_or(name)
        .to_string_lossy()
        .into_owned()
}
