//! Winner panel: details of the current draw plus a half-block image preview.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::preview::Preview;
use crate::core::session::DrawRecord;

use super::theme::Theme;

/// Rows reserved for the text block above the preview.
const DETAIL_ROWS: u16 = 5;

pub struct WinnerWidget<'a> {
    pub record: Option<&'a DrawRecord>,
    pub preview: Option<&'a Preview>,
    pub show_preview: bool,
    pub is_favourite: bool,
}

impl<'a> Widget for WinnerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Winner ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(record) = self.record else {
            Paragraph::new(vec![
                Line::raw(""),
                Line::from(Span::styled(
                    "  Nothing drawn yet. Pick a root folder, then draw.",
                    Theme::dim_style(),
                )),
            ])
            .render(inner, buf);
            return;
        };

        let detail_h = DETAIL_ROWS.min(inner.height);
        let detail_area = Rect::new(inner.x, inner.y, inner.width, detail_h);
        Paragraph::new(self.detail_lines(record))
            .wrap(Wrap { trim: false })
            .render(detail_area, buf);

        if !self.show_preview || record.image.is_none() {
            return;
        }
        let image_area = Rect::new(
            inner.x,
            inner.y + detail_h,
            inner.width,
            inner.height.saturating_sub(detail_h),
        );
        match self.preview.map(|p| &p.pixels) {
            Some(Ok(pixels)) => render_image_halfblocks(pixels, image_area, buf),
            Some(Err(reason)) => {
                Paragraph::new(Line::from(Span::styled(
                    format!(" preview unavailable: {reason}"),
                    Theme::error_style(),
                )))
                .render(image_area, buf);
            }
            None => {}
        }
    }
}

impl<'a> WinnerWidget<'a> {
    fn detail_lines(&self, record: &DrawRecord) -> Vec<Line<'static>> {
        let star = if self.is_favourite { "★ " } else { "" };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(star.to_string(), Theme::favourite_style()),
                Span::styled(record.name(), Theme::winner_style()),
            ]),
            Line::from(Span::styled(record.path.display().to_string(), Theme::detail_style())),
        ];

        match &record.image {
            Some(image) => {
                let mime = self
                    .preview
                    .and_then(|p| p.mime.clone())
                    .map(|m| format!("  ({m})"))
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled("image  ", Theme::dim_style()),
                    Span::styled(image.to_string_lossy().into_owned(), Theme::detail_style().add_modifier(Modifier::ITALIC)),
                    Span::styled(mime, Theme::dim_style()),
                ]));
            }
            None => lines.push(Line::from(Span::styled("no image", Theme::dim_style()))),
        }

        lines.push(Line::from(vec![
            Span::styled("drawn  ", Theme::dim_style()),
            Span::styled(
                record.drawn_at.format("%Y/%m/%d %H:%M:%S").to_string(),
                Theme::detail_style(),
            ),
        ]));
        lines
    }
}

/// Draw `pixels` with `▀` half-blocks, two image rows per terminal row.
///
/// The image is fitted inside `area` keeping its aspect ratio (cells are
/// about twice as tall as wide) and centred horizontally.
fn render_image_halfblocks(pixels: &image::RgbaImage, area: Rect, buf: &mut Buffer) {
    use image::imageops::FilterType;

    if area.width == 0 || area.height == 0 || pixels.width() == 0 || pixels.height() == 0 {
        return;
    }

    let budget_w = area.width as f64;
    let budget_h = area.height as f64 * 2.0;
    let (src_w, src_h) = (pixels.width() as f64, pixels.height() as f64);

    let scale = (budget_w / src_w).min(budget_h / src_h).min(1.0);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;
    let fitted = image::imageops::resize(pixels, fit_w, fit_h, FilterType::Triangle);

    let col_offset = area.width.saturating_sub(fit_w as u16) / 2;

    for row in 0..area.height {
        let top = row as u32 * 2;
        if top >= fit_h {
            break;
        }
        for col in 0..fit_w.min(area.width as u32) {
            let t = fitted.get_pixel(col, top);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if top + 1 < fit_h {
                let b = fitted.get_pixel(col, top + 1);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            if let Some(cell) = buf.cell_mut(Position::new(area.x + col_offset + col as u16, area.y + row)) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}
