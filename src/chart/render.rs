// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::prelude::*;

use crate::select::{HighlightState, PixelPoint, PixelRect};

use super::viewport::ChartViewport;

const RISING_COLOR: Color = Color::Green;
const FALLING_COLOR: Color = Color::Red;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const OVERLAY_BG: Color = Color::DarkGray;

const BODY_GLYPH: char = '█';
const WICK_GLYPH: char = '│';

/// Rasterizes the visible candles into one styled line per plot row.
///
/// Highlighted candles repaint in the highlight color on every call; the
/// reset-then-apply recompute lives in the highlight state, so this stays a
/// pure projection of it. The in-progress drag overlay, if any, shades the
/// cells it covers.
pub fn candle_lines(
    viewport: &ChartViewport,
    series: &crate::model::Series,
    highlight: &HighlightState,
    overlay: Option<PixelRect>,
) -> Vec<Line<'static>> {
    let plot = viewport.plot();
    let (start, end) = viewport.visible_range();

    let mut lines = Vec::with_capacity(plot.height as usize);
    for row_offset in 0..plot.height {
        let row = plot.y + row_offset;
        let mut spans = Vec::with_capacity(plot.width as usize);

        for column_offset in 0..plot.width {
            let column = plot.x + column_offset;
            let index = start + column_offset as usize;

            let (glyph, mut style) = if index < end {
                let point = &series.points()[index];
                let high_row = viewport.row_of_price(point.high());
                let low_row = viewport.row_of_price(point.low());
                let body_top = viewport.row_of_price(point.open().max(point.close()));
                let body_bottom = viewport.row_of_price(point.open().min(point.close()));

                if row >= high_row && row <= low_row {
                    let color = if highlight.is_highlighted(point.id()) {
                        HIGHLIGHT_COLOR
                    } else if point.is_rising() {
                        RISING_COLOR
                    } else {
                        FALLING_COLOR
                    };
                    let glyph = if row >= body_top && row <= body_bottom {
                        BODY_GLYPH
                    } else {
                        WICK_GLYPH
                    };
                    (glyph, Style::default().fg(color))
                } else {
                    (' ', Style::default())
                }
            } else {
                (' ', Style::default())
            };

            if let Some(overlay) = overlay {
                if overlay.contains(PixelPoint::new(column, row)) {
                    style = style.bg(OVERLAY_BG);
                }
            }

            spans.push(Span::styled(glyph.to_string(), style));
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// The selection summary panel: one block per selected point, ascending by
/// timestamp, or a placeholder when nothing is selected.
pub fn panel_lines(highlight: &HighlightState) -> Vec<Line<'static>> {
    if highlight.panel().is_empty() {
        return vec![Line::from(Span::styled(
            "No selection",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for (index, entry) in highlight.panel().iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        let [date, open, high, low, close] = entry.lines();
        lines.push(Line::from(Span::styled(date, Style::default().fg(HIGHLIGHT_COLOR))));
        for field in [open, high, low, close] {
            lines.push(Line::from(Span::raw(field)));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use ratatui::layout::Rect;

    use crate::model::{Point, Series};
    use crate::select::{HighlightState, SelectionSet};

    use super::*;

    fn fixture() -> (Arc<Series>, ChartViewport) {
        let points = vec![
            Point::new(
                Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().expect("timestamp"),
                100.0,
                110.0,
                90.0,
                105.0,
            ),
            Point::new(
                Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).single().expect("timestamp"),
                105.0,
                110.0,
                90.0,
                95.0,
            ),
        ];
        let series = Arc::new(Series::new(points));
        let viewport =
            ChartViewport::layout(series.clone(), Rect::new(0, 0, 4, 11), 0).expect("viewport");
        (series, viewport)
    }

    fn cell<'a>(lines: &'a [Line<'static>], row: usize, column: usize) -> (&'a str, Style) {
        let span = &lines[row].spans[column];
        (span.content.as_ref(), span.style)
    }

    #[test]
    fn candles_render_wick_and_body_in_direction_colors() {
        let (series, viewport) = fixture();
        let mut selection = SelectionSet::new();
        let highlight = HighlightState::synchronize(&mut selection, &series);

        let lines = candle_lines(&viewport, &series, &highlight, None);
        assert_eq!(lines.len(), 11);

        // Rising candle in column 0: wick at the top row, body mid-chart.
        let (glyph, style) = cell(&lines, 0, 0);
        assert_eq!(glyph, "│");
        assert_eq!(style.fg, Some(RISING_COLOR));

        // Body spans close=105 (row 3 rounded) down to open=100 (row 5).
        let (glyph, _) = cell(&lines, 5, 0);
        assert_eq!(glyph, "█");

        // Falling candle in column 1.
        let (_, style) = cell(&lines, 0, 1);
        assert_eq!(style.fg, Some(FALLING_COLOR));

        // Columns without candles stay blank.
        let (glyph, _) = cell(&lines, 5, 2);
        assert_eq!(glyph, " ");
    }

    #[test]
    fn highlighted_candles_repaint_in_highlight_color() {
        let (series, viewport) = fixture();
        let mut selection = SelectionSet::new();
        selection.add(series.points()[0].id());
        let highlight = HighlightState::synchronize(&mut selection, &series);

        let lines = candle_lines(&viewport, &series, &highlight, None);
        let (_, style) = cell(&lines, 0, 0);
        assert_eq!(style.fg, Some(HIGHLIGHT_COLOR));
        let (_, style) = cell(&lines, 0, 1);
        assert_eq!(style.fg, Some(FALLING_COLOR));
    }

    #[test]
    fn overlay_shades_only_the_cells_it_covers() {
        let (series, viewport) = fixture();
        let mut selection = SelectionSet::new();
        let highlight = HighlightState::synchronize(&mut selection, &series);

        let overlay = PixelRect { left: 1, top: 1, width: 1, height: 2 };
        let lines = candle_lines(&viewport, &series, &highlight, Some(overlay));

        let (_, style) = cell(&lines, 1, 1);
        assert_eq!(style.bg, Some(OVERLAY_BG));
        let (_, style) = cell(&lines, 1, 3);
        assert_eq!(style.bg, None);
        let (_, style) = cell(&lines, 4, 1);
        assert_eq!(style.bg, None);
    }

    #[test]
    fn panel_shows_placeholder_then_entries() {
        let (series, _) = fixture();
        let mut selection = SelectionSet::new();
        let highlight = HighlightState::synchronize(&mut selection, &series);
        let lines = panel_lines(&highlight);
        assert_eq!(lines.len(), 1);

        selection.add(series.points()[0].id());
        let highlight = HighlightState::synchronize(&mut selection, &series);
        let lines = panel_lines(&highlight);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].spans[0].content.as_ref(), "Date: 2023-01-01");
    }
}
