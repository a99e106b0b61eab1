// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;

use crate::model::{PointId, Series};
use crate::select::{PixelMapper, PixelPoint};

/// One candle per column over a pannable window of the series, with a linear
/// price scale fit to the visible candles.
///
/// A viewport is rebuilt on every draw; it is only valid while that layout
/// is on screen, which is exactly the stability window the mapper contract
/// requires.
#[derive(Debug, Clone)]
pub struct ChartViewport {
    series: Arc<Series>,
    plot: Rect,
    offset: usize,
    price_low: f64,
    price_high: f64,
}

impl ChartViewport {
    /// Lays out the visible window. Returns `None` for an empty series or a
    /// plot area too small to scale prices in.
    pub fn layout(series: Arc<Series>, plot: Rect, offset: usize) -> Option<Self> {
        if series.is_empty() || plot.width == 0 || plot.height < 2 {
            return None;
        }

        let offset = offset.min(Self::max_offset(&series, plot.width));
        let end = (offset + plot.width as usize).min(series.len());
        let visible = &series.points()[offset..end];

        let mut price_low = f64::MAX;
        let mut price_high = f64::MIN;
        for point in visible {
            price_low = price_low.min(point.low());
            price_high = price_high.max(point.high());
        }
        if price_low >= price_high {
            // Flat window; pad so the scale stays invertible.
            price_low -= 1.0;
            price_high += 1.0;
        }

        Some(Self { series, plot, offset, price_low, price_high })
    }

    pub fn max_offset(series: &Series, plot_width: u16) -> usize {
        series.len().saturating_sub(plot_width as usize)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn plot(&self) -> Rect {
        self.plot
    }

    pub fn price_span(&self) -> (f64, f64) {
        (self.price_low, self.price_high)
    }

    /// Indices of the visible window, `start..end`.
    pub fn visible_range(&self) -> (usize, usize) {
        let end = (self.offset + self.plot.width as usize).min(self.series.len());
        (self.offset, end)
    }

    /// Series index rendered at the given absolute column, if any.
    pub fn index_at(&self, x: u16) -> Option<usize> {
        if x < self.plot.x || x >= self.plot.x.saturating_add(self.plot.width) {
            return None;
        }
        let index = self.offset + usize::from(x - self.plot.x);
        (index < self.series.len()).then_some(index)
    }

    /// Hit test for the click path: the cell must be inside the plot and its
    /// column must carry a candle.
    pub fn point_at(&self, position: PixelPoint) -> Option<PointId> {
        if position.y < self.plot.y || position.y >= self.plot.y.saturating_add(self.plot.height) {
            return None;
        }
        let index = self.index_at(position.x)?;
        Some(self.series.points()[index].id())
    }

    /// Row (absolute) for a price, top row = highest visible price.
    pub fn row_of_price(&self, price: f64) -> u16 {
        let rows = f64::from(self.plot.height - 1);
        let span = self.price_high - self.price_low;
        let fraction = ((self.price_high - price) / span).clamp(0.0, 1.0);
        self.plot.y + (fraction * rows).round() as u16
    }
}

impl PixelMapper for ChartViewport {
    /// Timestamp of the candle rendered at the column, clamped to the
    /// visible window's edges for positions outside the plot.
    fn time_at(&self, x: u16) -> DateTime<Utc> {
        let (start, end) = self.visible_range();
        let column = x.saturating_sub(self.plot.x) as usize;
        let index = (start + column).min(end.saturating_sub(1));
        self.series.points()[index].timestamp()
    }

    fn price_at(&self, y: u16) -> f64 {
        let rows = f64::from(self.plot.height - 1);
        let fraction = (f64::from(y.saturating_sub(self.plot.y)) / rows).clamp(0.0, 1.0);
        self.price_high - fraction * (self.price_high - self.price_low)
    }
}
