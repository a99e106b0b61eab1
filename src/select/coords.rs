// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};

/// A terminal cell position in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: u16,
    pub y: u16,
}

impl PixelPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl PixelRect {
    /// Bounding box of two corner points, matching the drag overlay rule:
    /// `left=min`, `top=min`, `width=|dx|`, `height=|dy|`.
    pub fn bounding(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    pub fn right(&self) -> u16 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    /// A drag that never left its origin cell on either axis. Committing a
    /// zero-area rectangle selects nothing; the click path handles toggles.
    pub fn is_zero_area(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Cell-to-domain conversion supplied by the chart collaborator.
///
/// Valid only while the chart's axis scale is stable; the caller must not
/// hold a mapper across a re-layout or pan.
pub trait PixelMapper {
    fn time_at(&self, x: u16) -> DateTime<Utc>;
    fn price_at(&self, y: u16) -> f64;
}
