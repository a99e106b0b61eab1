// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};

use super::point::{Point, PointId};

/// The ordered candlestick series the chart renders and the selection engine
/// scans. Points are expected to be strictly ascending by timestamp; a
/// violated ordering degrades selection behavior but never panics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point whose id matches, mirroring the lookup the panel and the
    /// save path use. Duplicate timestamps are not disambiguated.
    pub fn point_by_id(&self, point_id: PointId) -> Option<&Point> {
        self.points.iter().find(|point| point.id() == point_id)
    }

    pub fn contains_id(&self, point_id: PointId) -> bool {
        self.point_by_id(point_id).is_some()
    }

    /// Ids of every point whose timestamp falls inside the inclusive time
    /// range and whose `[low, high]` band intersects the inclusive price
    /// band. This is the drag-commit scan; it never removes anything.
    pub fn ids_in_region(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        price_low: f64,
        price_high: f64,
    ) -> Vec<PointId> {
        self.points
            .iter()
            .filter(|point| point.timestamp() >= start && point.timestamp() <= end)
            .filter(|point| point.intersects_price_band(price_low, price_high))
            .map(Point::id)
            .collect()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.points.first().map(Point::timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(Point::timestamp)
    }

    /// Lowest low and highest high over the whole series, if non-empty.
    pub fn price_extent(&self) -> Option<(f64, f64)> {
        let mut extent = None::<(f64, f64)>;
        for point in &self.points {
            extent = Some(match extent {
                Some((low, high)) => (low.min(point.low()), high.max(point.high())),
                None => (point.low(), point.high()),
            });
        }
        extent
    }
}
