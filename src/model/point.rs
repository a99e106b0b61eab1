// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a point within a series: its millisecond timestamp.
///
/// Timestamps are assumed unique within a series; the model does not
/// disambiguate duplicates (lookups resolve to the first match).
pub type PointId = i64;

/// One candlestick. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl Point {
    pub fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { timestamp, open, high, low, close }
    }

    pub fn id(&self) -> PointId {
        self.timestamp.timestamp_millis()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }

    /// True when the candle's `[low, high]` band intersects the given price
    /// band (inclusive on both ends).
    pub fn intersects_price_band(&self, low: f64, high: f64) -> bool {
        self.high >= low && self.low <= high
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn point_at(millis: i64) -> Point {
        let timestamp = Utc.timestamp_millis_opt(millis).single().expect("timestamp");
        Point::new(timestamp, 100.0, 105.0, 95.0, 102.0)
    }

    #[test]
    fn id_is_millisecond_timestamp() {
        assert_eq!(point_at(1_672_531_200_000).id(), 1_672_531_200_000);
    }

    #[test]
    fn price_band_intersection_is_inclusive() {
        let point = point_at(0);
        assert!(point.intersects_price_band(105.0, 110.0));
        assert!(point.intersects_price_band(90.0, 95.0));
        assert!(point.intersects_price_band(98.0, 99.0));
        assert!(!point.intersects_price_band(105.1, 110.0));
        assert!(!point.intersects_price_band(80.0, 94.9));
    }
}
