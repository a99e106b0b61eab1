// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Synthetic demo series, one candle per day ending today.

use chrono::{DateTime, Days, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::point::Point;
use super::series::Series;

const BASE_PRICE: f64 = 1000.0;
const VOLATILITY: f64 = 0.02;

/// Random walk demo data for `--demo` mode.
pub fn demo_series(days: u64) -> Series {
    demo_series_with_rng(days, Utc::now(), &mut rand::rng())
}

/// Seedable variant so tests and benches get a stable series.
pub fn demo_series_seeded(days: u64, end: DateTime<Utc>, seed: u64) -> Series {
    demo_series_with_rng(days, end, &mut StdRng::seed_from_u64(seed))
}

fn demo_series_with_rng(days: u64, end: DateTime<Utc>, rng: &mut impl Rng) -> Series {
    let today = midnight(end);
    let mut points = Vec::with_capacity(days as usize);

    for i in 0..days {
        let open = BASE_PRICE * (1.0 + (rng.random::<f64>() - 0.5) * VOLATILITY);
        let high = open * (1.0 + rng.random::<f64>() * VOLATILITY);
        let low = open * (1.0 - rng.random::<f64>() * VOLATILITY);
        let close = (high + low) / 2.0 + (rng.random::<f64>() - 0.5) * (high - low);

        let timestamp = today.checked_sub_days(Days::new(i)).unwrap_or(today);
        points.push(Point::new(
            timestamp,
            round2(open),
            round2(high),
            round2(low),
            round2(close),
        ));
    }

    points.reverse();
    Series::new(points)
}

fn midnight(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()).unwrap_or(at)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 15, 13, 37, 0).single().expect("timestamp")
    }

    #[test]
    fn generates_requested_number_of_days() {
        let series = demo_series_seeded(100, end(), 7);
        assert_eq!(series.len(), 100);
    }

    #[test]
    fn timestamps_are_strictly_ascending_midnights() {
        let series = demo_series_seeded(30, end(), 7);
        for window in series.points().windows(2) {
            assert!(window[0].timestamp() < window[1].timestamp());
        }
        for point in series.points() {
            assert_eq!(point.timestamp(), midnight(point.timestamp()));
        }
        assert_eq!(series.last_timestamp(), Some(midnight(end())));
    }

    #[test]
    fn candles_keep_low_at_or_below_high() {
        let series = demo_series_seeded(200, end(), 42);
        for point in series.points() {
            assert!(point.low() <= point.high());
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        assert_eq!(demo_series_seeded(50, end(), 3), demo_series_seeded(50, end(), 3));
    }
}
