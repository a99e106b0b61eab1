// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Domain model: candlestick points and the ordered series the chart runs
//! against.

mod point;
mod series;

pub mod fixtures;

pub use fixtures::{demo_series, demo_series_seeded};
pub use point::{Point, PointId};
pub use series::Series;
