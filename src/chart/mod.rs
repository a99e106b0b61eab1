// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The chart collaborator: a terminal candlestick renderer with linear
//! time/price scales. The selection engine talks to it only through
//! [`crate::select::PixelMapper`] and the highlight state.

mod render;
mod viewport;

pub use render::{candle_lines, panel_lines};
pub use viewport::ChartViewport;
