// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Larissa — candlestick chart TUI with a modifier-gated selection engine.
//!
//! The `select` module is the core; everything else is either the chart
//! collaborator (`chart`, `tui`) or the persistence side (`server`, `store`).

pub mod chart;
pub mod format;
pub mod model;
pub mod select;
pub mod server;
pub mod store;
pub mod tui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
