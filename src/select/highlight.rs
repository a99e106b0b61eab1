// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use crate::model::{PointId, Series};

use super::set::SelectionSet;

/// One entry in the selection summary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl PanelEntry {
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Display lines for the panel, two-decimal prices.
    pub fn lines(&self) -> [String; 5] {
        [
            format!("Date: {}", self.date),
            format!("Open: ${:.2}", self.open),
            format!("High: ${:.2}", self.high),
            format!("Low: ${:.2}", self.low),
            format!("Close: ${:.2}", self.close),
        ]
    }
}

/// Derived highlight state: a pure function of the selection set and the
/// series, recomputed synchronously after every mutation so it can never
/// drift from the set it mirrors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightState {
    highlighted: HashSet<PointId>,
    panel: Vec<PanelEntry>,
}

impl HighlightState {
    /// Full recompute: resets membership, re-applies it for exactly the
    /// selected ids, and rebuilds the panel in ascending timestamp order.
    ///
    /// Selected ids with no backing point (stale selections from earlier
    /// data) are self-healed: silently dropped from both the panel and the
    /// selection set.
    pub fn synchronize(selection: &mut SelectionSet, series: &Series) -> Self {
        let mut highlighted = HashSet::with_capacity(selection.len());
        let mut panel = Vec::with_capacity(selection.len());

        for id in selection.values() {
            match series.point_by_id(id) {
                Some(point) => {
                    highlighted.insert(id);
                    panel.push(PanelEntry {
                        date: point.timestamp().format("%Y-%m-%d").to_string(),
                        open: point.open(),
                        high: point.high(),
                        low: point.low(),
                        close: point.close(),
                    });
                }
                None => selection.remove(id),
            }
        }

        Self { highlighted, panel }
    }

    pub fn is_highlighted(&self, id: PointId) -> bool {
        self.highlighted.contains(&id)
    }

    pub fn panel(&self) -> &[PanelEntry] {
        &self.panel
    }

    pub fn len(&self) -> usize {
        self.highlighted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlighted.is_empty()
    }
}
