// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crate::format::SelectionRecord;
use crate::model::{PointId, Series};

use super::coords::{PixelMapper, PixelRect};
use super::gesture::{GestureTracker, Signals};
use super::highlight::HighlightState;
use super::set::SelectionSet;
use super::sink::SelectionSink;

/// The selection engine: owns the gesture tracker, the selection set, and
/// the derived highlight state; holds the series read-only.
///
/// Every mutation resynchronizes the highlight state before returning, so
/// callers always observe highlights at least as current as the mutation
/// that triggered them.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    series: Arc<Series>,
    selection: SelectionSet,
    tracker: GestureTracker,
    highlight: HighlightState,
}

impl SelectionEngine {
    pub fn new(series: Arc<Series>) -> Self {
        let mut selection = SelectionSet::new();
        let highlight = HighlightState::synchronize(&mut selection, &series);
        Self { series, selection, tracker: GestureTracker::new(), highlight }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn series_handle(&self) -> Arc<Series> {
        self.series.clone()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    // Gesture transitions, delegated so the caller cannot bypass the
    // tracker's named methods.

    pub fn modifier_pressed(&mut self) -> Signals {
        self.tracker.modifier_pressed()
    }

    pub fn modifier_released(&mut self) -> Signals {
        self.tracker.modifier_released()
    }

    pub fn focus_lost(&mut self) -> Signals {
        self.tracker.focus_lost()
    }

    pub fn pointer_down(&mut self, position: super::coords::PixelPoint) -> Signals {
        self.tracker.pointer_down(position)
    }

    pub fn pointer_moved(&mut self, position: super::coords::PixelPoint) -> Signals {
        self.tracker.pointer_moved(position)
    }

    pub fn pointer_up(&mut self, position: super::coords::PixelPoint) -> Signals {
        self.tracker.pointer_up(position)
    }

    /// Toggles one point's membership (the armed-click path).
    pub fn toggle_point(&mut self, id: PointId) {
        self.selection.toggle(id);
        self.resync();
    }

    /// Commits a drag rectangle: converts its horizontal span to a time
    /// range and vertical span to a price band via the mapper, then
    /// bulk-adds every intersecting point. A drag never deselects, and a
    /// zero-area rectangle selects nothing.
    pub fn commit_region(&mut self, rect: PixelRect, mapper: &dyn PixelMapper) {
        if rect.is_zero_area() {
            self.resync();
            return;
        }

        let start = mapper.time_at(rect.left);
        let end = mapper.time_at(rect.right());
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let top_price = mapper.price_at(rect.top);
        let bottom_price = mapper.price_at(rect.bottom());
        let (price_low, price_high) = if top_price <= bottom_price {
            (top_price, bottom_price)
        } else {
            (bottom_price, top_price)
        };

        let ids = self.series.ids_in_region(start, end, price_low, price_high);
        self.selection.add_range(ids);
        self.resync();
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.resync();
    }

    /// Joins the selection back against the series into ascending records.
    /// Stale ids cannot occur here: the selection is resynchronized after
    /// every mutation.
    pub fn materialize_selection(&self) -> Vec<SelectionRecord> {
        self.selection
            .values()
            .into_iter()
            .filter_map(|id| self.series.point_by_id(id))
            .map(SelectionRecord::from_point)
            .collect()
    }

    /// Materializes the selection and submits it to the sink, returning the
    /// records to the caller. The outcome arrives asynchronously through the
    /// sink's own channel; failure never rolls the selection back.
    pub fn save_selection(&self, sink: &dyn SelectionSink) -> Vec<SelectionRecord> {
        let records = self.materialize_selection();
        sink.submit(records.clone());
        records
    }

    fn resync(&mut self) {
        self.highlight = HighlightState::synchronize(&mut self.selection, &self.series);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{DateTime, TimeZone, Utc};

    use crate::model::Point;
    use crate::select::coords::PixelPoint;
    use crate::select::gesture::GestureSignal;

    use super::*;

    /// Linear test mapper: column 0 is `start`, one day per column; row 0 is
    /// `price_top`, one dollar per row downwards.
    struct GridMapper {
        start: DateTime<Utc>,
        price_top: f64,
    }

    impl PixelMapper for GridMapper {
        fn time_at(&self, x: u16) -> DateTime<Utc> {
            self.start + chrono::Duration::days(i64::from(x))
        }

        fn price_at(&self, y: u16) -> f64 {
            self.price_top - f64::from(y)
        }
    }

    struct RecordingSink {
        submitted: RefCell<Vec<Vec<SelectionRecord>>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self { submitted: RefCell::new(Vec::new()) }
        }
    }

    impl SelectionSink for RecordingSink {
        fn submit(&self, records: Vec<SelectionRecord>) {
            self.submitted.borrow_mut().push(records);
        }
    }

    fn day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).single().expect("timestamp")
    }

    fn engine() -> SelectionEngine {
        // T1 trades around 100, T2 around 105, T3 around 110.
        let series = Series::new(vec![
            Point::new(day(1), 100.0, 102.0, 98.0, 101.0),
            Point::new(day(2), 105.0, 107.0, 103.0, 106.0),
            Point::new(day(3), 110.0, 112.0, 108.0, 111.0),
        ]);
        SelectionEngine::new(Arc::new(series))
    }

    #[test]
    fn drag_selects_points_in_time_and_price_intersection() {
        let mut engine = engine();
        let t1 = engine.series().points()[0].id();
        let mapper = GridMapper { start: day(1), price_top: 120.0 };

        // Columns 0..=1 cover [T1, T2]; rows 18..=22 cover prices [98, 102],
        // which intersects only T1's band.
        let rect = PixelRect { left: 0, top: 18, width: 1, height: 4 };
        engine.commit_region(rect, &mapper);

        assert_eq!(engine.selection().values(), vec![t1]);
        assert!(engine.highlight().is_highlighted(t1));
    }

    #[test]
    fn drag_only_adds_to_existing_selection() {
        let mut engine = engine();
        let t1 = engine.series().points()[0].id();
        let t3 = engine.series().points()[2].id();
        engine.toggle_point(t3);

        let mapper = GridMapper { start: day(1), price_top: 120.0 };
        let rect = PixelRect { left: 0, top: 18, width: 1, height: 4 };
        engine.commit_region(rect, &mapper);

        assert_eq!(engine.selection().values(), vec![t1, t3]);
    }

    #[test]
    fn zero_area_rectangle_selects_nothing() {
        let mut engine = engine();
        let mapper = GridMapper { start: day(1), price_top: 120.0 };

        engine.commit_region(PixelRect { left: 0, top: 0, width: 0, height: 40 }, &mapper);
        engine.commit_region(PixelRect { left: 0, top: 20, width: 2, height: 0 }, &mapper);

        assert!(engine.selection().is_empty());
    }

    #[test]
    fn armed_click_toggles_membership_both_ways() {
        // Series = [{2023-01-01,...}, {2023-01-02,...}]; click point 1 while
        // armed selects it, clicking again deselects it.
        let mut engine = engine();
        let t1 = engine.series().points()[0].id();

        engine.modifier_pressed();
        engine.toggle_point(t1);
        assert_eq!(engine.selection().values(), vec![t1]);
        assert!(engine.highlight().is_highlighted(t1));

        engine.toggle_point(t1);
        assert!(engine.selection().is_empty());
        assert!(engine.highlight().is_empty());
    }

    #[test]
    fn cancelled_drag_leaves_selection_unchanged_and_pan_restored() {
        let mut engine = engine();
        engine.modifier_pressed();
        engine.pointer_down(PixelPoint::new(0, 0));
        engine.pointer_moved(PixelPoint::new(3, 20));

        let signals = engine.modifier_released();
        assert!(signals.contains(&GestureSignal::CursorRestored));
        assert!(engine.selection().is_empty());
        assert!(engine.tracker().native_pan_enabled());
    }

    #[test]
    fn save_materializes_ascending_records_and_submits_them() {
        let series = Series::new(vec![Point::new(day(2), 10.0, 12.0, 9.0, 11.0)]);
        let mut engine = SelectionEngine::new(Arc::new(series));
        let id = engine.series().points()[0].id();
        engine.toggle_point(id);

        let sink = RecordingSink::new();
        let records = engine.save_selection(&sink);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2023-01-02");
        assert_eq!(
            (records[0].open, records[0].high, records[0].low, records[0].close),
            (10.0, 12.0, 9.0, 11.0),
        );
        assert_eq!(sink.submitted.borrow().as_slice(), &[records.clone()]);

        // A failed save never rolls the selection back; the set is whatever
        // the user left it as.
        assert_eq!(engine.selection().values(), vec![id]);
    }

    #[test]
    fn clear_resets_selection_and_panel() {
        let mut engine = engine();
        let t1 = engine.series().points()[0].id();
        engine.toggle_point(t1);
        assert_eq!(engine.highlight().panel().len(), 1);

        engine.clear();
        assert!(engine.selection().is_empty());
        assert!(engine.highlight().panel().is_empty());

        engine.clear();
        assert!(engine.selection().is_empty());
        assert!(engine.highlight().panel().is_empty());
    }
}
