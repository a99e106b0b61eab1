// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use crate::model::PointId;

/// The authoritative set of selected point ids.
///
/// Mutations never touch display state; callers resynchronize highlights
/// explicitly after every mutation. Every operation tolerates absent ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<PointId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: PointId) {
        self.ids.insert(id);
    }

    /// Removing an id that is not present is a no-op.
    pub fn remove(&mut self, id: PointId) {
        self.ids.remove(&id);
    }

    /// Inserts the id when absent, removes it when present.
    pub fn toggle(&mut self, id: PointId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Bulk insertion for drag commits; a drag never deselects.
    pub fn add_range(&mut self, ids: impl IntoIterator<Item = PointId>) {
        self.ids.extend(ids);
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending timestamp order, for deterministic display
    /// and export.
    pub fn values(&self) -> Vec<PointId> {
        let mut ids = self.ids.iter().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_applied_twice_restores_prior_state() {
        let mut set = SelectionSet::new();
        set.add(10);

        set.toggle(20);
        set.toggle(20);
        assert_eq!(set.values(), vec![10]);

        set.toggle(10);
        set.toggle(10);
        assert_eq!(set.values(), vec![10]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut set = SelectionSet::new();
        set.add_range([1, 2, 3]);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.values(), Vec::<i64>::new());

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.values(), Vec::<i64>::new());
    }

    #[test]
    fn remove_of_absent_id_is_a_no_op() {
        let mut set = SelectionSet::new();
        set.add(5);
        set.remove(99);
        assert_eq!(set.values(), vec![5]);
    }

    #[test]
    fn add_range_deduplicates_against_existing_selection() {
        let mut set = SelectionSet::new();
        set.add(2);
        set.add_range([1, 2, 3]);
        assert_eq!(set.values(), vec![1, 2, 3]);
    }

    #[test]
    fn values_are_ascending() {
        let mut set = SelectionSet::new();
        set.add_range([30, 10, 20]);
        assert_eq!(set.values(), vec![10, 20, 30]);
    }
}
