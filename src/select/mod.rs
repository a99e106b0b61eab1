// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The selection engine: modifier-gated gesture tracking, the authoritative
//! selected-point set, highlight synchronization, and the persistence seam.
//!
//! Everything in this module is rendering-agnostic. The chart collaborator
//! supplies a [`PixelMapper`] for cell-to-domain conversion and executes the
//! [`GestureSignal`]s the tracker emits; the engine owns all selection state.

mod coords;
mod engine;
mod gesture;
mod highlight;
mod set;
mod sink;

pub use coords::{PixelMapper, PixelPoint, PixelRect};
pub use engine::SelectionEngine;
pub use gesture::{GestureSignal, GestureState, GestureTracker, Signals};
pub use highlight::{HighlightState, PanelEntry};
pub use set::SelectionSet;
pub use sink::{take_outcome, HttpSink, SaveOutcome, SelectionSink, SharedSaveOutcome};
