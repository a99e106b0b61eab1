// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::coords::{PixelPoint, PixelRect};

/// Where the gesture currently is. `Idle` is the single source of truth for
/// "native pan enabled": whenever the tracker is idle the chart surface must
/// be back in its default interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    ModifierArmed,
    Dragging { origin: PixelPoint, current: PixelPoint },
}

/// Side effects the caller must execute after a transition. The tracker
/// itself never touches the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSignal {
    /// Show the crosshair affordance and suspend native pan.
    CursorArmed,
    /// Restore the default cursor and native pan.
    CursorRestored,
    /// Create or resize the drag overlay rectangle.
    OverlayChanged(PixelRect),
    /// Remove the drag overlay rectangle.
    OverlayRemoved,
    /// Run the region intersection scan and bulk-add matches.
    CommitRegion(PixelRect),
    /// Resolve the cell to a point and toggle its membership.
    ClickAt(PixelPoint),
}

pub type Signals = SmallVec<[GestureSignal; 2]>;

/// The gesture state machine. Transitions happen only through the named
/// methods below; each returns the signals the surface must execute, in
/// order. Trackers are plain values, so multiple independent instances can
/// coexist without any global listener state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureTracker {
    state: GestureState,
}

impl Default for GestureState {
    fn default() -> Self {
        Self::Idle
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Native pan is enabled exactly when no gesture is active.
    pub fn native_pan_enabled(&self) -> bool {
        self.is_idle()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Modifier key pressed. Repeat presses while already armed or dragging
    /// are absorbed without signals.
    pub fn modifier_pressed(&mut self) -> Signals {
        match self.state {
            GestureState::Idle => {
                self.state = GestureState::ModifierArmed;
                Signals::from_slice(&[GestureSignal::CursorArmed])
            }
            GestureState::ModifierArmed | GestureState::Dragging { .. } => Signals::new(),
        }
    }

    /// Modifier key released. Cancels any in-progress drag unconditionally;
    /// nothing is committed.
    pub fn modifier_released(&mut self) -> Signals {
        self.cancel()
    }

    /// Window focus lost. Same cancellation semantics as releasing the
    /// modifier key.
    pub fn focus_lost(&mut self) -> Signals {
        self.cancel()
    }

    pub fn pointer_down(&mut self, position: PixelPoint) -> Signals {
        match self.state {
            GestureState::ModifierArmed => {
                self.state = GestureState::Dragging { origin: position, current: position };
                Signals::from_slice(&[GestureSignal::OverlayChanged(PixelRect::bounding(
                    position, position,
                ))])
            }
            GestureState::Idle | GestureState::Dragging { .. } => Signals::new(),
        }
    }

    pub fn pointer_moved(&mut self, position: PixelPoint) -> Signals {
        match self.state {
            GestureState::Dragging { origin, .. } => {
                self.state = GestureState::Dragging { origin, current: position };
                Signals::from_slice(&[GestureSignal::OverlayChanged(PixelRect::bounding(
                    origin, position,
                ))])
            }
            GestureState::Idle | GestureState::ModifierArmed => Signals::new(),
        }
    }

    /// Pointer released. A release on the origin cell is the click path and
    /// toggles; any movement commits the bounding rectangle instead, even a
    /// degenerate one (its scan selects nothing), so a drag can only ever
    /// add to the selection.
    pub fn pointer_up(&mut self, position: PixelPoint) -> Signals {
        match self.state {
            GestureState::Dragging { origin, .. } => {
                self.state = GestureState::ModifierArmed;
                let outcome = if position == origin {
                    GestureSignal::ClickAt(position)
                } else {
                    GestureSignal::CommitRegion(PixelRect::bounding(origin, position))
                };
                Signals::from_slice(&[GestureSignal::OverlayRemoved, outcome])
            }
            GestureState::Idle | GestureState::ModifierArmed => Signals::new(),
        }
    }

    fn cancel(&mut self) -> Signals {
        match self.state {
            GestureState::Idle => Signals::new(),
            GestureState::ModifierArmed => {
                self.state = GestureState::Idle;
                Signals::from_slice(&[GestureSignal::CursorRestored])
            }
            GestureState::Dragging { .. } => {
                self.state = GestureState::Idle;
                Signals::from_slice(&[GestureSignal::OverlayRemoved, GestureSignal::CursorRestored])
            }
        }
    }
}
