//! Drag-Transition Engine
//!
//! Turns one drag gesture into either a column transition or nothing. Drop
//! targets are plain values, so the engine knows nothing about the DOM or the
//! DnD library feeding it.

use tracing::debug;

use crate::board::BoardSnapshot;
use crate::error::{BoardError, Result};
use crate::route::{RouteId, Status};

/// What the pointer (or keyboard cursor) was over when the gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Empty space of a column
    Column(Status),
    /// Another card; resolves to the column owning it
    Card(RouteId),
}

/// End-of-gesture event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub active: RouteId,
    pub source_column: Status,
    pub over: Option<DropTarget>,
}

/// A drop target resolved to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDrop {
    pub column: Status,
    pub is_same_column: bool,
}

/// Resolve where a gesture landed.
///
/// `None` when nothing was under the pointer or the card under it is not on
/// the board.
pub fn resolve_drop_target(event: &DragEnd, board: &BoardSnapshot) -> Option<ResolvedDrop> {
    let column = match event.over? {
        DropTarget::Column(status) => status,
        DropTarget::Card(card) => board.locate(card)?,
    };
    Some(ResolvedDrop {
        column,
        is_same_column: column == event.source_column,
    })
}

/// Request to move a route between columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub route_id: RouteId,
    pub from: Status,
    pub to: Status,
}

/// Gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging { route_id: RouteId, source_column: Status },
}

/// How a gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released with no gesture in progress
    NoGesture,
    DroppedOutside,
    /// Back into the source column; reordering is not supported
    SameColumn,
    Transition(TransitionRequest),
}

/// One-gesture-at-a-time drag state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragEngine {
    state: GestureState,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Idle → Dragging. Records the column owning the card right now.
    pub fn grab(&mut self, route_id: RouteId, board: &BoardSnapshot) -> Result<Status> {
        let source_column = board.locate(route_id).ok_or(BoardError::NotOnBoard { route: route_id })?;
        if let GestureState::Dragging { route_id: stale, .. } = self.state {
            debug!(stale = %stale, "replacing unfinished gesture");
        }
        debug!(route = %route_id, column = %source_column, "grab");
        self.state = GestureState::Dragging { route_id, source_column };
        Ok(source_column)
    }

    /// Dragging → Idle, deciding what the drop means
    pub fn release(&mut self, over: Option<DropTarget>, board: &BoardSnapshot) -> DropOutcome {
        let GestureState::Dragging { route_id, source_column } = std::mem::take(&mut self.state) else {
            return DropOutcome::NoGesture;
        };
        let event = DragEnd {
            active: route_id,
            source_column,
            over,
        };
        let outcome = match resolve_drop_target(&event, board) {
            None => DropOutcome::DroppedOutside,
            Some(drop) if drop.is_same_column => DropOutcome::SameColumn,
            Some(drop) => DropOutcome::Transition(TransitionRequest {
                route_id,
                from: source_column,
                to: drop.column,
            }),
        };
        debug!(route = %route_id, ?outcome, "drop");
        outcome
    }

    /// Abandon the gesture without a transition
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}
