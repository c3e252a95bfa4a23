//! Route Status Board Core
//!
//! Toolkit-independent logic behind the route status board:
//! - route: route entity and status classification
//! - board: status columns and the single-writer board store
//! - selection: selected cards
//! - drag: drag gesture → transition request
//! - reconcile: optimistic update + remote confirmation
//! - supply: loading / error / rebuild from the fetch pipeline

mod board;
mod drag;
mod error;
mod reconcile;
mod route;
mod selection;
mod supply;

#[cfg(test)]
mod tests;

pub use board::{BoardSnapshot, BoardStore, RebuildReport, SkippedRoute};
pub use drag::{
    resolve_drop_target, DragEnd, DragEngine, DropOutcome, DropTarget, GestureState, ResolvedDrop,
    TransitionRequest,
};
pub use error::{BoardError, Result, UpdateError};
pub use reconcile::{ReconcileEvent, ReconciliationController, RemoteUpdateFailure, StatusUpdateApi};
pub use route::{Classification, Route, RouteId, RouteStop, Status, VehicleRef, COLUMN_KEYS};
pub use selection::SelectionTracker;
pub use supply::{BoardPhase, RouteSupply};

/// Re-exported so API implementations use the same macro version
pub use async_trait::async_trait;
