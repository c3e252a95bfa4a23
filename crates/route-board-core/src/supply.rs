//! Route Supply
//!
//! What the fetch pipeline hands the board on every change, and how the board
//! reacts to it.

use tracing::{info, warn};

use crate::board::{BoardStore, RebuildReport};
use crate::route::Route;
use crate::selection::SelectionTracker;

/// One observation of the upstream route list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSupply {
    pub routes: Vec<Route>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl RouteSupply {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    pub fn loaded(routes: Vec<Route>) -> Self {
        Self {
            routes,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// What the board area shows. Loading and Failed replace the columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BoardPhase {
    #[default]
    Loading,
    Failed(String),
    Ready(RebuildReport),
}

impl BoardStore {
    /// Fold a supply observation into the board.
    ///
    /// Priority is loading, then error, then rebuild. An error empties the
    /// board rather than keeping the last good snapshot.
    pub fn apply_supply(&mut self, supply: &RouteSupply) -> BoardPhase {
        if supply.is_loading {
            return BoardPhase::Loading;
        }
        if let Some(error) = &supply.error {
            warn!(%error, "route supply failed, clearing board");
            self.reset();
            return BoardPhase::Failed(error.clone());
        }
        let report = self.rebuild(&supply.routes);
        info!(
            routes = supply.routes.len(),
            placed = report.placed,
            skipped = report.skipped.len(),
            "board rebuilt from route supply"
        );
        BoardPhase::Ready(report)
    }

    /// `apply_supply`, also dropping the selection whenever the route set is
    /// replaced. Both a rebuild and an error replace it; loading does not.
    pub fn apply_supply_with_selection(
        &mut self,
        supply: &RouteSupply,
        selection: &mut SelectionTracker,
    ) -> BoardPhase {
        let phase = self.apply_supply(supply);
        if phase != BoardPhase::Loading {
            selection.clear();
        }
        phase
    }
}
