//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use route_board_core::{BoardPhase, BoardStore, RouteId, RouteSupply, SelectionTracker};
use tracing::debug;

/// Board state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Single writer of the column snapshot
    pub board: BoardStore,
    /// Loading / failed / ready
    pub phase: BoardPhase,
    /// Mirror of the selection tracker, ascending
    pub selection: Vec<RouteId>,
    /// Status updates sent and not yet answered
    pub pending_updates: u32,
}

/// Type alias for the store
pub type BoardStateStore = Store<BoardState>;

/// Get the board store from context
pub fn use_board_store() -> BoardStateStore {
    expect_context::<BoardStateStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Feed one observation of the fetch pipeline into the board.
///
/// The board is updated on a copy so the selection observer can write the
/// store while the selection is cleared.
pub fn store_apply_supply(
    store: &BoardStateStore,
    selection: StoredValue<SelectionTracker, LocalStorage>,
    supply: &RouteSupply,
) {
    let Some(mut board) = store.board().try_get_untracked() else {
        return;
    };
    let Some(phase) =
        selection.try_update_value(|s| board.apply_supply_with_selection(supply, s))
    else {
        return;
    };
    debug!(?phase, "board phase");
    store.board().try_set(board);
    store.phase().try_set(phase);
}

/// Whether the columns are on screen
pub fn store_is_ready(store: &BoardStateStore) -> bool {
    matches!(*store.phase().read_untracked(), BoardPhase::Ready(_))
}

pub fn store_update_started(store: &BoardStateStore) {
    store.pending_updates().update(|n| *n += 1);
}

/// Safe after the board is torn down
pub fn store_update_finished(store: &BoardStateStore) {
    store.pending_updates().try_update(|n| *n = n.saturating_sub(1));
}
