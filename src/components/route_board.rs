//! Route Board Component
//!
//! The six status columns with drag-and-drop between them. A drop onto a
//! different column moves the card at once and confirms the new status with
//! the backend in the background.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use route_board_core::{
    BoardPhase, DragEngine, DropOutcome, ReconcileEvent, ReconciliationController, RouteId, Status,
    COLUMN_KEYS,
};
use tracing::{debug, warn};

use crate::components::{BoardColumn, BoardFailure, BoardLoading};
use crate::context::AppContext;
use crate::notice::show_failure_notice;
use crate::store::{
    store_update_finished, store_update_started, use_board_store, BoardStateStore,
    BoardStateStoreFields,
};

/// Map a DnD target onto the board's drop target
fn board_target(target: DropTarget) -> Option<route_board_core::DropTarget> {
    match target {
        DropTarget::Card(id) => Some(route_board_core::DropTarget::Card(RouteId(id))),
        DropTarget::Container(key) => Status::classify(key)
            .known()
            .map(route_board_core::DropTarget::Column),
    }
}

fn on_reconciled(store: BoardStateStore, event: ReconcileEvent) {
    store_update_finished(&store);
    match event {
        ReconcileEvent::Confirmed(request) => debug!(route = %request.route_id, "board in sync"),
        ReconcileEvent::Failed(failure) => show_failure_notice(&failure),
    }
}

#[component]
pub fn RouteBoard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_board_store();
    let selection = ctx.selection();
    let engine = StoredValue::new(DragEngine::new());
    let controller = StoredValue::new_local(ReconciliationController::new(
        ctx.api(),
        |fut| spawn_local(fut),
        move |event| on_reconciled(store, event),
    ));

    let on_start = Callback::new(move |card: u32| {
        let board = store.board().read_untracked();
        let grabbed = engine.try_update_value(|e| e.grab(RouteId(card), board.snapshot()));
        if let Some(Err(err)) = grabbed {
            warn!(%err, "drag ignored");
        }
    });

    let on_end = Callback::new(move |(card, target): (u32, Option<DropTarget>)| {
        let over = target.and_then(board_target);
        let outcome = {
            let board = store.board().read_untracked();
            engine.try_update_value(|e| e.release(over, board.snapshot()))
        };
        debug!(card, ?outcome, "drag ended");
        let Some(DropOutcome::Transition(request)) = outcome else {
            return;
        };
        let accepted = controller.with_value(|c| c.submit(&mut store.board().write(), request));
        match accepted {
            Ok(()) => store_update_started(&store),
            Err(err) => warn!(%err, "transition rejected"),
        }
    });

    let dnd = create_dnd_signals(&COLUMN_KEYS, on_start, on_end);
    bind_global_mouseup(dnd);

    let on_toggle = Callback::new(move |id: RouteId| {
        selection.update_value(|s| {
            s.toggle(id);
        });
    });

    let selected_count = move || store.selection().read().len();
    let pending = move || store.pending_updates().get();

    view! {
        <section class="route-board">
            <header class="route-board-header">
                <h3>"Route Status Board"</h3>
                <Show when=move || { pending() > 0 }>
                    <span class="sync-indicator">{move || format!("Saving {} change(s)...", pending())}</span>
                </Show>
                <span class="selection-count">{move || format!("{} selected", selected_count())}</span>
                <button
                    disabled=move || selected_count() == 0
                    on:click=move |_| selection.update_value(|s| s.clear())
                >
                    "Clear selection"
                </button>
                <button on:click=move |_| ctx.reload()>"Refresh"</button>
            </header>
            {move || match store.phase().get() {
                BoardPhase::Loading => view! { <BoardLoading /> }.into_any(),
                BoardPhase::Failed(message) => view! { <BoardFailure message=message /> }.into_any(),
                BoardPhase::Ready(_) => view! {
                    <div class="board-columns">
                        {Status::ALL
                            .into_iter()
                            .map(|status| view! { <BoardColumn status=status dnd=dnd on_toggle=on_toggle /> })
                            .collect_view()}
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}
