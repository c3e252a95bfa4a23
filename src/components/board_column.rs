//! Board Column Component

use leptos::prelude::*;
use leptos_dragdrop::*;
use route_board_core::{Route, RouteId, Status};

use super::RouteCard;
use crate::store::{use_board_store, BoardStateStoreFields};

/// One status column; a drop target for cards from other columns
#[component]
pub fn BoardColumn(status: Status, dnd: DndSignals, on_toggle: Callback<RouteId>) -> impl IntoView {
    let store = use_board_store();
    let key = status.as_str();

    let cards = move || store.board().read().snapshot().column(status).to_vec();
    let count = move || store.board().read().snapshot().column(status).len();

    // Highlighted when hovered directly or through one of its cards
    let is_target = move || match dnd.drop_target_read.get() {
        Some(DropTarget::Container(k)) => k == key,
        Some(DropTarget::Card(id)) => store.board().read().snapshot().find(status, RouteId(id)).is_some(),
        None => false,
    };

    view! {
        <div
            class=move || if is_target() { "board-column drop-target" } else { "board-column" }
            data-status=key
            on:mouseenter=make_on_container_mouseenter(dnd, key)
            on:mouseleave=make_on_container_mouseleave(dnd)
        >
            <h4 class="board-column-title">{move || format!("{} ({})", status.title(), count())}</h4>
            <div class="board-column-cards">
                <For
                    each=cards
                    key=|route: &Route| route.id
                    children=move |route: Route| view! {
                        <RouteCard route=route column=key dnd=dnd on_toggle=on_toggle />
                    }
                />
            </div>
        </div>
    }
}
