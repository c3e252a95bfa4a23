//! Route Card Component
//!
//! One route on the board: draggable, click to select.

use leptos::prelude::*;
use leptos_dragdrop::*;
use route_board_core::{Route, RouteId};

use crate::store::{use_board_store, BoardStateStoreFields};

#[component]
pub fn RouteCard(
    route: Route,
    /// Key of the column the card sits in
    column: &'static str,
    dnd: DndSignals,
    on_toggle: Callback<RouteId>,
) -> impl IntoView {
    let store = use_board_store();
    let id = route.id;

    let is_selected = move || store.selection().read().contains(&id);
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id.0);
    let is_drop_target = move || dnd.drop_target_read.get() == Some(DropTarget::Card(id.0));

    let on_click = move |_| {
        // Mouseup of a drag also fires click
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        on_toggle.run(id);
    };

    view! {
        <div
            class=move || {
                let mut class = "route-card".to_string();
                if is_selected() { class.push_str(" selected"); }
                if is_dragging() { class.push_str(" dragging"); }
                if is_drop_target() { class.push_str(" drop-target"); }
                class
            }
            tabindex="0"
            role="button"
            aria-pressed=move || is_selected().to_string()
            on:mousedown=make_on_mousedown(dnd, id.0)
            on:mouseenter=make_on_card_mouseenter(dnd, id.0)
            on:mouseleave=make_on_card_mouseleave(dnd, column)
            on:keydown=make_on_keydown(dnd, id.0, column)
            on:click=on_click
        >
            <strong class="route-card-title">{route.title()}</strong>
            <div class="route-card-line">"Vehicle: " {route.vehicle_label()}</div>
            <div class="route-card-line">"Stops: " {route.stop_count()}</div>
            <div class="route-card-line">"Dist: " {route.distance_label()}</div>
            <div class="route-card-line">"Dur: " {route.duration_label()}</div>
        </div>
    }
}
