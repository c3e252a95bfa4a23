//! Leptos DragDrop Utilities
//!
//! Card-between-containers drag-and-drop for Leptos using mouse events, with
//! a keyboard equivalent. Uses a movement threshold to distinguish click from
//! drag.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Over another card
    Card(u32),
    /// Over a container's empty space
    Container(&'static str),
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Containers in keyboard navigation order
    pub containers: &'static [&'static str],
    on_start: Callback<u32>,
    on_end: Callback<(u32, Option<DropTarget>)>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Create DnD state.
///
/// `on_start` fires once a press turns into a drag (or on a keyboard grab).
/// `on_end` fires when that drag ends, with `None` when released over nothing
/// or cancelled.
pub fn create_dnd_signals(
    containers: &'static [&'static str],
    on_start: Callback<u32>,
    on_end: Callback<(u32, Option<DropTarget>)>,
) -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        containers,
        on_start,
        on_end,
    }
}

fn begin_drag(dnd: &DndSignals, item_id: u32) {
    dnd.dragging_id_write.set(Some(item_id));
    dnd.on_start.run(item_id);
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    // Swallow the click that follows mouseup
    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

fn finish_drag(dnd: &DndSignals, item_id: u32, target: Option<DropTarget>) {
    end_drag(dnd);
    dnd.on_end.run((item_id, target));
}

/// Container `delta` steps away from `current`, clamped to the ends
pub fn step_container(
    containers: &'static [&'static str],
    current: &str,
    delta: i32,
) -> Option<&'static str> {
    let idx = containers.iter().position(|c| *c == current)? as i32;
    let last = containers.len() as i32 - 1;
    let next = (idx + delta).clamp(0, last);
    containers.get(next as usize).copied()
}

/// Create mousedown handler for draggable cards
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(item_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Keyboard gesture for a focused card.
///
/// Space/Enter grabs the card (target = its own container), arrows move the
/// target between containers, Space/Enter drops and Escape cancels.
pub fn make_on_keydown(dnd: DndSignals, item_id: u32, home: &'static str) -> impl Fn(web_sys::KeyboardEvent) + Copy + 'static {
    move |ev: web_sys::KeyboardEvent| {
        let dragging = dnd.dragging_id_read.get_untracked();
        let key = ev.key();
        match (dragging, key.as_str()) {
            (None, " " | "Enter") => {
                ev.prevent_default();
                begin_drag(&dnd, item_id);
                dnd.drop_target_write.set(Some(DropTarget::Container(home)));
            }
            (Some(id), " " | "Enter") if id == item_id => {
                ev.prevent_default();
                let target = dnd.drop_target_read.get_untracked();
                finish_drag(&dnd, item_id, target);
            }
            (Some(id), "ArrowLeft" | "ArrowRight") if id == item_id => {
                ev.prevent_default();
                let delta = if key == "ArrowLeft" { -1 } else { 1 };
                let current = match dnd.drop_target_read.get_untracked() {
                    Some(DropTarget::Container(c)) => c,
                    _ => home,
                };
                if let Some(next) = step_container(dnd.containers, current, delta) {
                    dnd.drop_target_write.set(Some(DropTarget::Container(next)));
                }
            }
            (Some(id), "Escape") if id == item_id => {
                ev.prevent_default();
                finish_drag(&dnd, item_id, None);
            }
            _ => {}
        }
    }
}

/// Window mousemove handler - starts drag if moved enough.
///
/// Removed when the calling owner is cleaned up.
pub fn bind_global_mousemove(dnd: DndSignals) {
    let handle = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        if let (Some(item_id), None) = (pending, dnd.dragging_id_read.get_untracked()) {
            let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
            let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();

            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                begin_drag(&dnd, item_id);
            }
        }
    });
    on_cleanup(move || handle.remove());
}

/// Create mouseenter handler for cards
pub fn make_on_card_mouseenter(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != item_id {
                dnd.drop_target_write.set(Some(DropTarget::Card(item_id)));
            }
        }
    }
}

/// Leaving a card puts the pointer back over its container
pub fn make_on_card_mouseleave(dnd: DndSignals, container: &'static str) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Container(container)));
        }
    }
}

/// Create mouseenter handler for containers
pub fn make_on_container_mouseenter(dnd: DndSignals, container: &'static str) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Container(container)));
        }
    }
}

/// Create mouseleave handler for containers
pub fn make_on_container_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// Removed when the calling owner is cleaned up, so a remounted board does
/// not stack listeners.
pub fn bind_global_mouseup(dnd: DndSignals) {
    let handle = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        // Clear pending state first
        dnd.pending_id_write.set(None);

        match dragging_id {
            Some(dragged) => finish_drag(&dnd, dragged, drop_target),
            // Not dragging - click event will fire naturally on the element
            None => {
                dnd.drop_target_write.set(None);
            }
        }
    });
    on_cleanup(move || handle.remove());

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLUMNS: [&str; 3] = ["A", "B", "C"];

    #[test]
    fn test_step_container_moves_and_clamps() {
        assert_eq!(step_container(&COLUMNS, "A", 1), Some("B"));
        assert_eq!(step_container(&COLUMNS, "B", -1), Some("A"));
        assert_eq!(step_container(&COLUMNS, "A", -1), Some("A"));
        assert_eq!(step_container(&COLUMNS, "C", 1), Some("C"));
    }

    #[test]
    fn test_step_container_unknown_current() {
        assert_eq!(step_container(&COLUMNS, "Z", 1), None);
    }
}
