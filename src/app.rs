//! Route Board App
//!
//! Owns the route fetch pipeline and mounts the board.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use rolling_logger::LogBuffer;
use route_board_core::{RouteId, RouteSupply, SelectionTracker};
use tracing::{error, info};

use crate::components::RouteBoard;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{store_apply_supply, store_is_ready, BoardState, BoardStateStoreFields};

#[component]
pub fn App(config: AppConfig, log_buffer: Option<LogBuffer>) -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (selected, set_selected) = signal(Vec::<RouteId>::new());
    let refresh_ms = config.refresh_interval_ms();

    let store = Store::new(BoardState::default());
    provide_context(store);
    let selection = SelectionTracker::with_observer(move |ids: &[RouteId]| {
        info!(count = ids.len(), "selection changed");
        store.selection().try_set(ids.to_vec());
        set_selected.try_set(ids.to_vec());
    });
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), config, selection, log_buffer);
    provide_context(ctx);

    // Load routes on mount and on every reload
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        // Refreshes of a visible board rebuild in place
        if !store_is_ready(&store) {
            store_apply_supply(&store, ctx.selection(), &RouteSupply::loading());
        }
        info!(trigger, "loading routes");
        spawn_local(async move {
            let api = ctx.api();
            let filter = ctx.config().route_filter;
            let supply = match api.list_routes(&filter).await {
                Ok(routes) => {
                    info!(count = routes.len(), "routes loaded");
                    RouteSupply::loaded(routes)
                }
                Err(err) => {
                    error!(%err, "failed to load routes");
                    RouteSupply::failed(format!("Failed to load route data for the board: {}", err))
                }
            };
            store_apply_supply(&store, ctx.selection(), &supply);
        });
    });

    if let Some(ms) = refresh_ms {
        let alive = Arc::new(AtomicBool::new(true));
        let stop = alive.clone();
        on_cleanup(move || stop.store(false, Ordering::Relaxed));
        spawn_local(async move {
            loop {
                TimeoutFuture::new(ms).await;
                if !alive.load(Ordering::Relaxed) || !ctx.try_reload() {
                    break;
                }
            }
        });
    }

    view! {
        <main class="app-layout">
            <h1>"Route Status Kanban"</h1>
            <RouteBoard />
            <p class="selection-summary">
                {move || {
                    let ids = selected.get();
                    if ids.is_empty() {
                        "No routes selected".to_string()
                    } else {
                        let list: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                        format!("Selected routes: {}", list.join(", "))
                    }
                }}
            </p>
        </main>
    }
}
