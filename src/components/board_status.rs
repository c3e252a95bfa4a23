//! Board Status Views
//!
//! What replaces the columns while loading or after a failed fetch.

use leptos::prelude::*;

use crate::context::AppContext;

/// Recent log lines shown under a fetch error
const LOG_TAIL: usize = 8;

#[component]
pub fn BoardLoading() -> impl IntoView {
    view! { <p class="board-loading">"Loading route board..."</p> }
}

#[component]
pub fn BoardFailure(message: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let logs = ctx.recent_logs(LOG_TAIL);
    let log_view = (!logs.is_empty()).then(|| {
        view! {
            <details class="board-error-log">
                <summary>"Recent log"</summary>
                <pre>{logs.join("\n")}</pre>
            </details>
        }
    });

    view! {
        <div class="board-error">
            <p class="board-error-message">{message}</p>
            <button on:click=move |_| ctx.reload()>"Retry"</button>
            {log_view}
        </div>
    }
}
