//! Failure Notices
//!
//! One-shot blocking alerts for failed status updates.

use route_board_core::RemoteUpdateFailure;
use tracing::warn;

pub fn show_failure_notice(failure: &RemoteUpdateFailure) {
    let Some(window) = web_sys::window() else {
        warn!("no window to show failure notice on");
        return;
    };
    if let Err(err) = window.alert_with_message(&failure.notice()) {
        warn!(?err, "could not show failure notice");
    }
}
