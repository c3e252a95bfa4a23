//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use rolling_logger::LogBuffer;
use route_board_core::SelectionTracker;

use crate::api::ApiClient;
use crate::config::AppConfig;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload routes from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload routes from backend - write
    set_reload_trigger: WriteSignal<u32>,
    config: StoredValue<AppConfig>,
    api: StoredValue<Rc<ApiClient>, LocalStorage>,
    /// Selected cards; cleared whenever a route list is applied
    selection: StoredValue<SelectionTracker, LocalStorage>,
    log_buffer: StoredValue<Option<LogBuffer>>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        config: AppConfig,
        selection: SelectionTracker,
        log_buffer: Option<LogBuffer>,
    ) -> Self {
        let api = Rc::new(ApiClient::from_config(&config));
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            config: StoredValue::new(config),
            api: StoredValue::new_local(api),
            selection: StoredValue::new_local(selection),
            log_buffer: StoredValue::new(log_buffer),
        }
    }

    /// Trigger a reload of routes
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Reload unless the app has been unmounted
    pub fn try_reload(&self) -> bool {
        self.set_reload_trigger.try_update(|v| *v += 1).is_some()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn api(&self) -> Rc<ApiClient> {
        self.api.get_value()
    }

    pub fn selection(&self) -> StoredValue<SelectionTracker, LocalStorage> {
        self.selection
    }

    /// Last `n` log lines, oldest first
    pub fn recent_logs(&self, n: usize) -> Vec<String> {
        self.log_buffer
            .with_value(|buffer| buffer.as_ref().map(|b| b.recent(n)).unwrap_or_default())
    }
}
