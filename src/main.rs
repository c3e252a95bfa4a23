//! Route Board Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod notice;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::from_window() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let log_buffer = match rolling_logger::init_logger(&config.log_level, config.log_buffer_capacity) {
        Ok(buffer) => Some(buffer),
        Err(err) => {
            web_sys::console::warn_1(&err.to_string().into());
            None
        }
    };
    if let Some(err) = config_error {
        tracing::warn!(%err, "using default config");
    }

    mount_to_body(move || view! { <App config=config log_buffer=log_buffer /> });
}
