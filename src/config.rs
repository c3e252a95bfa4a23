//! App Configuration
//!
//! Read once at startup from the `window.__ROUTE_BOARD_CONFIG__` object the
//! hosting page may define. Every field has a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JS global holding the page-provided config
const CONFIG_GLOBAL: &str = "__ROUTE_BOARD_CONFIG__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {CONFIG_GLOBAL}: {0}")]
    Invalid(String),
}

/// Server-side filters for the route list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteFilter {
    pub status: Option<String>,
    pub vehicle: Option<u32>,
    /// `YYYY-MM-DD`
    pub planned_date: Option<String>,
}

impl RouteFilter {
    /// Query string pairs for the filters that are set
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.to_uppercase()));
        }
        if let Some(vehicle) = self.vehicle {
            pairs.push(("vehicle", vehicle.to_string()));
        }
        if let Some(date) = &self.planned_date {
            pairs.push(("planned_date", date.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base of the REST API; relative values resolve against the page origin
    pub api_base_url: String,
    /// localStorage key of the session token
    pub auth_token_key: String,
    /// Poll the route list every N seconds; off when unset
    pub refresh_interval_secs: Option<u32>,
    pub log_level: String,
    pub log_buffer_capacity: usize,
    pub route_filter: RouteFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "/api".to_string(),
            auth_token_key: "authToken".to_string(),
            refresh_interval_secs: None,
            log_level: "info".to_string(),
            log_buffer_capacity: 200,
            route_filter: RouteFilter::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Config from the page global; defaults when the page defines none
    pub fn from_window() -> Result<Self, ConfigError> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };
        let value = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into())
            .map_err(|e| ConfigError::Invalid(format!("{:?}", e)))?;
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Absolute API base, without trailing slash
    pub fn api_base(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if base.starts_with('/') {
            format!("{}{}", page_origin(), base)
        } else {
            base.to_string()
        }
    }

    /// Session token saved by the login screen, if any
    pub fn auth_token(&self) -> Option<String> {
        web_sys::window()?
            .local_storage()
            .ok()??
            .get_item(&self.auth_token_key)
            .ok()?
            .filter(|token| !token.is_empty())
    }

    /// Polling period, ignoring a zero interval
    pub fn refresh_interval_ms(&self) -> Option<u32> {
        self.refresh_interval_secs
            .filter(|secs| *secs > 0)
            .map(|secs| secs.saturating_mul(1000))
    }
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.refresh_interval_ms(), None);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = AppConfig::from_json(
            r#"{"api_base_url": "https://fleet.example.com/api/", "refresh_interval_secs": 30,
                "route_filter": {"status": "in_transit", "vehicle": 4}}"#,
        )
        .unwrap();

        assert_eq!(config.api_base(), "https://fleet.example.com/api");
        assert_eq!(config.refresh_interval_ms(), Some(30_000));
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.route_filter.query_pairs(),
            vec![("status", "IN_TRANSIT".to_string()), ("vehicle", "4".to_string())]
        );
    }

    #[test]
    fn test_zero_interval_disables_polling() {
        let config = AppConfig::from_json(r#"{"refresh_interval_secs": 0}"#).unwrap();
        assert_eq!(config.refresh_interval_ms(), None);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let err = AppConfig::from_json(r#"{"log_buffer_capacity": "lots"}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid __ROUTE_BOARD_CONFIG__"));
    }
}
