//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the navigation engine.
//!
//! ## Environment Variables
//!
//! ### `ADMIN_ROUTER_MODE`
//!
//! How locations are written into the address bar: `hash` (`/#/users/list`)
//! or `history` (`/users/list`). Unknown values fall back to `hash`.
//!
//! Default: `hash`
//!
//! ### `ADMIN_ROUTER_BASE`
//!
//! Prefix of every generated href, e.g. `/admin/` when the console is served
//! below a sub-path.
//!
//! Default: `/`
//!
//! ### `ADMIN_ROUTER_MAX_REDIRECTS`
//!
//! Redirect hops one navigation may follow before it fails with
//! `RedirectLoop`. Accepts decimal only; invalid values use the default.
//!
//! Default: `10`
//!
//! ### `ADMIN_ROUTER_ROUTES_FILE`
//!
//! Optional YAML or JSON route table replacing the built-in one.
//!
//! ## Usage
//!
//! ```rust
//! use admin_router::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! let options = config.router_options();
//! println!("max redirects: {}", options.max_redirects);
//! ```
//!
//! ## Example Configuration
//!
//! ```bash
//! export ADMIN_ROUTER_MODE=history
//! export ADMIN_ROUTER_BASE=/admin/
//! export ADMIN_ROUTER_ROUTES_FILE=config/routes.yaml
//! admin-routes resolve /users/list
//! ```

use crate::router::{HistoryMode, RouterOptions, DEFAULT_MAX_REDIRECTS};
use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub mode: HistoryMode,
    pub base: String,
    pub max_redirects: usize,
    /// Route table file overriding the built-in table
    pub routes_file: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mode: HistoryMode::Hash,
            base: "/".to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            routes_file: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mode = lookup("ADMIN_ROUTER_MODE")
            .map(|v| HistoryMode::parse(&v))
            .unwrap_or(defaults.mode);
        let base = lookup("ADMIN_ROUTER_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.base);
        let max_redirects = lookup("ADMIN_ROUTER_MAX_REDIRECTS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_redirects);
        let routes_file = lookup("ADMIN_ROUTER_ROUTES_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        RuntimeConfig {
            mode,
            base,
            max_redirects,
            routes_file,
        }
    }

    /// Engine options for this configuration; scrolling always resets to top.
    #[must_use]
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            mode: self.mode,
            base: self.base.clone(),
            max_redirects: self.max_redirects,
            ..RouterOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), RuntimeConfig::default());
        assert_eq!(RuntimeConfig::default().router_options(), RouterOptions::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("ADMIN_ROUTER_MODE", "History"),
            ("ADMIN_ROUTER_BASE", "/admin/"),
            ("ADMIN_ROUTER_MAX_REDIRECTS", "3"),
            ("ADMIN_ROUTER_ROUTES_FILE", "routes.yaml"),
        ]);
        assert_eq!(config.mode, HistoryMode::History);
        assert_eq!(config.base, "/admin/");
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.routes_file, Some(PathBuf::from("routes.yaml")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("ADMIN_ROUTER_MODE", "memory"),
            ("ADMIN_ROUTER_MAX_REDIRECTS", "0x10"),
            ("ADMIN_ROUTER_BASE", " "),
        ]);
        assert_eq!(config.mode, HistoryMode::Hash);
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.base, "/");
    }
}
