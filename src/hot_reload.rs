//! # Hot Reload Module
//!
//! Live reloading of a route table file without restarting the console
//! backend or dropping the engine handle.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use admin_router::hot_reload::watch_routes;
//! use admin_router::navigation::NavigationService;
//! use std::sync::Arc;
//!
//! let service = Arc::new(NavigationService::from_config(&config)?);
//! let watcher = watch_routes("config/routes.yaml", Arc::clone(&service), |table| {
//!     println!("reloaded {} constant routes", table.constant_routes.len());
//! })?;
//!
//! // The watcher stops when dropped
//! ```
//!
//! ## Reload Process
//!
//! When the file is modified or re-created:
//!
//! 1. **Parse** - the table is loaded and linted
//! 2. **Swap** - [`NavigationService::reload_table`] stores it and resets the
//!    live engine, re-applying the active role grant
//! 3. **Hook** - the caller's callback runs with the new table
//!
//! ## Error Handling
//!
//! A table that fails to parse or has lint errors is logged and ignored; the
//! previous table stays active.

use crate::navigation::NavigationService;
use crate::routes::{load_route_table, RouteTable};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Watch a route table file and reload `service` when it changes.
///
/// `on_reload` receives every table that was applied.
///
/// # Errors
///
/// Fails when the watcher cannot be created or `routes_path` cannot be watched.
pub fn watch_routes<P, F>(
    routes_path: P,
    service: Arc<NavigationService>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&RouteTable) + Send + 'static,
{
    let path: PathBuf = routes_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    if let Some(table) = reload_from(&watch_path, &service) {
                        on_reload(table.as_ref());
                    }
                }
            }
            Err(e) => error!(error = ?e, path = %watch_path.display(), "Route watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), "Watching route table");
    Ok(watcher)
}

/// Load `path` and apply it to `service`. Returns the applied table, or
/// `None` when the file was rejected.
pub fn reload_from(path: &Path, service: &NavigationService) -> Option<Arc<RouteTable>> {
    match load_route_table(path) {
        Ok(table) => {
            info!(
                path = %path.display(),
                constant_routes = table.constant_routes.len(),
                async_routes = table.async_routes.len(),
                "hot-reload: applying route table"
            );
            service.reload_table(table);
            Some(service.table())
        }
        Err(e) => {
            error!(path = %path.display(), error = %format!("{:#}", e), "hot-reload: route table rejected");
            None
        }
    }
}
