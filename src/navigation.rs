//! # Navigation Service
//!
//! Owns the console's live navigation engine and the route table it is built
//! from. The service is constructed once at startup and passed to every
//! collaborator that needs the engine: the view root, guard installers and
//! the auth/session layer.
//!
//! The engine is handed out as `Arc<Router>` and never replaced. When the
//! active user's permissions change, [`NavigationService::reset_router`]
//! builds a fresh engine and copies only its match table onto the live one,
//! so every captured handle observes the new matching behavior while its
//! guards and current route stay in place.
//!
//! ```rust
//! use admin_router::navigation::NavigationService;
//!
//! let service = NavigationService::admin();
//! let router = service.router();
//!
//! service.grant(&["admin"]);
//! assert_eq!(router.resolve("/unknown-xyz").unwrap().path, "/404");
//!
//! // logout
//! service.reset_router();
//! assert!(router.resolve("/unknown-xyz").is_err());
//! ```

use crate::permission::filter_async_routes;
use crate::router::{RouteMatcher, Router, RouterOptions};
use crate::routes::{load_route_table, RouteDescriptor, RouteTable};
use crate::runtime_config::RuntimeConfig;
use anyhow::Context;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Owner of the live engine and its route table
pub struct NavigationService {
    options: RouterOptions,
    table: ArcSwap<RouteTable>,
    router: Arc<Router>,
    /// Roles of the last grant; re-applied when the table is reloaded.
    /// Held across every rebuild of the match table.
    granted: Mutex<Option<Vec<String>>>,
}

impl NavigationService {
    /// Build the service and its live engine, seeded with `table`'s constant routes.
    #[must_use]
    pub fn new(table: RouteTable, options: RouterOptions) -> Self {
        let router = Arc::new(build_router(&options, &table));
        Self {
            options,
            table: ArcSwap::from_pointee(table),
            router,
            granted: Mutex::new(None),
        }
    }

    /// The built-in console table with default options.
    #[must_use]
    pub fn admin() -> Self {
        Self::new(RouteTable::admin(), RouterOptions::default())
    }

    /// Build the service from runtime configuration, loading the route
    /// table file when one is configured.
    ///
    /// # Errors
    ///
    /// Fails when the configured route table cannot be read, parsed or has
    /// lint errors.
    pub fn from_config(config: &RuntimeConfig) -> anyhow::Result<Self> {
        let table = match &config.routes_file {
            Some(path) => load_route_table(path)
                .with_context(|| format!("Failed to load routes from {}", path.display()))?,
            None => RouteTable::admin(),
        };
        Ok(Self::new(table, config.router_options()))
    }

    /// Handle to the live engine. Every call returns the same instance.
    #[must_use]
    pub fn router(&self) -> Arc<Router> {
        Arc::clone(&self.router)
    }

    /// Snapshot of the current route table.
    #[must_use]
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    #[must_use]
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// A new, independent engine seeded with the constant routes.
    ///
    /// Scrolling resets to the top on every navigation.
    #[must_use]
    pub fn create_router(&self) -> Router {
        build_router(&self.options, &self.table.load())
    }

    /// Replace the live engine's match table with a freshly built one.
    ///
    /// Routes added since construction (granted async routes) are dropped.
    /// The engine identity, its guards and its current route are kept.
    pub fn reset_router(&self) {
        let _granted = self.lock_granted();
        self.publish(&self.table.load(), None);
        info!(
            routes_count = self.router.matcher().len(),
            "Router reset to constant routes"
        );
    }

    /// Reset the engine and append the async routes a user with `roles`
    /// may see. Returns the appended routes, e.g. for menu building.
    ///
    /// The constant and granted routes are published together, so readers
    /// never see the reset table without its async routes.
    pub fn grant<S: AsRef<str>>(&self, roles: &[S]) -> Vec<RouteDescriptor> {
        let roles: Vec<String> = roles.iter().map(|r| r.as_ref().to_string()).collect();
        let mut granted = self.lock_granted();
        let accessible = self.publish(&self.table.load(), Some(roles.as_slice()));
        info!(roles = ?roles, granted_routes = accessible.len(), "Async routes granted");
        *granted = Some(roles);
        accessible
    }

    /// Forget the granted roles and reset the engine; the logout path.
    pub fn revoke(&self) {
        let mut granted = self.lock_granted();
        *granted = None;
        self.publish(&self.table.load(), None);
        info!("Async route grant revoked");
    }

    /// Roles of the active grant, if any.
    #[must_use]
    pub fn granted_roles(&self) -> Option<Vec<String>> {
        self.lock_granted().clone()
    }

    /// Swap in a new route table and reset the engine against it. An active
    /// grant is re-applied to the new async routes.
    pub fn reload_table(&self, table: RouteTable) {
        info!(
            constant_routes = table.constant_routes.len(),
            async_routes = table.async_routes.len(),
            "Route table replaced"
        );
        let granted = self.lock_granted();
        let table = Arc::new(table);
        self.table.store(Arc::clone(&table));
        self.publish(&table, granted.as_deref());
    }

    fn lock_granted(&self) -> MutexGuard<'_, Option<Vec<String>>> {
        self.granted.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compile `table`'s constant routes plus the async routes `roles` may
    /// see, and store the result on the live engine in one swap. Callers
    /// hold the `granted` lock.
    fn publish(&self, table: &RouteTable, roles: Option<&[String]>) -> Vec<RouteDescriptor> {
        let accessible = roles
            .map(|roles| filter_async_routes(&table.async_routes, roles))
            .unwrap_or_default();
        let mut matcher = RouteMatcher::new(&table.constant_routes);
        matcher.add_routes(&accessible);
        self.router.replace_matcher(Arc::new(matcher));
        accessible
    }
}

fn build_router(options: &RouterOptions, table: &RouteTable) -> Router {
    Router::new(options.clone(), table.constant_routes.clone())
}
