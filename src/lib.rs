//! # admin-router
//!
//! Typed route table and navigation engine for a single-page administrative
//! console (users, goods, orders management). Routes map URL paths to lazily
//! loaded views, sidebar metadata and role-based visibility.
//!
//! ## Overview
//!
//! The console ships two route lists:
//!
//! - **`constantRoutes`** - reachable by every visitor (login, error pages,
//!   the dashboard and the management sections)
//! - **`asyncRoutes`** - gated by role and merged into the live engine after
//!   login, ending with the `*` → `/404` catch-all
//!
//! A [`NavigationService`] owns the live [`Router`]. It builds engines seeded
//! with the constant routes and, when the signed-in user changes, resets the
//! live engine's match table in place so every holder of the engine handle
//! sees the new routes.
//!
//! ## Architecture
//!
//! - **[`routes`]** - Route descriptors, path patterns, the shipped tables and YAML/JSON loading
//! - **[`router`]** - Match table, resolution, redirects, guards and the scroll policy
//! - **[`navigation`]** - The service owning the live engine: `create_router`, `reset_router`, role grants
//! - **[`permission`]** - Role filter over the async routes
//! - **[`views`]** - Asynchronous view loading contract and loaders
//! - **[`sidebar`]** - Sidebar menu and breadcrumbs derived from descriptors
//! - **[`linter`]** - Static checks over route tables
//! - **[`hot_reload`]** - Reload a route table file without dropping the engine
//! - **[`runtime_config`]** / **[`otel`]** - Environment configuration and logging
//! - **[`cli`]** - The `admin-routes` command
//!
//! ### Session Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Auth as Auth/session layer
//!     participant Service as NavigationService
//!     participant Router as Router (shared Arc)
//!     participant Matcher as RouteMatcher
//!     participant View as View root
//!
//!     Service->>Router: Router::new(options, constant_routes)
//!     Router->>Matcher: compile descriptors
//!     View->>Router: before_each(guard), push("/login")
//!
//!     Auth->>Service: grant(["admin"])
//!     Service->>Service: filter_async_routes(async_routes, roles)
//!     Service->>Router: replace_matcher(fresh)
//!     Service->>Router: add_routes(accessible)
//!     View->>Router: push("/users/list")
//!     Router->>Matcher: lookup("/users/list")
//!     Router-->>View: views [Layout, users/list]
//!
//!     Auth->>Service: revoke() on logout
//!     Service->>Router: replace_matcher(fresh)
//!     Note over Router: same engine, guards kept,<br/>async routes gone
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use admin_router::NavigationService;
//!
//! let service = NavigationService::admin();
//! let router = service.router();
//!
//! assert_eq!(router.resolve("/").unwrap().path, "/dashboard");
//! assert!(router.resolve("/unknown-xyz").is_err());
//!
//! service.grant(&["admin"]);
//! assert_eq!(router.resolve("/unknown-xyz").unwrap().path, "/404");
//! ```
//!
//! ## Runtime Considerations
//!
//! The engine is `Send + Sync` and never blocks on I/O. Only
//! [`Router::push`](router::Router::push) is async, and only to await view
//! loading; any executor works.

pub mod cli;
pub mod error;
pub mod hot_reload;
pub mod linter;
pub mod navigation;
pub mod otel;
pub mod permission;
pub mod router;
pub mod routes;
pub mod runtime_config;
pub mod sidebar;
pub mod views;

pub use error::{NavigationError, PathPatternError, ViewLoadError};
pub use navigation::NavigationService;
pub use permission::filter_async_routes;
pub use router::{Router, RouterOptions};
pub use routes::{async_routes, constant_routes, RouteDescriptor, RouteTable};
pub use sidebar::build_menu;
