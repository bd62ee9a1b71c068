//! # Router Module
//!
//! The navigation engine of the console. It compiles route descriptors into a
//! match table, resolves locations against it, follows redirects, runs
//! navigation guards and loads the views of the matched records.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Flattening nested descriptors into absolute [`RouteRecord`]s
//! - Matching locations to records and extracting params, query and hash
//! - Following `redirect` targets with a loop limit
//! - Committing navigations and applying the scroll policy
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: descriptors are parsed into [`RoutePath`](crate::routes::RoutePath)
//!    segments and inserted into a segment tree ([`RouteMatcher`]).
//!
//! 2. **Matching**: a location is split into segments and walked down the
//!    tree, static segments first, the `*` catch-all last.
//!
//! The compiled tree is the engine's *match table*. It lives behind an
//! `ArcSwap`, so [`Router::replace_matcher`] and [`Router::add_routes`] swap
//! it atomically while every holder of the `Arc<Router>` keeps a valid handle.
//!
//! ## Example
//!
//! ```rust
//! use admin_router::router::{Router, RouterOptions};
//! use admin_router::routes::constant_routes;
//!
//! let router = Router::new(RouterOptions::default(), constant_routes().to_vec());
//! let resolution = router.resolve("/users/list").unwrap();
//! assert_eq!(resolution.name(), Some("List"));
//!
//! // `/` redirects to the dashboard
//! let home = router.resolve("/").unwrap();
//! assert_eq!(home.path, "/dashboard");
//! ```

mod core;
mod guard;
mod matcher;
mod scroll;

pub use self::core::{
    HistoryMode, Navigation, Resolution, Router, RouterOptions, DEFAULT_MAX_REDIRECTS,
};
pub use guard::{GuardDecision, NavigationGuard};
pub use matcher::{ParamVec, RouteMatcher, RouteRecord, MAX_INLINE_PARAMS};
pub use scroll::{ScrollBehavior, ScrollPosition};
