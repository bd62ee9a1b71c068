//! Role-based filtering of the async route table
//!
//! A route with `meta.roles` is visible only to a user holding at least one
//! of those roles. A route without `meta.roles` is visible to everyone.

use crate::routes::{RouteDescriptor, RouteKind};
use tracing::debug;

/// Whether a user with `roles` may see `route`.
#[must_use]
pub fn has_permission<S: AsRef<str>>(roles: &[S], route: &RouteDescriptor) -> bool {
    match &route.meta.roles {
        Some(required) => roles
            .iter()
            .any(|role| required.iter().any(|r| r == role.as_ref())),
        None => true,
    }
}

/// Keep the routes a user with `roles` may see, recursing into sections.
///
/// A section the user may see keeps only its permitted children. Order is
/// preserved, so a trailing `*` catch-all stays last.
#[must_use]
pub fn filter_async_routes<S: AsRef<str>>(
    routes: &[RouteDescriptor],
    roles: &[S],
) -> Vec<RouteDescriptor> {
    let mut kept = Vec::with_capacity(routes.len());
    for route in routes {
        if !has_permission(roles, route) {
            debug!(path = %route.path, "Route filtered out by role");
            continue;
        }
        let mut route = route.clone();
        if let RouteKind::Section { children, .. } = &mut route.kind {
            *children = filter_async_routes(children, roles);
        }
        kept.push(route);
    }
    kept
}
