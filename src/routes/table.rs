//! The console's route tables
//!
//! `constant_routes` are reachable by every visitor. `async_routes` are merged
//! into the live match table after a role filter picks what the signed-in user
//! may see; the `*` catch-all must stay last there.

use super::types::{RouteDescriptor, RouteMeta, RouteTable, ViewRef};
use once_cell::sync::Lazy;

static CONSTANT_ROUTES: Lazy<Vec<RouteDescriptor>> = Lazy::new(build_constant_routes);
static ASYNC_ROUTES: Lazy<Vec<RouteDescriptor>> = Lazy::new(build_async_routes);

/// Routes available without any role.
#[must_use]
pub fn constant_routes() -> &'static [RouteDescriptor] {
    &CONSTANT_ROUTES
}

/// Role-gated routes, ending with the `*` → `/404` catch-all.
#[must_use]
pub fn async_routes() -> &'static [RouteDescriptor] {
    &ASYNC_ROUTES
}

impl RouteTable {
    /// The built-in console table.
    #[must_use]
    pub fn admin() -> Self {
        Self {
            constant_routes: constant_routes().to_vec(),
            async_routes: async_routes().to_vec(),
        }
    }
}

fn lazy(module: &str) -> ViewRef {
    ViewRef::lazy(module)
}

fn build_constant_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::section(
            "/redirect",
            ViewRef::Layout,
            vec![RouteDescriptor::view(
                "/redirect/:path(.*)",
                lazy("views/redirect/index"),
            )],
        )
        .hide(),
        RouteDescriptor::view("/login", lazy("views/login/index")).hide(),
        RouteDescriptor::view("/auth-redirect", lazy("views/login/auth-redirect")).hide(),
        RouteDescriptor::view("/404", lazy("views/error-page/404")).hide(),
        RouteDescriptor::view("/401", lazy("views/error-page/401")).hide(),
        RouteDescriptor::section(
            "/",
            ViewRef::Layout,
            vec![RouteDescriptor::view("dashboard", lazy("views/dashboard/index"))
                .named("Dashboard")
                .with_meta(
                    RouteMeta::titled("首页")
                        .with_icon("el-icon-s-home")
                        .affixed(),
                )],
        )
        .redirect_to("/dashboard"),
        users_section(),
        goods_section(),
        orders_section(),
    ]
}

fn admin_page(title: &str, icon: &str) -> RouteMeta {
    RouteMeta::titled(title)
        .with_icon(icon)
        .with_roles(&["admin"])
}

fn users_section() -> RouteDescriptor {
    RouteDescriptor::section(
        "/users",
        ViewRef::Layout,
        vec![
            RouteDescriptor::view("/users", lazy("views/users/index")).named("users"),
            RouteDescriptor::view("/users/list", lazy("views/users/list/index"))
                .named("List")
                .with_meta(admin_page("用户列表", "el-icon-user-solid")),
            RouteDescriptor::view("/users/review", lazy("views/users/review/index"))
                .named("Add")
                .with_meta(admin_page("用户审核", "el-icon-check")),
        ],
    )
    .redirect_to("/users")
    .with_meta(admin_page("用户管理", "el-icon-user"))
}

fn goods_section() -> RouteDescriptor {
    RouteDescriptor::section(
        "/goods",
        ViewRef::Layout,
        vec![
            RouteDescriptor::view("/goods", lazy("views/order/index")).named("goods"),
            RouteDescriptor::view("/goods/list", lazy("views/product/list/index"))
                .named("List")
                .with_meta(admin_page("商品列表", "el-icon-s-unfold")),
            RouteDescriptor::view("/goods/category", lazy("views/product/category/index"))
                .named("Add")
                .with_meta(admin_page("商品类别", "el-icon-menu")),
            RouteDescriptor::view("/goods/review", lazy("views/product/review/index"))
                .named("Add")
                .with_meta(admin_page("商品审核", "el-icon-check")),
        ],
    )
    .redirect_to("/goods")
    .with_meta(admin_page("商品管理", "el-icon-shopping-bag-1"))
}

fn orders_section() -> RouteDescriptor {
    RouteDescriptor::section(
        "/orders",
        ViewRef::Layout,
        vec![
            RouteDescriptor::view("/orders", lazy("views/order/index")).named("order"),
            RouteDescriptor::view("/orders/list", lazy("views/order/list/index"))
                .named("List")
                .with_meta(admin_page("订单列表", "el-icon-s-unfold")),
            RouteDescriptor::view("/order/refund", lazy("views/order/refund/index"))
                .named("Add")
                .with_meta(admin_page("退货处理", "el-icon-s-release")),
            RouteDescriptor::view("/order/settings", lazy("views/order/setting/index"))
                .named("Add")
                .with_meta(admin_page("订单设置", "el-icon-setting")),
        ],
    )
    .redirect_to("/orders")
    .with_meta(admin_page("订单管理", "el-icon-s-order"))
}

fn build_async_routes() -> Vec<RouteDescriptor> {
    // the catch-all must be the final entry
    vec![RouteDescriptor::redirect_only("*", "/404").hide()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_sibling_paths(routes: &[RouteDescriptor]) {
        let mut seen = HashSet::new();
        for route in routes {
            assert!(seen.insert(route.path.as_str()), "duplicate sibling path {}", route.path);
            assert_unique_sibling_paths(route.children());
        }
    }

    #[test]
    fn test_sibling_paths_are_unique() {
        assert_unique_sibling_paths(constant_routes());
        assert_unique_sibling_paths(async_routes());
    }

    #[test]
    fn test_wildcard_is_last_async_route() {
        let last = async_routes().last().unwrap();
        assert_eq!(last.path, "*");
        assert_eq!(last.redirect_target(), Some("/404"));
        assert!(!constant_routes().iter().any(|r| r.path == "*"));
    }

    #[test]
    fn test_nesting_depth_is_at_most_two() {
        for route in constant_routes() {
            for child in route.children() {
                assert!(child.children().is_empty());
            }
        }
    }

    #[test]
    fn test_static_tables_are_shared() {
        assert!(std::ptr::eq(constant_routes(), constant_routes()));
        assert_eq!(RouteTable::admin().constant_routes.len(), 9);
    }
}
