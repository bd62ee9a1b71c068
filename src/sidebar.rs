//! Sidebar menu and breadcrumb derivation
//!
//! The sidebar is computed from route descriptors, never stored. Per route:
//!
//! - `hidden` routes and their subtrees are skipped;
//! - a section with exactly one visible child, without `always_show`,
//!   renders that child as a top-level entry;
//! - a section with no visible children renders as an entry itself, unless
//!   `always_show` keeps it a (then empty) submenu;
//! - otherwise the section becomes a submenu of its visible children.
//!
//! Entries without a `meta.title` have nothing to show and are left out.

use crate::router::Resolution;
use crate::routes::{join_paths, Redirect, RouteDescriptor, RouteMeta};
use serde::Serialize;

/// One sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Absolute navigation target
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Submenu entries; empty for leaves
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
    /// Rendered as a submenu even with no visible children
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub always_show: bool,
}

impl MenuItem {
    #[must_use]
    pub fn is_submenu(&self) -> bool {
        self.always_show || !self.children.is_empty()
    }
}

/// Build the sidebar for `routes`, typically the constant routes followed
/// by the async routes granted to the user.
#[must_use]
pub fn build_menu(routes: &[RouteDescriptor]) -> Vec<MenuItem> {
    build_level(routes, "")
}

fn build_level(routes: &[RouteDescriptor], base: &str) -> Vec<MenuItem> {
    routes
        .iter()
        .filter(|route| !route.hidden)
        .filter_map(|route| menu_item(route, base))
        .collect()
}

fn menu_item(route: &RouteDescriptor, base: &str) -> Option<MenuItem> {
    let path = join_paths(base, &route.path);
    let showing: Vec<&RouteDescriptor> = route.children().iter().filter(|c| !c.hidden).collect();

    match showing.as_slice() {
        [] if !route.always_show => leaf(&route.meta, &route.name, path, None),
        [only] if !route.always_show && only.children().is_empty() => leaf(
            &only.meta,
            &only.name,
            join_paths(&path, &only.path),
            route.meta.icon.as_deref(),
        ),
        _ => {
            let title = route.meta.title.clone()?;
            let children = build_level(route.children(), &path);
            Some(MenuItem {
                title,
                icon: route.meta.icon.clone(),
                path,
                name: route.name.clone(),
                children,
                always_show: route.always_show,
            })
        }
    }
}

fn leaf(
    meta: &RouteMeta,
    name: &Option<String>,
    path: String,
    fallback_icon: Option<&str>,
) -> Option<MenuItem> {
    let title = meta.title.clone()?;
    Some(MenuItem {
        title,
        icon: meta.icon.clone().or_else(|| fallback_icon.map(str::to_string)),
        path,
        name: name.clone(),
        children: Vec::new(),
        always_show: false,
    })
}

/// One breadcrumb entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub title: String,
    /// Click target; `None` for the current page and `noRedirect` records
    pub link: Option<String>,
}

/// Breadcrumbs of a resolved route: the titled records of its matched
/// chain, outermost first, minus those with `breadcrumb: false`.
#[must_use]
pub fn breadcrumbs(resolution: &Resolution) -> Vec<Breadcrumb> {
    let titled: Vec<_> = resolution
        .matched
        .iter()
        .filter(|record| record.meta.breadcrumb)
        .filter_map(|record| record.meta.title.as_ref().map(|title| (record, title)))
        .collect();
    let last = titled.len().saturating_sub(1);

    titled
        .iter()
        .enumerate()
        .map(|(index, (record, title))| {
            let link = match &record.redirect {
                _ if index == last => None,
                Some(Redirect::NoRedirect) => None,
                Some(Redirect::To(target)) => Some(target.clone()),
                None => Some(record.full_path.clone()),
            };
            Breadcrumb {
                title: (*title).clone(),
                link,
            }
        })
        .collect()
}
