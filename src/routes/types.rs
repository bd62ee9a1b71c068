use serde::{Deserialize, Serialize};
use std::fmt;

/// Module path of the shared layout shell in serialized tables.
pub const LAYOUT_COMPONENT: &str = "Layout";

/// Serialized form of [`Redirect::NoRedirect`].
pub const NO_REDIRECT: &str = "noRedirect";

/// Reference to the view a route renders
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ViewRef {
    /// The shared layout shell, always available without loading
    Layout,
    /// A view module resolved on first navigation (e.g. `views/users/list/index`)
    Lazy(String),
}

impl ViewRef {
    #[must_use]
    pub fn lazy(module: impl Into<String>) -> Self {
        ViewRef::Lazy(module.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ViewRef::Layout => LAYOUT_COMPONENT,
            ViewRef::Lazy(module) => module,
        }
    }
}

impl From<String> for ViewRef {
    fn from(value: String) -> Self {
        if value == LAYOUT_COMPONENT {
            ViewRef::Layout
        } else {
            ViewRef::Lazy(value)
        }
    }
}

impl From<ViewRef> for String {
    fn from(value: ViewRef) -> Self {
        match value {
            ViewRef::Layout => LAYOUT_COMPONENT.to_string(),
            ViewRef::Lazy(module) => module,
        }
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Redirect attached to a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Redirect {
    /// Navigating to the route continues at this path
    To(String),
    /// No redirect; the breadcrumb entry is rendered without a link
    NoRedirect,
}

impl From<String> for Redirect {
    fn from(value: String) -> Self {
        if value == NO_REDIRECT {
            Redirect::NoRedirect
        } else {
            Redirect::To(value)
        }
    }
}

impl From<Redirect> for String {
    fn from(value: Redirect) -> Self {
        match value {
            Redirect::To(target) => target,
            Redirect::NoRedirect => NO_REDIRECT.to_string(),
        }
    }
}

/// Display and access metadata of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteMeta {
    /// Roles allowed to see the route; `None` means ungated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Label in the sidebar and breadcrumb
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Sidebar glyph id (`el-icon-user`, an svg name, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Keep the view out of the page cache
    #[serde(skip_serializing_if = "is_false")]
    pub no_cache: bool,
    /// Pin the tag in the tags view
    #[serde(skip_serializing_if = "is_false")]
    pub affix: bool,
    /// Show the route in the breadcrumb
    #[serde(skip_serializing_if = "is_true")]
    pub breadcrumb: bool,
    /// Sidebar path to highlight instead of this route's own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_menu: Option<String>,
}

impl Default for RouteMeta {
    fn default() -> Self {
        Self {
            roles: None,
            title: None,
            icon: None,
            no_cache: false,
            affix: false,
            breadcrumb: true,
            active_menu: None,
        }
    }
}

impl RouteMeta {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = Some(roles.iter().map(|r| r.to_string()).collect());
        self
    }

    #[must_use]
    pub fn affixed(mut self) -> Self {
        self.affix = true;
        self
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_true(value: &bool) -> bool {
    *value
}

/// What a descriptor renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// A leaf rendering one view
    View(ViewRef),
    /// A layout shell wrapping ordered child routes
    Section {
        layout: ViewRef,
        children: Vec<RouteDescriptor>,
    },
    /// No view; the descriptor only redirects (the `*` catch-all)
    Redirect,
}

/// A static route record
///
/// Descriptors are built once and never mutated; the engine compiles them
/// into its match table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoute", into = "RawRoute")]
pub struct RouteDescriptor {
    /// Absolute (`/users`) or parent-relative (`dashboard`) path
    pub path: String,
    /// Identifier used for view-state caching
    pub name: Option<String>,
    pub redirect: Option<Redirect>,
    /// Hide from the sidebar
    pub hidden: bool,
    /// Render the section as a submenu even with a single child
    pub always_show: bool,
    pub meta: RouteMeta,
    pub kind: RouteKind,
}

impl RouteDescriptor {
    fn with_kind(path: impl Into<String>, kind: RouteKind) -> Self {
        Self {
            path: path.into(),
            name: None,
            redirect: None,
            hidden: false,
            always_show: false,
            meta: RouteMeta::default(),
            kind,
        }
    }

    /// A leaf rendering `view`.
    #[must_use]
    pub fn view(path: impl Into<String>, view: ViewRef) -> Self {
        Self::with_kind(path, RouteKind::View(view))
    }

    /// A layout section with ordered children.
    #[must_use]
    pub fn section(
        path: impl Into<String>,
        layout: ViewRef,
        children: Vec<RouteDescriptor>,
    ) -> Self {
        Self::with_kind(path, RouteKind::Section { layout, children })
    }

    /// A view-less route that sends navigation on to `target`.
    #[must_use]
    pub fn redirect_only(path: impl Into<String>, target: impl Into<String>) -> Self {
        let mut route = Self::with_kind(path, RouteKind::Redirect);
        route.redirect = Some(Redirect::To(target.into()));
        route
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(Redirect::To(target.into()));
        self
    }

    #[must_use]
    pub fn without_redirect(mut self) -> Self {
        self.redirect = Some(Redirect::NoRedirect);
        self
    }

    #[must_use]
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn show_always(mut self) -> Self {
        self.always_show = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Child routes; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[RouteDescriptor] {
        match &self.kind {
            RouteKind::Section { children, .. } => children,
            _ => &[],
        }
    }

    /// The view rendered by this record, if any.
    #[must_use]
    pub fn view_ref(&self) -> Option<&ViewRef> {
        match &self.kind {
            RouteKind::View(view) => Some(view),
            RouteKind::Section { layout, .. } => Some(layout),
            RouteKind::Redirect => None,
        }
    }

    #[must_use]
    pub fn is_section(&self) -> bool {
        matches!(self.kind, RouteKind::Section { .. })
    }

    /// Path of a [`Redirect::To`] target, if any.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.redirect {
            Some(Redirect::To(target)) => Some(target),
            _ => None,
        }
    }

    /// A section with exactly one child and no `always_show` collapses to
    /// that child in the sidebar.
    #[must_use]
    pub fn collapses_to_child(&self) -> bool {
        self.children().len() == 1 && !self.always_show
    }
}

/// Serialized shape of a route, mirroring the console's route file format
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    component: Option<ViewRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect: Option<Redirect>,
    #[serde(default, skip_serializing_if = "is_false")]
    hidden: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    always_show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "RouteMeta::is_default")]
    meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RouteDescriptor>>,
}

impl TryFrom<RawRoute> for RouteDescriptor {
    type Error = String;

    fn try_from(raw: RawRoute) -> Result<Self, Self::Error> {
        let kind = match (raw.component, raw.children) {
            (Some(layout), Some(children)) => RouteKind::Section { layout, children },
            (None, Some(_)) => {
                return Err(format!(
                    "route '{}' has children but no layout component",
                    raw.path
                ))
            }
            (Some(view), None) => RouteKind::View(view),
            (None, None) => match raw.redirect {
                Some(Redirect::To(_)) => RouteKind::Redirect,
                _ => {
                    return Err(format!(
                        "route '{}' has neither a component nor a redirect",
                        raw.path
                    ))
                }
            },
        };

        Ok(Self {
            path: raw.path,
            name: raw.name,
            redirect: raw.redirect,
            hidden: raw.hidden,
            always_show: raw.always_show,
            meta: raw.meta,
            kind,
        })
    }
}

impl From<RouteDescriptor> for RawRoute {
    fn from(route: RouteDescriptor) -> Self {
        let (component, children) = match route.kind {
            RouteKind::View(view) => (Some(view), None),
            RouteKind::Section { layout, children } => (Some(layout), Some(children)),
            RouteKind::Redirect => (None, None),
        };
        Self {
            path: route.path,
            component,
            redirect: route.redirect,
            hidden: route.hidden,
            always_show: route.always_show,
            name: route.name,
            meta: route.meta,
            children,
        }
    }
}

/// The two route lists of the console
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTable {
    /// Publicly reachable routes, always in the match table
    #[serde(default)]
    pub constant_routes: Vec<RouteDescriptor>,
    /// Role-gated routes merged in after login
    #[serde(default)]
    pub async_routes: Vec<RouteDescriptor>,
}
