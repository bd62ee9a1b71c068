//! Segment tree for route matching
//!
//! Route descriptors are flattened into [`RouteRecord`]s (one per descriptor,
//! with its absolute path and a link to its parent) and inserted into a tree
//! keyed by path segment. This is the engine's *match table*: the only state
//! [`NavigationService::reset_router`](crate::navigation::NavigationService::reset_router)
//! replaces.
//!
//! ## Matching rules
//!
//! - Children register before their parent, and a full path that is already
//!   registered is not registered again. A section whose first child repeats
//!   the section path (`/users` under `/users`) therefore resolves to the child.
//! - Within one tree level, candidates are tried static first, then `:param`,
//!   then pattern params, then `*`. The catch-all never shadows a more
//!   specific record, whatever the insertion order.
//! - Static segments compare ASCII case-insensitively and a trailing `/` is
//!   ignored.
//!
//! Lookup cost is proportional to the number of path segments, with
//! backtracking only across parameter candidates.

use crate::routes::{
    join_paths, Redirect, RouteDescriptor, RouteMeta, RoutePath, Segment, ViewRef, WILDCARD_PARAM,
};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum number of captured params before heap allocation.
/// The console's deepest pattern captures one.
pub const MAX_INLINE_PARAMS: usize = 4;

/// Captured `(name, value)` pairs, values percent-decoded
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// A compiled route: one descriptor with its absolute path resolved
#[derive(Debug)]
pub struct RouteRecord {
    /// Absolute path (`/dashboard` for `dashboard` under `/`)
    pub full_path: String,
    pub path: RoutePath,
    pub name: Option<String>,
    pub redirect: Option<Redirect>,
    pub hidden: bool,
    pub meta: RouteMeta,
    /// `None` for view-less redirect routes
    pub view: Option<ViewRef>,
    pub parent: Option<Arc<RouteRecord>>,
}

impl RouteRecord {
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.redirect {
            Some(Redirect::To(target)) => Some(target),
            _ => None,
        }
    }

    /// This record and its ancestors, outermost first.
    #[must_use]
    pub fn chain(self: &Arc<Self>) -> Vec<Arc<RouteRecord>> {
        let mut chain = vec![Arc::clone(self)];
        let mut current = self.parent.as_ref();
        while let Some(parent) = current {
            chain.push(Arc::clone(parent));
            current = parent.parent.as_ref();
        }
        chain.reverse();
        chain
    }
}

#[derive(Debug, Clone)]
struct MatchNode {
    /// `None` only for the root
    segment: Option<Segment>,
    record: Option<Arc<RouteRecord>>,
    /// Kept ordered by [`Segment::rank`]
    children: Vec<MatchNode>,
}

impl MatchNode {
    fn root() -> Self {
        Self {
            segment: None,
            record: None,
            children: Vec::new(),
        }
    }

    fn new(segment: Segment) -> Self {
        Self {
            segment: Some(segment),
            record: None,
            children: Vec::new(),
        }
    }

    /// Returns `false` when the path already has a record.
    fn insert(&mut self, segments: &[Segment], record: Arc<RouteRecord>) -> bool {
        let Some((segment, remaining)) = segments.split_first() else {
            if self.record.is_some() {
                return false;
            }
            self.record = Some(record);
            return true;
        };

        if let Some(child) = self
            .children
            .iter_mut()
            .find(|c| c.segment.as_ref() == Some(segment))
        {
            return child.insert(remaining, record);
        }

        let rank = segment.rank();
        let position = self
            .children
            .iter()
            .position(|c| c.segment.as_ref().map(Segment::rank).unwrap_or(0) > rank)
            .unwrap_or(self.children.len());
        let mut child = MatchNode::new(segment.clone());
        let inserted = child.insert(remaining, record);
        self.children.insert(position, child);
        inserted
    }

    /// `open_tail` is set when the looked-up path ended in `/`, which lets a
    /// tail pattern accept the empty remainder (`/redirect/` → `path = ""`).
    fn search(
        &self,
        segments: &[&str],
        open_tail: bool,
        params: &mut ParamVec,
    ) -> Option<Arc<RouteRecord>> {
        if segments.is_empty() {
            if open_tail {
                if let Some(found) = self.search_empty_tail(params) {
                    return Some(found);
                }
            }
            if let Some(record) = &self.record {
                return Some(Arc::clone(record));
            }
        }

        for child in &self.children {
            let Some(segment) = &child.segment else {
                continue;
            };
            match segment {
                Segment::Static(text) => {
                    if let Some((first, rest)) = segments.split_first() {
                        if first.eq_ignore_ascii_case(text) {
                            if let Some(found) = child.search(rest, open_tail, params) {
                                return Some(found);
                            }
                        }
                    }
                }
                Segment::Param(name) => {
                    if let Some((first, rest)) = segments.split_first() {
                        params.push((name.clone(), decode(first)));
                        if let Some(found) = child.search(rest, open_tail, params) {
                            return Some(found);
                        }
                        params.pop();
                    }
                }
                Segment::Pattern {
                    name, regex, tail, ..
                } => {
                    if segments.is_empty() {
                        continue;
                    }
                    if *tail {
                        let joined = segments.join("/");
                        if regex.is_match(&joined) {
                            if let Some(record) = &child.record {
                                params.push((name.clone(), decode(&joined)));
                                return Some(Arc::clone(record));
                            }
                        }
                    } else if let Some((first, rest)) = segments.split_first() {
                        if regex.is_match(first) {
                            params.push((name.clone(), decode(first)));
                            if let Some(found) = child.search(rest, open_tail, params) {
                                return Some(found);
                            }
                            params.pop();
                        }
                    }
                }
                Segment::Wildcard => {
                    if let Some(record) = &child.record {
                        let rest = segments.join("/");
                        let captured = if self.segment.is_none() {
                            format!("/{}", rest)
                        } else {
                            rest
                        };
                        params.push((WILDCARD_PARAM.to_string(), decode(&captured)));
                        return Some(Arc::clone(record));
                    }
                }
            }
        }

        None
    }

    fn search_empty_tail(&self, params: &mut ParamVec) -> Option<Arc<RouteRecord>> {
        self.children.iter().find_map(|child| match &child.segment {
            Some(Segment::Pattern {
                name,
                regex,
                tail: true,
                ..
            }) if regex.is_match("") => child.record.as_ref().map(|record| {
                params.push((name.clone(), String::new()));
                Arc::clone(record)
            }),
            _ => None,
        })
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

fn split_path(path: &str) -> Vec<&str> {
    path.trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

/// The engine's match table
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    root: MatchNode,
    /// Registered records, in registration order
    records: Vec<Arc<RouteRecord>>,
    names: HashMap<String, Arc<RouteRecord>>,
}

impl RouteMatcher {
    /// Compile `routes` into a fresh table.
    ///
    /// Never fails: a record whose path does not compile is logged and left
    /// out; the linter reports such paths as errors.
    #[must_use]
    pub fn new(routes: &[RouteDescriptor]) -> Self {
        let mut matcher = Self {
            root: MatchNode::root(),
            records: Vec::new(),
            names: HashMap::new(),
        };
        matcher.add_routes(routes);
        matcher
    }

    /// Append `routes` to this table. Already-registered paths keep their
    /// first record.
    pub fn add_routes(&mut self, routes: &[RouteDescriptor]) {
        for route in routes {
            self.add_route_record(route, None);
        }
    }

    fn add_route_record(&mut self, route: &RouteDescriptor, parent: Option<&Arc<RouteRecord>>) {
        let parent_path = parent.map(|p| p.full_path.as_str()).unwrap_or("");
        let full_path = join_paths(parent_path, &route.path);

        let path = match RoutePath::parse(&full_path) {
            Ok(path) => path,
            Err(err) => {
                warn!(path = %full_path, error = %err, "Skipping route with invalid path");
                return;
            }
        };

        let record = Arc::new(RouteRecord {
            full_path,
            path,
            name: route.name.clone(),
            redirect: route.redirect.clone(),
            hidden: route.hidden,
            meta: route.meta.clone(),
            view: route.view_ref().cloned(),
            parent: parent.map(Arc::clone),
        });

        for child in route.children() {
            self.add_route_record(child, Some(&record));
        }

        let segments = record.path.segments().to_vec();
        if !self.root.insert(&segments, Arc::clone(&record)) {
            debug!(path = %record.full_path, "Path already registered; keeping first record");
            return;
        }
        if let Some(name) = &record.name {
            self.names
                .entry(name.clone())
                .or_insert_with(|| Arc::clone(&record));
        }
        self.records.push(record);
    }

    /// Find the record accepting `path` (no query or hash) and its params.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<(Arc<RouteRecord>, ParamVec)> {
        let segments = split_path(path);
        let open_tail = path.len() > 1 && path.ends_with('/');
        let mut params = ParamVec::new();
        let record = self.root.search(&segments, open_tail, &mut params)?;
        Some((record, params))
    }

    /// First registered record carrying `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Arc<RouteRecord>> {
        self.names.get(name).map(Arc::clone)
    }

    #[must_use]
    pub fn records(&self) -> &[Arc<RouteRecord>] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: &str, view: &str) -> RouteDescriptor {
        RouteDescriptor::view(path, ViewRef::lazy(view))
    }

    fn param<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
        params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_static_route() {
        let matcher = RouteMatcher::new(&[leaf("/login", "views/login/index")]);
        let (record, params) = matcher.lookup("/login").unwrap();
        assert_eq!(record.full_path, "/login");
        assert!(params.is_empty());
        assert!(matcher.lookup("/logout").is_none());
    }

    #[test]
    fn test_relative_child_joins_parent() {
        let matcher = RouteMatcher::new(&[RouteDescriptor::section(
            "/",
            ViewRef::Layout,
            vec![leaf("dashboard", "views/dashboard/index").named("Dashboard")],
        )
        .redirect_to("/dashboard")]);

        let (record, _) = matcher.lookup("/dashboard").unwrap();
        assert_eq!(record.name.as_deref(), Some("Dashboard"));
        let chain = record.chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].full_path, "/");
        assert_eq!(chain[0].view, Some(ViewRef::Layout));

        let (root, _) = matcher.lookup("/").unwrap();
        assert_eq!(root.redirect_target(), Some("/dashboard"));
    }

    #[test]
    fn test_child_with_section_path_wins() {
        let matcher = RouteMatcher::new(&[RouteDescriptor::section(
            "/users",
            ViewRef::Layout,
            vec![
                leaf("/users", "views/users/index").named("users"),
                leaf("/users/list", "views/users/list/index"),
            ],
        )
        .redirect_to("/users")]);

        let (record, _) = matcher.lookup("/users").unwrap();
        assert_eq!(record.name.as_deref(), Some("users"));
        assert!(record.redirect.is_none());
        // section itself is shadowed, so only the two children are registered
        assert_eq!(matcher.len(), 2);
    }

    #[test]
    fn test_named_param() {
        let matcher = RouteMatcher::new(&[leaf("/users/:id", "views/users/detail")]);
        let (_, params) = matcher.lookup("/users/a%20b").unwrap();
        assert_eq!(param(&params, "id"), Some("a b"));
    }

    #[test]
    fn test_tail_pattern_spans_segments() {
        let matcher = RouteMatcher::new(&[RouteDescriptor::section(
            "/redirect",
            ViewRef::Layout,
            vec![leaf("/redirect/:path(.*)", "views/redirect/index")],
        )]);

        let (record, params) = matcher.lookup("/redirect/users/list").unwrap();
        assert_eq!(record.full_path, "/redirect/:path(.*)");
        assert_eq!(param(&params, "path"), Some("users/list"));
    }

    #[test]
    fn test_tail_pattern_accepts_empty_remainder_after_slash() {
        let matcher = RouteMatcher::new(&[RouteDescriptor::section(
            "/redirect",
            ViewRef::Layout,
            vec![leaf("/redirect/:path(.*)", "views/redirect/index")],
        )]);

        let (record, params) = matcher.lookup("/redirect/").unwrap();
        assert_eq!(record.full_path, "/redirect/:path(.*)");
        assert_eq!(param(&params, "path"), Some(""));

        // without the slash the layout record itself matches
        let (record, params) = matcher.lookup("/redirect").unwrap();
        assert_eq!(record.full_path, "/redirect");
        assert!(params.is_empty());
    }

    #[test]
    fn test_tail_pattern_rejecting_empty_keeps_parent() {
        let matcher = RouteMatcher::new(&[RouteDescriptor::section(
            "/files",
            ViewRef::Layout,
            vec![leaf("/files/:rest(.+)", "views/files/index")],
        )]);
        let (record, _) = matcher.lookup("/files/").unwrap();
        assert_eq!(record.full_path, "/files");
    }

    #[test]
    fn test_segment_pattern_must_match() {
        let matcher = RouteMatcher::new(&[
            leaf("/orders/:id(\\d+)/detail", "views/order/detail"),
            leaf("/orders/:slug/detail", "views/order/slug"),
        ]);
        let (record, _) = matcher.lookup("/orders/42/detail").unwrap();
        // plain params outrank pattern params
        assert_eq!(record.view, Some(ViewRef::lazy("views/order/slug")));

        let matcher = RouteMatcher::new(&[leaf("/orders/:id(\\d+)/detail", "views/order/detail")]);
        assert!(matcher.lookup("/orders/abc/detail").is_none());
        assert!(matcher.lookup("/orders/7/detail").is_some());
    }

    #[test]
    fn test_wildcard_never_shadows_specific_routes() {
        let mut matcher = RouteMatcher::new(&[RouteDescriptor::redirect_only("*", "/404")]);
        matcher.add_routes(&[leaf("/404", "views/error-page/404")]);

        let (record, _) = matcher.lookup("/404").unwrap();
        assert_eq!(record.full_path, "/404");

        let (record, params) = matcher.lookup("/unknown-xyz").unwrap();
        assert_eq!(record.full_path, "*");
        assert_eq!(param(&params, WILDCARD_PARAM), Some("/unknown-xyz"));
    }

    #[test]
    fn test_static_match_is_case_insensitive_and_ignores_trailing_slash() {
        let matcher = RouteMatcher::new(&[leaf("/users/list", "views/users/list/index")]);
        assert!(matcher.lookup("/Users/List").is_some());
        assert!(matcher.lookup("/users/list/").is_some());
    }

    #[test]
    fn test_invalid_path_is_skipped() {
        let matcher = RouteMatcher::new(&[
            leaf("/broken/:id([)", "views/broken"),
            leaf("/ok", "views/ok"),
        ]);
        assert_eq!(matcher.len(), 1);
        assert!(matcher.lookup("/ok").is_some());
    }

    #[test]
    fn test_by_name_keeps_first() {
        let matcher = RouteMatcher::new(&[
            leaf("/users/list", "views/users/list/index").named("List"),
            leaf("/goods/list", "views/product/list/index").named("List"),
        ]);
        assert_eq!(matcher.by_name("List").unwrap().full_path, "/users/list");
    }

    #[test]
    fn test_backtracking_between_param_branches() {
        let matcher = RouteMatcher::new(&[
            leaf("/users/:user_id/posts", "views/posts"),
            leaf("/users/:id/comments", "views/comments"),
        ]);
        let (record, params) = matcher.lookup("/users/9/comments").unwrap();
        assert_eq!(record.view, Some(ViewRef::lazy("views/comments")));
        assert_eq!(param(&params, "id"), Some("9"));
        assert!(param(&params, "user_id").is_none());
    }
}
