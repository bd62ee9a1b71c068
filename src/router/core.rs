use super::guard::{GuardDecision, NavigationGuard};
use super::matcher::{ParamVec, RouteMatcher, RouteRecord};
use super::scroll::{ScrollBehavior, ScrollPosition};
use crate::error::NavigationError;
use crate::routes::{split_location, RouteDescriptor, RouteMeta};
use crate::views::{ViewHandle, ViewLoader};
use arc_swap::{ArcSwap, ArcSwapOption};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Default cap on redirects followed by one navigation.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// How locations are written into the address bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// `/#/users/list`; needs no server support
    #[default]
    Hash,
    /// `/users/list`; the server must answer every path with the app shell
    History,
}

impl HistoryMode {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "history" => HistoryMode::History,
            _ => HistoryMode::Hash,
        }
    }
}

/// Construction options of an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    pub mode: HistoryMode,
    /// Prefix of every generated href
    pub base: String,
    pub max_redirects: usize,
    pub scroll_behavior: ScrollBehavior,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            mode: HistoryMode::Hash,
            base: "/".to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            scroll_behavior: ScrollBehavior::Top,
        }
    }
}

/// Result of resolving a location against the live match table
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Path of the final location, after redirects
    pub path: String,
    /// Final location including query and hash
    pub full_path: String,
    /// The record that accepted the path
    pub record: Arc<RouteRecord>,
    /// `record` and its ancestors, outermost first
    pub matched: Vec<Arc<RouteRecord>>,
    pub params: ParamVec,
    pub query: Vec<(String, String)>,
    pub hash: Option<String>,
    /// Location originally asked for, when a redirect was followed
    pub redirected_from: Option<String>,
}

impl Resolution {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    #[must_use]
    pub fn meta(&self) -> &RouteMeta {
        &self.record.meta
    }

    /// Captured path param; the last capture wins on duplicate names.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A committed navigation
#[derive(Debug, Clone)]
pub struct Navigation {
    pub route: Arc<Resolution>,
    /// Loaded views of the matched chain, outermost first
    pub views: Vec<ViewHandle>,
    pub scroll: ScrollPosition,
}

/// The navigation engine
///
/// Holds the configured route list, the compiled match table, the installed
/// guards and the current route. Collaborators share one engine through an
/// `Arc<Router>`; the match table sits behind an [`ArcSwap`] so it can be
/// replaced without replacing the engine.
pub struct Router {
    options: RouterOptions,
    routes: Vec<RouteDescriptor>,
    matcher: ArcSwap<RouteMatcher>,
    guards: RwLock<Vec<Arc<dyn NavigationGuard>>>,
    current: ArcSwapOption<Resolution>,
}

impl Router {
    /// Build an engine seeded with `routes`.
    #[must_use]
    pub fn new(options: RouterOptions, routes: Vec<RouteDescriptor>) -> Self {
        let matcher = RouteMatcher::new(&routes);

        let routes_summary: Vec<&str> = matcher
            .records()
            .iter()
            .take(10)
            .map(|r| r.full_path.as_str())
            .collect();
        info!(
            routes_count = matcher.len(),
            mode = ?options.mode,
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self {
            options,
            routes,
            matcher: ArcSwap::from_pointee(matcher),
            guards: RwLock::new(Vec::new()),
            current: ArcSwapOption::empty(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// The route list this engine was constructed with.
    ///
    /// Routes appended later with [`Router::add_routes`] live only in the
    /// match table.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Snapshot of the live match table.
    #[must_use]
    pub fn matcher(&self) -> Arc<RouteMatcher> {
        self.matcher.load_full()
    }

    /// Swap in another match table. Guards, options and the current route
    /// are untouched.
    pub fn replace_matcher(&self, matcher: Arc<RouteMatcher>) {
        let records = matcher.len();
        self.matcher.store(matcher);
        info!(routes_count = records, "Match table replaced");
    }

    /// Append routes to the live match table.
    pub fn add_routes(&self, routes: &[RouteDescriptor]) {
        self.matcher.rcu(|current| {
            let mut next = RouteMatcher::clone(current);
            next.add_routes(routes);
            next
        });
        info!(
            added = routes.len(),
            routes_count = self.matcher.load().len(),
            "Routes added to match table"
        );
    }

    /// Install a guard run before every navigation.
    pub fn before_each(&self, guard: impl NavigationGuard + 'static) {
        self.guards
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(guard));
    }

    /// The last committed route.
    #[must_use]
    pub fn current_route(&self) -> Option<Arc<Resolution>> {
        self.current.load_full()
    }

    /// First record registered under `name`.
    #[must_use]
    pub fn route_by_name(&self, name: &str) -> Option<Arc<RouteRecord>> {
        self.matcher.load().by_name(name)
    }

    /// Address-bar form of `location` for this engine's mode and base.
    #[must_use]
    pub fn href(&self, location: &str) -> String {
        let base = self.options.base.trim_end_matches('/');
        match self.options.mode {
            HistoryMode::Hash => format!("{}/#{}", base, location),
            HistoryMode::History => format!("{}{}", base, location),
        }
    }

    /// Match `location` and follow redirects.
    ///
    /// # Errors
    ///
    /// - [`NavigationError::NotFound`] when no record accepts a path on the way
    /// - [`NavigationError::RedirectLoop`] past `max_redirects` hops
    pub fn resolve(&self, location: &str) -> Result<Resolution, NavigationError> {
        let matcher = self.matcher.load();
        let started = Instant::now();
        let mut target = location.to_string();
        let mut redirected_from: Option<String> = None;
        let mut hops = 0usize;

        loop {
            let (path, query, hash) = split_location(&target);
            let Some((record, params)) = matcher.lookup(path) else {
                warn!(
                    location = %location,
                    path = %path,
                    duration_us = started.elapsed().as_micros(),
                    "No route matched"
                );
                return Err(NavigationError::NotFound {
                    path: path.to_string(),
                });
            };

            if let Some(next) = record.redirect_target() {
                if hops == self.options.max_redirects {
                    return Err(NavigationError::RedirectLoop {
                        path: location.to_string(),
                        limit: self.options.max_redirects,
                    });
                }
                hops += 1;
                debug!(from = %target, to = %next, route = %record.full_path, "Following redirect");
                redirected_from.get_or_insert_with(|| location.to_string());
                target = carry_query_and_hash(next, query, hash);
                continue;
            }

            let resolution = Resolution {
                path: path.to_string(),
                full_path: target.clone(),
                matched: record.chain(),
                params,
                query: query.map(parse_query).unwrap_or_default(),
                hash: hash.map(str::to_string),
                redirected_from,
                record,
            };

            info!(
                location = %location,
                route_pattern = %resolution.record.full_path,
                name = ?resolution.name(),
                params = ?resolution.params,
                redirects = hops,
                duration_us = started.elapsed().as_micros(),
                "Route matched"
            );
            return Ok(resolution);
        }
    }

    /// Navigate to `location`: resolve, run guards, load the matched views
    /// and commit the new current route.
    ///
    /// Views are loaded here and nowhere else. On any error the current
    /// route is left unchanged.
    ///
    /// # Errors
    ///
    /// Everything [`Router::resolve`] reports, plus
    /// [`NavigationError::Aborted`] from a guard and
    /// [`NavigationError::ViewLoad`] from the loader.
    pub async fn push(
        &self,
        location: &str,
        loader: &dyn ViewLoader,
    ) -> Result<Navigation, NavigationError> {
        let mut to = self.resolve(location)?;
        let from = self.current.load_full();
        let guards: Vec<Arc<dyn NavigationGuard>> = self
            .guards
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut guard_redirects = 0usize;
        'guards: loop {
            for guard in &guards {
                match guard.check(&to, from.as_deref()) {
                    GuardDecision::Continue => {}
                    GuardDecision::Abort => {
                        info!(location = %to.full_path, "Navigation aborted by guard");
                        return Err(NavigationError::Aborted {
                            path: to.full_path.clone(),
                        });
                    }
                    GuardDecision::Redirect(next) => {
                        if guard_redirects == self.options.max_redirects {
                            return Err(NavigationError::RedirectLoop {
                                path: location.to_string(),
                                limit: self.options.max_redirects,
                            });
                        }
                        guard_redirects += 1;
                        debug!(from = %to.full_path, to = %next, "Guard redirected navigation");
                        let mut redirected = self.resolve(&next)?;
                        redirected.redirected_from = to
                            .redirected_from
                            .take()
                            .or_else(|| Some(location.to_string()));
                        to = redirected;
                        continue 'guards;
                    }
                }
            }
            break;
        }

        let mut views = Vec::with_capacity(to.matched.len());
        for record in &to.matched {
            if let Some(view) = &record.view {
                views.push(loader.load(view).await?);
            }
        }

        let route = Arc::new(to);
        self.current.store(Some(Arc::clone(&route)));
        info!(
            path = %route.full_path,
            views = views.len(),
            "Navigation committed"
        );

        Ok(Navigation {
            route,
            views,
            scroll: self.options.scroll_behavior.position(None),
        })
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// A redirect target without its own query or hash inherits the original ones.
fn carry_query_and_hash(target: &str, query: Option<&str>, hash: Option<&str>) -> String {
    let (_, target_query, target_hash) = split_location(target);
    let mut next = target.to_string();
    if target_query.is_some() || target_hash.is_some() {
        return next;
    }
    if let Some(query) = query {
        next.push('?');
        next.push_str(query);
    }
    if let Some(hash) = hash {
        next.push('#');
        next.push_str(hash);
    }
    next
}
