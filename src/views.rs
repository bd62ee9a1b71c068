//! # Lazy View Resolution
//!
//! Route records name their view by module path ([`ViewRef::Lazy`]) rather
//! than holding it. The engine asks a [`ViewLoader`] for each view of the
//! matched chain, outermost first, and only while committing a navigation in
//! [`Router::push`](crate::router::Router::push). Nothing is resolved when a
//! table is built, reset or looked up.
//!
//! Loaders do not cache. Wrap one in [`CachingViewLoader`] to reuse handles
//! across navigations.

use crate::error::ViewLoadError;
use crate::routes::{RouteDescriptor, ViewRef};
use dashmap::DashMap;
use futures::future::{self, BoxFuture, FutureExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// A resolved view, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    pub view: ViewRef,
}

/// Asynchronous view resolution contract
pub trait ViewLoader: Send + Sync {
    /// Resolve `view`. Called once per matched record on every navigation.
    fn load<'a>(&'a self, view: &'a ViewRef) -> BoxFuture<'a, Result<ViewHandle, ViewLoadError>>;
}

/// Resolves views against a fixed set of registered module paths
///
/// The layout shell always resolves.
#[derive(Debug, Default)]
pub struct StaticViewLoader {
    modules: HashSet<String>,
    loads: AtomicUsize,
}

impl StaticViewLoader {
    #[must_use]
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Register every lazy view referenced by `routes`, recursively.
    #[must_use]
    pub fn from_routes(routes: &[RouteDescriptor]) -> Self {
        let mut modules = Vec::new();
        collect_modules(routes, &mut modules);
        Self::new(modules)
    }

    /// Number of `load` calls served so far, successful or not.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

fn collect_modules(routes: &[RouteDescriptor], out: &mut Vec<String>) {
    for route in routes {
        if let Some(ViewRef::Lazy(module)) = route.view_ref() {
            out.push(module.clone());
        }
        collect_modules(route.children(), out);
    }
}

impl ViewLoader for StaticViewLoader {
    fn load<'a>(&'a self, view: &'a ViewRef) -> BoxFuture<'a, Result<ViewHandle, ViewLoadError>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let result = match view {
            ViewRef::Layout => Ok(ViewHandle { view: view.clone() }),
            ViewRef::Lazy(module) if self.modules.contains(module) => {
                debug!(view = %module, "View resolved");
                Ok(ViewHandle { view: view.clone() })
            }
            ViewRef::Lazy(module) => Err(ViewLoadError::UnknownView {
                view: module.clone(),
            }),
        };
        future::ready(result).boxed()
    }
}

/// Memoizes another loader's successful resolutions
///
/// Failures are not cached; the next navigation retries them.
pub struct CachingViewLoader<L> {
    inner: L,
    cache: DashMap<ViewRef, ViewHandle>,
}

impl<L: ViewLoader> CachingViewLoader<L> {
    #[must_use]
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }

    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached handle, e.g. after a route table reload.
    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl<L: ViewLoader> ViewLoader for CachingViewLoader<L> {
    fn load<'a>(&'a self, view: &'a ViewRef) -> BoxFuture<'a, Result<ViewHandle, ViewLoadError>> {
        async move {
            if let Some(hit) = self.cache.get(view) {
                return Ok(hit.value().clone());
            }
            let handle = self.inner.load(view).await?;
            self.cache.insert(view.clone(), handle.clone());
            Ok(handle)
        }
        .boxed()
    }
}
