use std::fmt;

/// Route path pattern error
///
/// Returned by [`RoutePath::parse`](crate::routes::RoutePath::parse) when a
/// path cannot be compiled into matcher segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPatternError {
    /// A `:` segment without a parameter name (e.g. `/users/:`)
    EmptyParamName {
        /// The offending path
        path: String,
    },
    /// A pattern parameter whose parenthesis is never closed (e.g. `:id(\d+`)
    UnbalancedPattern {
        /// The offending path
        path: String,
    },
    /// The regex inside `:name(...)` does not compile
    InvalidRegex {
        /// The offending path
        path: String,
        /// Compiler message from the regex crate
        reason: String,
    },
    /// `*` used anywhere but as the final segment
    MisplacedWildcard {
        /// The offending path
        path: String,
    },
}

impl fmt::Display for PathPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPatternError::EmptyParamName { path } => {
                write!(f, "route path '{}' declares a parameter without a name", path)
            }
            PathPatternError::UnbalancedPattern { path } => {
                write!(f, "route path '{}' has an unclosed parameter pattern", path)
            }
            PathPatternError::InvalidRegex { path, reason } => {
                write!(f, "route path '{}' has an invalid parameter pattern: {}", path, reason)
            }
            PathPatternError::MisplacedWildcard { path } => {
                write!(
                    f,
                    "route path '{}' uses '*' before the final segment; the catch-all must come last",
                    path
                )
            }
        }
    }
}

impl std::error::Error for PathPatternError {}

/// Failure to resolve a lazily loaded view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLoadError {
    /// The loader has no module registered under this id
    UnknownView {
        /// Module path of the view (e.g. `views/users/list/index`)
        view: String,
    },
    /// The loader knows the view but could not produce it
    Failed {
        /// Module path of the view
        view: String,
        /// Loader-supplied reason
        reason: String,
    },
}

impl fmt::Display for ViewLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewLoadError::UnknownView { view } => write!(f, "no view registered for '{}'", view),
            ViewLoadError::Failed { view, reason } => {
                write!(f, "failed to load view '{}': {}", view, reason)
            }
        }
    }
}

impl std::error::Error for ViewLoadError {}

/// Navigation failure reported by [`Router::resolve`](crate::router::Router::resolve)
/// and [`Router::push`](crate::router::Router::push)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No record in the live match table accepts the path
    NotFound {
        /// Path that was looked up
        path: String,
    },
    /// Redirects kept going past the configured limit
    RedirectLoop {
        /// Location the navigation started from
        path: String,
        /// Configured redirect limit
        limit: usize,
    },
    /// A navigation guard cancelled the navigation
    Aborted {
        /// Resolved target path
        path: String,
    },
    /// A matched record's view could not be loaded
    ViewLoad(ViewLoadError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::NotFound { path } => write!(f, "no route matches '{}'", path),
            NavigationError::RedirectLoop { path, limit } => write!(
                f,
                "navigation to '{}' exceeded {} redirects",
                path, limit
            ),
            NavigationError::Aborted { path } => {
                write!(f, "navigation to '{}' was aborted by a guard", path)
            }
            NavigationError::ViewLoad(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigationError::ViewLoad(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewLoadError> for NavigationError {
    fn from(err: ViewLoadError) -> Self {
        NavigationError::ViewLoad(err)
    }
}
