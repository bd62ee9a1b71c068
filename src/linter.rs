//! # Route Table Linter
//!
//! Static checks over the console's route tables. Nothing here runs during
//! navigation; configuration defects are caught by `admin-routes lint`, by
//! [`load_route_table`](crate::routes::load_route_table) and by the test suite.
//!
//! ## Checks Performed
//!
//! 1. **duplicate_sibling_path** - two siblings declare the same `path`
//! 2. **wildcard_not_last** - the `*` catch-all is not the final async route
//! 3. **wildcard_in_constant_routes** - a catch-all among the public routes
//! 4. **invalid_path_pattern** - a path that does not compile
//! 5. **missing_redirect_target** - a view-less route without a redirect
//! 6. **duplicate_route_name** - two records share a `name`
//! 7. **relative_redirect** - a redirect target without a leading `/`
//! 8. **dangling_redirect** - a redirect target no record matches
//!
//! ## Usage
//!
//! ```rust
//! use admin_router::linter::{lint_routes, LintSeverity};
//! use admin_router::routes::{async_routes, constant_routes};
//!
//! let issues = lint_routes(constant_routes(), async_routes());
//! assert!(issues.iter().all(|i| i.severity != LintSeverity::Error));
//! ```

use crate::router::RouteMatcher;
use crate::routes::{join_paths, split_location, Redirect, RouteDescriptor, RouteKind, RoutePath};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[cfg(test)]
mod tests;

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Error - the table must not be loaded
    Error,
    /// Warning - loads, but behaves surprisingly
    Warning,
    /// Info - convention suggestion
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in a route table
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "constantRoutes:/users/list")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "duplicate_sibling_path")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

const CONSTANT: &str = "constantRoutes";
const ASYNC: &str = "asyncRoutes";

/// Lint both route lists of a table
#[must_use]
pub fn lint_routes(constant: &[RouteDescriptor], async_routes: &[RouteDescriptor]) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    lint_siblings(&mut issues, CONSTANT, "", constant);
    lint_siblings(&mut issues, ASYNC, "", async_routes);

    if let Some(index) = async_routes.iter().position(|r| r.path == "*") {
        if index + 1 != async_routes.len() {
            issues.push(
                LintIssue::new(
                    format!("{}[{}]", ASYNC, index),
                    LintSeverity::Error,
                    "wildcard_not_last",
                    "the '*' catch-all must be the last async route",
                )
                .with_suggestion("move the '*' route to the end of asyncRoutes"),
            );
        }
    }
    for (index, route) in constant.iter().enumerate() {
        if route.path == "*" {
            issues.push(
                LintIssue::new(
                    format!("{}[{}]", CONSTANT, index),
                    LintSeverity::Error,
                    "wildcard_in_constant_routes",
                    "the '*' catch-all belongs in asyncRoutes",
                )
                .with_suggestion("declare the catch-all as the last async route"),
            );
        }
    }

    lint_names(&mut issues, constant, async_routes);
    lint_redirect_targets(&mut issues, constant, async_routes);

    issues
}

fn lint_siblings(
    issues: &mut Vec<LintIssue>,
    list: &str,
    parent: &str,
    routes: &[RouteDescriptor],
) {
    let mut seen = HashSet::with_capacity(routes.len());
    for route in routes {
        let full_path = join_paths(parent, &route.path);
        let location = format!("{}:{}", list, full_path);

        if !seen.insert(route.path.as_str()) {
            issues.push(
                LintIssue::new(
                    &location,
                    LintSeverity::Error,
                    "duplicate_sibling_path",
                    format!("path '{}' is declared twice among its siblings", route.path),
                )
                .with_suggestion("merge the two records or give one a distinct path"),
            );
        }

        if let Err(err) = RoutePath::parse(&full_path) {
            issues.push(LintIssue::new(
                &location,
                LintSeverity::Error,
                "invalid_path_pattern",
                err.to_string(),
            ));
        }

        match (&route.kind, &route.redirect) {
            (RouteKind::Redirect, Some(Redirect::To(_))) => {}
            (RouteKind::Redirect, _) => issues.push(LintIssue::new(
                &location,
                LintSeverity::Error,
                "missing_redirect_target",
                "route renders no view and does not redirect anywhere",
            )),
            _ => {}
        }

        if let Some(target) = route.redirect_target() {
            if !target.starts_with('/') {
                issues.push(
                    LintIssue::new(
                        &location,
                        LintSeverity::Warning,
                        "relative_redirect",
                        format!("redirect target '{}' is not absolute", target),
                    )
                    .with_suggestion(format!("use '/{}'", target)),
                );
            }
        }

        lint_siblings(issues, list, &full_path, route.children());
    }
}

fn lint_names(
    issues: &mut Vec<LintIssue>,
    constant: &[RouteDescriptor],
    async_routes: &[RouteDescriptor],
) {
    let mut first_seen: HashMap<&str, String> = HashMap::new();
    let mut stack: Vec<(&str, String, &RouteDescriptor)> = Vec::new();
    // reversed so the walk visits records in declaration order
    for route in async_routes.iter().rev() {
        stack.push((ASYNC, String::new(), route));
    }
    for route in constant.iter().rev() {
        stack.push((CONSTANT, String::new(), route));
    }

    while let Some((list, parent, route)) = stack.pop() {
        let full_path = join_paths(&parent, &route.path);
        if let Some(name) = route.name.as_deref() {
            match first_seen.get(name) {
                Some(original) => issues.push(
                    LintIssue::new(
                        format!("{}:{}", list, full_path),
                        LintSeverity::Warning,
                        "duplicate_route_name",
                        format!(
                            "name '{}' is already used by '{}'; lookups by name resolve to the first",
                            name, original
                        ),
                    )
                    .with_suggestion("give each record a unique name"),
                ),
                None => {
                    first_seen.insert(name, full_path.clone());
                }
            }
        }
        for child in route.children().iter().rev() {
            stack.push((list, full_path.clone(), child));
        }
    }
}

fn lint_redirect_targets(
    issues: &mut Vec<LintIssue>,
    constant: &[RouteDescriptor],
    async_routes: &[RouteDescriptor],
) {
    let mut all = constant.to_vec();
    all.extend(async_routes.iter().cloned());
    let matcher = RouteMatcher::new(&all);

    for record in matcher.records() {
        let Some(target) = record.redirect_target() else {
            continue;
        };
        if !target.starts_with('/') {
            continue;
        }
        let (path, _, _) = split_location(target);
        // landing on the `*` catch-all means no real route accepts the target
        let resolves = matcher
            .lookup(path)
            .is_some_and(|(found, _)| !found.path.is_catch_all());
        if !resolves {
            issues.push(LintIssue::new(
                format!("route:{}", record.full_path),
                LintSeverity::Warning,
                "dangling_redirect",
                format!("redirect target '{}' matches no route", target),
            ));
        }
    }
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let errors: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .collect();
    let warnings: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Warning)
        .collect();
    let infos: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Info)
        .collect();

    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        errors.len(),
        warnings.len(),
        infos.len()
    );

    print_group("❌ Errors (must fix):", &errors);
    print_group("⚠️  Warnings (should fix):", &warnings);
    print_group("ℹ️  Info (conventions):", &infos);
}

fn print_group(heading: &str, issues: &[&LintIssue]) {
    if issues.is_empty() {
        return;
    }
    println!("{}", heading);
    for issue in issues {
        println!("   [{}] {}", issue.kind, issue.location);
        println!("      {}", issue.message);
        if let Some(suggestion) = &issue.suggestion {
            println!("      💡 Suggestion: {}", suggestion);
        }
    }
    println!();
}

/// Whether any issue is error-level
#[must_use]
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Exit with error code if there are any error-level lint issues
pub fn fail_if_errors(issues: &[LintIssue]) {
    if has_errors(issues) {
        print_lint_issues(issues);
        std::process::exit(1);
    }
}
