#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the route table linter

use crate::linter::{has_errors, lint_routes, LintIssue, LintSeverity};
use crate::routes::{async_routes, constant_routes, RouteDescriptor, ViewRef};

fn page(path: &str) -> RouteDescriptor {
    RouteDescriptor::view(path, ViewRef::lazy("views/page"))
}

fn catch_all() -> RouteDescriptor {
    RouteDescriptor::redirect_only("*", "/404").hide()
}

fn of_kind<'a>(issues: &'a [LintIssue], kind: &str) -> Vec<&'a LintIssue> {
    issues.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn test_shipped_table_has_no_errors() {
    let issues = lint_routes(constant_routes(), async_routes());
    assert!(!has_errors(&issues), "unexpected errors: {:?}", issues);
    assert!(of_kind(&issues, "dangling_redirect").is_empty());

    // `List` and `Add` are reused across sections
    let names = of_kind(&issues, "duplicate_route_name");
    assert!(!names.is_empty());
    assert!(names.iter().all(|i| i.severity == LintSeverity::Warning));
    assert!(names
        .iter()
        .any(|i| i.location == "constantRoutes:/goods/list"));
}

#[test]
fn test_duplicate_sibling_path() {
    let routes = vec![RouteDescriptor::section(
        "/users",
        ViewRef::Layout,
        vec![page("list"), page("list")],
    )];
    let issues = lint_routes(&routes, &[]);
    let dupes = of_kind(&issues, "duplicate_sibling_path");
    assert_eq!(dupes.len(), 1);
    assert_eq!(dupes[0].location, "constantRoutes:/users/list");
    assert_eq!(dupes[0].severity, LintSeverity::Error);
}

#[test]
fn test_same_path_in_different_sections_is_fine() {
    let routes = vec![
        RouteDescriptor::section("/users", ViewRef::Layout, vec![page("list")]),
        RouteDescriptor::section("/goods", ViewRef::Layout, vec![page("list")]),
    ];
    assert!(of_kind(&lint_routes(&routes, &[]), "duplicate_sibling_path").is_empty());
}

#[test]
fn test_wildcard_placement() {
    let issues = lint_routes(&[catch_all()], &[catch_all(), page("/late")]);
    assert_eq!(of_kind(&issues, "wildcard_in_constant_routes").len(), 1);
    let misplaced = of_kind(&issues, "wildcard_not_last");
    assert_eq!(misplaced.len(), 1);
    assert_eq!(misplaced[0].location, "asyncRoutes[0]");
    assert!(misplaced[0].suggestion.is_some());
}

#[test]
fn test_invalid_path_pattern() {
    let issues = lint_routes(&[page("/files/:name(.*")], &[]);
    let invalid = of_kind(&issues, "invalid_path_pattern");
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].severity, LintSeverity::Error);
}

#[test]
fn test_redirect_route_without_target() {
    let route = RouteDescriptor::redirect_only("/old", "/new").without_redirect();
    let issues = lint_routes(&[route, page("/new")], &[]);
    assert_eq!(of_kind(&issues, "missing_redirect_target").len(), 1);
}

#[test]
fn test_relative_and_dangling_redirects() {
    let routes = vec![
        page("/home").redirect_to("dashboard"),
        RouteDescriptor::redirect_only("/legacy", "/gone"),
    ];
    let issues = lint_routes(&routes, &[]);

    let relative = of_kind(&issues, "relative_redirect");
    assert_eq!(relative.len(), 1);
    assert_eq!(relative[0].suggestion.as_deref(), Some("use '/dashboard'"));

    let dangling = of_kind(&issues, "dangling_redirect");
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].location, "route:/legacy");
    assert!(!has_errors(&issues));
}

#[test]
fn test_dangling_redirect_is_found_behind_catch_all() {
    let constant = vec![
        RouteDescriptor::redirect_only("/legacy", "/gone"),
        RouteDescriptor::redirect_only("/old-404", "/404?from=old"),
        page("/404"),
    ];
    let issues = lint_routes(&constant, &[catch_all()]);

    let dangling = of_kind(&issues, "dangling_redirect");
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].location, "route:/legacy");
}

#[test]
fn test_duplicate_names_point_at_first_record() {
    let routes = vec![page("/a").named("Page"), page("/b").named("Page")];
    let issues = lint_routes(&routes, &[]);
    let names = of_kind(&issues, "duplicate_route_name");
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].location, "constantRoutes:/b");
    assert!(names[0].message.contains("'/a'"));
}
