#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use admin_router::linter::{has_errors, lint_routes};
use admin_router::routes::{
    async_routes, constant_routes, load_route_table, parse_route_table, Redirect, RouteKind,
    RouteTable, ViewRef,
};

mod common;
use common::{fixtures, temp_files};

#[test]
fn test_shipped_table_round_trips_through_yaml() {
    let yaml = serde_yaml::to_string(&RouteTable::admin()).unwrap();
    let path = temp_files::create_temp_yaml(&yaml);

    let loaded = load_route_table(&path).unwrap();
    assert_eq!(loaded.constant_routes, constant_routes());
    assert_eq!(loaded.async_routes, async_routes());

    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_shipped_table_round_trips_through_json() {
    let json = serde_json::to_string_pretty(&RouteTable::admin()).unwrap();
    let path = temp_files::create_temp_json(&json);
    assert_eq!(load_route_table(&path).unwrap(), RouteTable::admin());
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_serialized_shape_uses_console_field_names() {
    let json = serde_json::to_value(&RouteTable::admin()).unwrap();
    let users = &json["constantRoutes"][6];
    assert_eq!(users["path"], "/users");
    assert_eq!(users["component"], "Layout");
    assert_eq!(users["redirect"], "/users");
    assert_eq!(users["meta"]["roles"][0], "admin");
    assert_eq!(users["children"][1]["name"], "List");
    assert!(users.get("hidden").is_none());
}

#[test]
fn test_fixture_table_parses() {
    let table = parse_route_table(fixtures::SMALL_TABLE_YAML, true).unwrap();
    assert!(!has_errors(&lint_routes(
        &table.constant_routes,
        &table.async_routes
    )));

    let root = &table.constant_routes[2];
    assert_eq!(root.redirect, Some(Redirect::To("/dashboard".to_string())));
    match &root.kind {
        RouteKind::Section { layout, children } => {
            assert_eq!(*layout, ViewRef::Layout);
            assert_eq!(children[0].name.as_deref(), Some("Dashboard"));
            assert!(children[0].meta.affix);
        }
        other => panic!("expected a section, got {:?}", other),
    }
    assert_eq!(table.async_routes.last().unwrap().path, "*");
    assert!(matches!(table.async_routes[1].kind, RouteKind::Redirect));
}

#[test]
fn test_no_redirect_marker_parses() {
    let table = parse_route_table(
        r#"{"constantRoutes":[{"path":"/docs","component":"Layout","redirect":"noRedirect",
            "children":[{"path":"guide","component":"views/docs/guide","meta":{"title":"Guide"}}]}]}"#,
        false,
    )
    .unwrap();
    assert_eq!(table.constant_routes[0].redirect, Some(Redirect::NoRedirect));
    assert!(table.async_routes.is_empty());
}

#[test]
fn test_invalid_yaml_is_reported_with_path() {
    let path = temp_files::create_temp_yaml("constantRoutes: [ { path: ");
    let err = load_route_table(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("failed to parse route table"));
    assert!(message.contains(&path.display().to_string()));
    temp_files::cleanup_temp_files(&[path]);
}
