//! Unit tests for CLI commands

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    execute(&cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "admin-routes",
        "lint",
        "--routes",
        "routes.yaml",
        "--fail-on-error",
        "--errors-only",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            routes,
            fail_on_error,
            errors_only,
        } => {
            assert_eq!(routes.unwrap().to_string_lossy(), "routes.yaml");
            assert!(fail_on_error);
            assert!(errors_only);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_roles_are_comma_separated() {
    let cli = Cli::try_parse_from(["admin-routes", "menu", "--roles", "admin,editor"]).unwrap();
    match cli.command {
        Commands::Menu { roles, json, .. } => {
            assert_eq!(roles, vec!["admin".to_string(), "editor".to_string()]);
            assert!(!json);
        }
        _ => panic!("Expected Menu command"),
    }
}

#[test]
fn test_resolve_requires_path() {
    assert!(Cli::try_parse_from(["admin-routes", "resolve"]).is_err());
    assert!(Cli::try_parse_from(["admin-routes", "unknown"]).is_err());
}

#[test]
fn test_resolve_prints_redirected_route() {
    let output = run(&["admin-routes", "resolve", "/"]);
    assert!(output.contains("path:     /dashboard"));
    assert!(output.contains("name:     Dashboard"));
    assert!(output.contains("redirected from: /"));
}

#[test]
fn test_resolve_unknown_path_after_grant() {
    let output = run(&["admin-routes", "resolve", "/unknown-xyz", "--roles", "admin"]);
    assert!(output.contains("route:    /404"));
}

#[test]
fn test_resolve_unknown_path_without_roles_fails() {
    let cli = Cli::try_parse_from(["admin-routes", "resolve", "/unknown-xyz"]).unwrap();
    let err = execute(&cli, &mut Vec::<u8>::new()).unwrap_err();
    assert!(format!("{:#}", err).contains("no route matches"));
}

#[test]
fn test_menu_tree_output() {
    let output = run(&["admin-routes", "menu"]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "首页 [el-icon-s-home] /dashboard");
    assert!(lines.contains(&"  用户列表 [el-icon-user-solid] /users/list"));
}

#[test]
fn test_dump_json_round_trips() {
    let output = run(&["admin-routes", "dump", "--json"]);
    let table: crate::routes::RouteTable = serde_json::from_str(&output).unwrap();
    assert_eq!(table, crate::routes::RouteTable::admin());
}

#[test]
fn test_dump_reads_file_without_linting() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"constantRoutes":[{{"path":"*","redirect":"/404"}}],"asyncRoutes":[]}}"#
    )
    .unwrap();
    let path = file.path().to_string_lossy().to_string();
    let output = run(&["admin-routes", "dump", "--routes", &path]);
    assert!(output.contains("path: '*'") || output.contains("path: \"*\""));
}
