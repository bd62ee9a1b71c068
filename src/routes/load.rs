use super::types::RouteTable;
use crate::linter::{lint_routes, LintSeverity};
use anyhow::{bail, Context};
use std::path::Path;
use tracing::{info, warn};

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

/// Parse a route table from YAML or JSON text.
pub fn parse_route_table(content: &str, yaml: bool) -> anyhow::Result<RouteTable> {
    let table: RouteTable = if yaml {
        serde_yaml::from_str(content).context("invalid YAML route table")?
    } else {
        serde_json::from_str(content).context("invalid JSON route table")?
    };
    Ok(table)
}

/// Read and parse a route table file without linting it.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
pub fn read_route_table(path: &Path) -> anyhow::Result<RouteTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route table {}", path.display()))?;
    parse_route_table(&content, is_yaml(path))
        .with_context(|| format!("failed to parse route table {}", path.display()))
}

/// Load a route table file and reject it when lint errors are found.
///
/// Warnings are logged and do not block loading.
pub fn load_route_table(path: &Path) -> anyhow::Result<RouteTable> {
    let table = read_route_table(path)?;

    let issues = lint_routes(&table.constant_routes, &table.async_routes);
    let mut errors = 0usize;
    for issue in &issues {
        match issue.severity {
            LintSeverity::Error => errors += 1,
            _ => warn!(
                kind = %issue.kind,
                location = %issue.location,
                "{}",
                issue.message
            ),
        }
    }
    if errors > 0 {
        let first = issues
            .iter()
            .find(|i| i.severity == LintSeverity::Error)
            .map(|i| format!("[{}] {}: {}", i.kind, i.location, i.message))
            .unwrap_or_default();
        bail!(
            "route table {} has {} error(s); first: {}",
            path.display(),
            errors,
            first
        );
    }

    info!(
        path = %path.display(),
        constant_routes = table.constant_routes.len(),
        async_routes = table.async_routes.len(),
        "Route table loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_json_table() {
        let table = parse_route_table(
            r#"{"constantRoutes":[{"path":"/login","component":"views/login/index"}],
               "asyncRoutes":[{"path":"*","redirect":"/404","hidden":true}]}"#,
            false,
        )
        .unwrap();
        assert_eq!(table.constant_routes.len(), 1);
        assert_eq!(table.async_routes[0].redirect_target(), Some("/404"));
    }

    #[test]
    fn test_load_rejects_lint_errors() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            r#"
constantRoutes:
  - path: /login
    component: views/login/index
  - path: /login
    component: views/login/other
asyncRoutes: []
"#
        )
        .unwrap();

        let err = load_route_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate_sibling_path"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_route_table(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read route table"));
    }
}
