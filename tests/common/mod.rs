#![allow(dead_code, clippy::unwrap_used)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Global counter and lock for thread-safe temporary file creation
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    static TEMP_LOCK: Mutex<()> = Mutex::new(());

    /// Creates a route table file with a unique name
    pub fn create_temp_routes(content: &str, ext: &str) -> PathBuf {
        let _lock = TEMP_LOCK.lock().unwrap();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "admin_router_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_routes(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> PathBuf {
        create_temp_routes(content, "json")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            std::fs::remove_file(path).ok();
        }
    }
}

pub mod fixtures {
    /// A small table: one public page, one admin page and the catch-all
    pub const SMALL_TABLE_YAML: &str = r#"
constantRoutes:
  - path: /login
    component: views/login/index
    hidden: true
  - path: /404
    component: views/error-page/404
    hidden: true
  - path: /
    component: Layout
    redirect: /dashboard
    children:
      - path: dashboard
        name: Dashboard
        component: views/dashboard/index
        meta:
          title: Home
          icon: el-icon-s-home
          affix: true
asyncRoutes:
  - path: /reports
    component: Layout
    redirect: /reports/daily
    meta:
      title: Reports
      roles: [admin]
    children:
      - path: daily
        name: Daily
        component: views/reports/daily
        meta:
          title: Daily
  - path: "*"
    redirect: /404
    hidden: true
"#;
}
