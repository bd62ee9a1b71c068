use crate::hot_reload::watch_routes;
use crate::linter::{fail_if_errors, lint_routes, print_lint_issues, LintSeverity};
use crate::navigation::NavigationService;
use crate::otel::{init_logging_with_config, LogConfig};
use crate::permission::filter_async_routes;
use crate::router::Resolution;
use crate::routes::{read_route_table, RouteTable};
use crate::runtime_config::RuntimeConfig;
use crate::sidebar::{breadcrumbs, build_menu, MenuItem};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

/// Command-line interface for the console route table
#[derive(Parser, Debug)]
#[command(name = "admin-routes")]
#[command(about = "Inspect and check the admin console route table", long_about = None)]
pub struct Cli {
    /// Log at debug level with source locations
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint a route table
    ///
    /// Checks for duplicate sibling paths, misplaced `*` catch-alls, invalid
    /// path patterns, broken redirects and repeated route names.
    Lint {
        /// Route table file (YAML or JSON); defaults to the built-in table
        #[arg(short, long, env = "ADMIN_ROUTER_ROUTES_FILE")]
        routes: Option<PathBuf>,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the route table
    Dump {
        #[arg(short, long, env = "ADMIN_ROUTER_ROUTES_FILE")]
        routes: Option<PathBuf>,

        /// Print JSON instead of YAML
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Resolve a location against the live engine
    Resolve {
        /// Location to resolve, e.g. `/users/list?tab=1`
        path: String,

        #[arg(short, long, env = "ADMIN_ROUTER_ROUTES_FILE")]
        routes: Option<PathBuf>,

        /// Roles to grant before resolving (comma-separated)
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Print the sidebar menu for a set of roles
    Menu {
        #[arg(short, long, env = "ADMIN_ROUTER_ROUTES_FILE")]
        routes: Option<PathBuf>,

        /// Roles of the user (comma-separated)
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        roles: Vec<String>,

        /// Print JSON instead of an indented tree
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Watch a route table file and reload it on change
    Watch {
        /// Route table file to watch
        #[arg(short, long, env = "ADMIN_ROUTER_ROUTES_FILE")]
        routes: PathBuf,
    },
}

/// Parse the process arguments, set up logging and run the command.
///
/// # Errors
///
/// Returns the failing command's error.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let log_config = if cli.verbose {
        LogConfig::default_dev()
    } else {
        LogConfig::from_env()
    };
    let _log_guard = init_logging_with_config(&log_config)?;

    let stdout = std::io::stdout();
    execute(&cli, &mut stdout.lock())
}

/// Run `cli`, writing command output to `out`.
///
/// # Errors
///
/// Fails when the route table cannot be loaded, a location does not
/// resolve, or writing to `out` fails.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Commands::Lint {
            routes,
            fail_on_error,
            errors_only,
        } => {
            let table = read_table(routes.as_ref())?;
            let mut issues = lint_routes(&table.constant_routes, &table.async_routes);
            if *errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);
            if *fail_on_error {
                fail_if_errors(&issues);
            }
            Ok(())
        }
        Commands::Dump { routes, json } => {
            let table = read_table(routes.as_ref())?;
            let rendered = if *json {
                serde_json::to_string_pretty(&table)?
            } else {
                serde_yaml::to_string(&table)?
            };
            writeln!(out, "{}", rendered.trim_end())?;
            Ok(())
        }
        Commands::Resolve {
            path,
            routes,
            roles,
        } => {
            let service = load_service(routes.as_ref(), true)?;
            if !roles.is_empty() {
                service.grant(roles.as_slice());
            }
            let router = service.router();
            let resolution = router
                .resolve(path)
                .with_context(|| format!("Failed to resolve {}", path))?;
            write_resolution(out, &resolution, &router.href(&resolution.full_path))?;
            Ok(())
        }
        Commands::Menu {
            routes,
            roles,
            json,
        } => {
            let service = load_service(routes.as_ref(), false)?;
            let table = service.table();
            let mut visible = table.constant_routes.clone();
            visible.extend(filter_async_routes(&table.async_routes, roles.as_slice()));
            let menu = build_menu(&visible);
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&menu)?)?;
            } else {
                write_menu(out, &menu, 0)?;
            }
            Ok(())
        }
        Commands::Watch { routes } => {
            let service = Arc::new(load_service(Some(routes), true)?);
            let (tx, rx) = mpsc::channel();
            let _watcher = watch_routes(routes, Arc::clone(&service), move |table| {
                // the receiver lives as long as the command
                tx.send((table.constant_routes.len(), table.async_routes.len()))
                    .ok();
            })
            .with_context(|| format!("Failed to watch {}", routes.display()))?;

            writeln!(out, "👀 Watching {} (Ctrl-C to stop)", routes.display())?;
            for (constant, granted) in rx {
                writeln!(
                    out,
                    "🔄 Reloaded: {} constant route(s), {} async route(s)",
                    constant, granted
                )?;
            }
            Ok(())
        }
    }
}

/// The table at `routes`, unlinted, or the built-in one.
fn read_table(routes: Option<&PathBuf>) -> Result<RouteTable> {
    match routes {
        Some(path) => read_route_table(path),
        None => Ok(RouteTable::admin()),
    }
}

fn load_service(routes: Option<&PathBuf>, with_env_options: bool) -> Result<NavigationService> {
    let mut config = if with_env_options {
        RuntimeConfig::from_env()
    } else {
        RuntimeConfig::default()
    };
    if let Some(path) = routes {
        config.routes_file = Some(path.clone());
    }
    NavigationService::from_config(&config)
}

fn write_resolution(out: &mut dyn Write, resolution: &Resolution, href: &str) -> Result<()> {
    writeln!(out, "route:    {}", resolution.record.full_path)?;
    writeln!(out, "path:     {}", resolution.full_path)?;
    writeln!(out, "href:     {}", href)?;
    if let Some(name) = resolution.name() {
        writeln!(out, "name:     {}", name)?;
    }
    if let Some(from) = &resolution.redirected_from {
        writeln!(out, "redirected from: {}", from)?;
    }
    for (key, value) in &resolution.params {
        writeln!(out, "param:    {} = {}", key, value)?;
    }
    for (key, value) in &resolution.query {
        writeln!(out, "query:    {} = {}", key, value)?;
    }
    if let Some(roles) = &resolution.meta().roles {
        writeln!(out, "roles:    {}", roles.join(", "))?;
    }
    let crumbs = breadcrumbs(resolution);
    let trail: Vec<&str> = crumbs.iter().map(|c| c.title.as_str()).collect();
    if !trail.is_empty() {
        writeln!(out, "crumbs:   {}", trail.join(" / "))?;
    }
    Ok(())
}

fn write_menu(out: &mut dyn Write, items: &[MenuItem], depth: usize) -> Result<()> {
    for item in items {
        let icon = item.icon.as_deref().unwrap_or("-");
        writeln!(
            out,
            "{}{} [{}] {}",
            "  ".repeat(depth),
            item.title,
            icon,
            item.path
        )?;
        write_menu(out, &item.children, depth + 1)?;
    }
    Ok(())
}
