//! # CLI Module
//!
//! Command-line access to the console's route table: linting, dumping,
//! resolving locations and rendering the sidebar for a set of roles.
//!
//! ## Commands
//!
//! ### `lint`
//!
//! Check a route table for structural problems:
//!
//! ```bash
//! admin-routes lint --routes config/routes.yaml --fail-on-error
//! ```
//!
//! Options:
//! - `--routes <FILE>` - YAML or JSON route table (default: the built-in table)
//! - `--fail-on-error` - Exit non-zero when errors are found
//! - `--errors-only` - Hide warnings
//!
//! ### `dump`
//!
//! Print the route table as YAML, or JSON with `--json`.
//!
//! ### `resolve`
//!
//! Resolve a location the way a navigation would, after granting `--roles`:
//!
//! ```bash
//! admin-routes resolve /users/list --roles admin
//! ```
//!
//! ### `menu`
//!
//! Print the sidebar a user with `--roles` would see.
//!
//! ### `watch`
//!
//! Reload a route table file on every change and report the result.
//!
//! Every command reads `ADMIN_ROUTER_ROUTES_FILE` when `--routes` is absent,
//! and the engine options from the other `ADMIN_ROUTER_*` variables.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use admin_router::cli::{Cli, run_cli};
//!
//! run_cli()?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
