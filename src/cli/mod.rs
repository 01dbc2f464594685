//! # CLI Module
//!
//! Command-line access to a route tree described in a YAML, TOML or JSON
//! definition file.
//!
//! ## Commands
//!
//! ### `match`
//!
//! Match a path and print the route name, consumed length and parameters.
//! Exits with status 1 when nothing matches.
//!
//! ```bash
//! partroute match --routes routes.yaml /foo/bar
//! partroute match --routes routes.yaml --offset 4 /pre/foo/bar
//! ```
//!
//! ### `assemble`
//!
//! Generate the path for a route name:
//!
//! ```bash
//! partroute assemble --routes routes.yaml --name baz/bat --param foo=x
//! ```
//!
//! ### `routes`
//!
//! List every route name the tree can assemble:
//!
//! ```bash
//! partroute routes --routes routes.yaml
//! ```
//!
//! Every command accepts `--json` for machine-readable output, plus
//! `--log-level` and `--log-format` (logs go to stderr).

mod commands;


pub use commands::{run_cli, Cli, Commands};
