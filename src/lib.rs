//! # partroute
//!
//! **partroute** matches request paths against a tree of named routes and assembles paths
//! back from a route name and parameters. It is the path-routing core of a request
//! dispatcher: HTTP methods, hosts and schemes are out of scope.
//!
//! ## Overview
//!
//! A route tree is made of four kinds of node:
//!
//! - **Literal** - fixed text such as `/foo`
//! - **Segment** - a pattern such as `/:controller[/:action]` with named placeholders,
//!   nested optional groups, per-placeholder regex constraints and defaults
//! - **Wildcard** - the remainder of the path as key/value pairs (`/k1/v1/k2/v2`)
//! - **Part** - a base route followed by an ordered set of named children
//!
//! Matching is a depth-first descent with no backtracking across children: the first child
//! that matches wins. Assembling walks the same tree along a slash-separated name such as
//! `baz/bat`, forcing optional groups of every route but the last so that child output is
//! never attached to an elided prefix.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Segment pattern grammar, the compiled token tree and a shared cache
//! - **[`router`]** - The four route types, [`MatchResult`] and the compiled tree
//! - **[`config`]** - Declarative route definitions (YAML, TOML, JSON) and their compiler
//! - **[`error`]** - [`RouteError`] and its coarse [`ErrorKind`]
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`runtime_config`]** - Environment-driven tuning knobs
//! - **[`cli`]** - The `partroute` command-line tool
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Tree as CompiledRoute
//!     participant Part as PartRoute
//!     participant Base as Segment base
//!     participant Child as Child routes
//!
//!     Caller->>Tree: match_path("/blog/hello?x=1", None)
//!     Tree->>Tree: strip query string
//!     Tree->>Part: match_at(path, 0)
//!     Part->>Base: match_at(path, 0)
//!     Base-->>Part: length 5, params
//!     Part->>Child: match_at(path, 5) in declaration order
//!     Child-->>Part: first match wins
//!     Part-->>Tree: merged MatchResult
//!     Tree->>Tree: require full consumption
//!     Tree-->>Caller: Some(MatchResult)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use partroute::config::{compile, RouteDefinition};
//!
//! let yaml = r#"
//! type: literal
//! options:
//!   route: /blog
//! may_terminate: true
//! child_routes:
//!   post:
//!     type: segment
//!     options:
//!       route: "/:slug[.:format]"
//!       constraints: { slug: "[a-z-]+" }
//! "#;
//!
//! let definition: RouteDefinition = serde_yaml::from_str(yaml).unwrap();
//! let routes = compile(&definition).unwrap();
//!
//! let m = routes.match_path("/blog/hello-world.json", None).unwrap();
//! assert_eq!(m.matched_route_name().as_deref(), Some("post"));
//! assert_eq!(m.param("slug"), Some("hello-world"));
//! assert_eq!(m.param("format"), Some("json"));
//!
//! let assembly = routes.assemble(m.params(), Some("post")).unwrap();
//! assert_eq!(assembly.path, "/blog/hello-world.json");
//! ```
//!
//! ## Concurrency
//!
//! A compiled tree is immutable and `Send + Sync`; share it behind an `Arc` and match from
//! any number of threads. The only shared mutable state is the pattern cache, which is a
//! lock-free concurrent map.
//!
//! ## Configuration
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `PARTROUTE_PATTERN_CACHE` | `on` | Reuse compiled segment patterns |
//! | `PARTROUTE_SLOW_MATCH_US` | `1000` | Threshold for slow-match warnings |
//! | `PARTROUTE_LOG_LEVEL` | `info` | Log level |
//! | `PARTROUTE_LOG_FORMAT` | `json` | `json` or `pretty` |

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod router;
pub mod runtime_config;

pub use config::{compile, load_routes, RouteDefinition};
pub use error::{ErrorKind, RouteError};
pub use router::{Assembly, CompiledRoute, MatchResult, Params};
