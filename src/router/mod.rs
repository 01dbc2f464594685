//! # Router Module
//!
//! The router module matches request paths against a tree of named routes and
//! performs the inverse operation: given a route name and parameters, it
//! regenerates the path that would have matched.
//!
//! ## Overview
//!
//! A tree is built from four kinds of node:
//!
//! - [`LiteralRoute`] - fixed text such as `/foo`
//! - [`SegmentRoute`] - a pattern such as `/bat[/:foo]` with named
//!   placeholders and nested optional groups
//! - [`WildcardRoute`] - the rest of the path as key/value pairs
//! - [`PartRoute`] - one of the above as a base, followed by an ordered set
//!   of named children (which may be parts themselves)
//!
//! ## Matching
//!
//! A part route matches its base, then tries its children in declaration
//! order at the position the base stopped. The first child that matches wins;
//! there is no backtracking into later children. If no child matches, the
//! part's base result stands on its own only when the part may terminate.
//! The outermost call must consume the whole path.
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Part as PartRoute ("/foo")
//!     participant Base as LiteralRoute
//!     participant Child as SegmentRoute ("/:controller")
//!
//!     Caller->>Part: match_path("/foo/bar", None)
//!     Part->>Base: match_at(path, 0)
//!     Base-->>Part: length 4, {controller: foo}
//!     Part->>Child: match_at(path, 4)
//!     Child-->>Part: length 4, {controller: bar}
//!     Part-->>Caller: length 8, name "bar", {controller: bar}
//! ```
//!
//! ## Assembling
//!
//! `assemble(params, Some("baz/bat"))` renders the base of each route on the
//! name path and appends the named child's output. Parameters consumed by a
//! base are not handed down to its child. Optional groups are forced on every
//! route except the last one of the name path.
//!
//! ## Example
//!
//! ```rust
//! use indexmap::IndexMap;
//! use partroute::router::{CompiledRoute, LiteralRoute, PartRoute, SegmentRoute};
//!
//! let route: CompiledRoute = PartRoute::new(LiteralRoute::new("/blog"), true, IndexMap::new())
//!     .unwrap()
//!     .with_child("post", SegmentRoute::new("/:slug").unwrap())
//!     .into();
//!
//! let m = route.match_path("/blog/hello", None).unwrap();
//! assert_eq!(m.matched_route_name().as_deref(), Some("post"));
//! assert_eq!(m.param("slug"), Some("hello"));
//!
//! let path = route.assemble(m.params(), m.matched_route_name().as_deref()).unwrap().path;
//! assert_eq!(path, "/blog/hello");
//! ```

mod core;
mod literal;
mod part;
mod route_match;
mod segment;
mod wildcard;

pub use core::{Assembly, CompiledRoute};
pub use literal::LiteralRoute;
pub use part::{BaseRoute, PartRoute};
pub use route_match::{MatchResult, Params, RouteName, MAX_INLINE_NAME_SEGMENTS};
pub use segment::SegmentRoute;
pub use wildcard::{WildcardRoute, DEFAULT_KEY_VALUE_DELIMITER, DEFAULT_PARAM_DELIMITER};
