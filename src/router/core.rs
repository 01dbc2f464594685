//! Router core: the compiled route tree and its two entry points.
//!
//! `match_path` turns a request path into a [`MatchResult`]; `assemble`
//! turns a route name and parameters back into the path that would match.

use std::time::Instant;

use tracing::{debug, warn};

use super::literal::LiteralRoute;
use super::part::{BaseRoute, PartRoute};
use super::route_match::{MatchResult, Params};
use super::segment::SegmentRoute;
use super::wildcard::WildcardRoute;
use crate::error::RouteError;
use crate::runtime_config::RuntimeConfig;

/// Output of an assemble call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// The generated path
    pub path: String,
    /// Names of the supplied parameters that were rendered into `path`, in
    /// the order they were consumed
    pub assembled_params: Vec<String>,
}

/// A compiled route tree node.
///
/// Trees are immutable once built and hold no interior state, so a tree can
/// be shared across threads and matched concurrently without locking.
#[derive(Debug, Clone)]
pub enum CompiledRoute {
    /// Fixed text
    Literal(LiteralRoute),
    /// Segment pattern with placeholders and optional groups
    Segment(SegmentRoute),
    /// Trailing key/value pairs
    Wildcard(WildcardRoute),
    /// Base matcher plus ordered named children
    Part(PartRoute),
}

impl From<LiteralRoute> for CompiledRoute {
    fn from(route: LiteralRoute) -> Self {
        CompiledRoute::Literal(route)
    }
}

impl From<SegmentRoute> for CompiledRoute {
    fn from(route: SegmentRoute) -> Self {
        CompiledRoute::Segment(route)
    }
}

impl From<WildcardRoute> for CompiledRoute {
    fn from(route: WildcardRoute) -> Self {
        CompiledRoute::Wildcard(route)
    }
}

impl From<PartRoute> for CompiledRoute {
    fn from(route: PartRoute) -> Self {
        CompiledRoute::Part(route)
    }
}

impl From<BaseRoute> for CompiledRoute {
    fn from(route: BaseRoute) -> Self {
        match route {
            BaseRoute::Literal(r) => CompiledRoute::Literal(r),
            BaseRoute::Segment(r) => CompiledRoute::Segment(r),
            BaseRoute::Wildcard(r) => CompiledRoute::Wildcard(r),
        }
    }
}

impl CompiledRoute {
    /// Short type name, as used in route definitions.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CompiledRoute::Literal(_) => "literal",
            CompiledRoute::Segment(_) => "segment",
            CompiledRoute::Wildcard(_) => "wildcard",
            CompiledRoute::Part(_) => "part",
        }
    }

    /// Match a request path against this tree
    ///
    /// Everything from the first `?` on is ignored; lengths are measured
    /// against the path portion only.
    ///
    /// # Arguments
    ///
    /// * `path` - Decoded request path, optionally followed by a query string
    /// * `offset` - Byte offset to start at. `None` means this is the outermost
    ///   call: matching starts at 0 and the result must consume the whole path
    ///   portion. With `Some(_)` no such requirement applies.
    ///
    /// # Returns
    ///
    /// * `Some(MatchResult)` - The merged result of the winning route chain
    /// * `None` - The path does not match
    ///
    /// # Example
    ///
    /// ```rust
    /// use partroute::router::{CompiledRoute, LiteralRoute};
    ///
    /// let route = CompiledRoute::from(LiteralRoute::new("/foo"));
    /// assert!(route.match_path("/foo", None).is_some());
    /// assert!(route.match_path("/foo/bar", None).is_none());
    /// assert_eq!(route.match_path("/bar/foo", Some(4)).map(|m| m.length()), Some(4));
    /// ```
    #[must_use]
    pub fn match_path(&self, path: &str, offset: Option<usize>) -> Option<MatchResult> {
        let path_only = path.split_once('?').map_or(path, |(p, _)| p);
        let start = Instant::now();

        let result = match offset {
            None => self
                .match_at(path_only, 0)
                .filter(|m| m.length() == path_only.len()),
            Some(offset) => self.match_at(path_only, offset),
        };

        let elapsed = start.elapsed();
        if elapsed > RuntimeConfig::current().slow_match {
            warn!(
                path = %path,
                offset = ?offset,
                duration_us = elapsed.as_micros(),
                "Slow route matching detected"
            );
        }

        match &result {
            Some(m) => debug!(
                path = %path,
                offset = ?offset,
                route_name = ?m.matched_route_name(),
                length = m.length(),
                params = ?m.params(),
                duration_us = elapsed.as_micros(),
                "Route matched"
            ),
            None => debug!(
                path = %path,
                offset = ?offset,
                duration_us = elapsed.as_micros(),
                "No route matched"
            ),
        }

        result
    }

    pub(crate) fn match_at(&self, path: &str, offset: usize) -> Option<MatchResult> {
        match self {
            CompiledRoute::Literal(r) => r.match_at(path, offset),
            CompiledRoute::Segment(r) => r.match_at(path, offset),
            CompiledRoute::Wildcard(r) => r.match_at(path, offset),
            CompiledRoute::Part(r) => r.match_at(path, offset),
        }
    }

    /// Generate the path for a route name
    ///
    /// # Arguments
    ///
    /// * `params` - Values for placeholders; anything a route does not consume
    ///   is passed on to its child, and a wildcard emits whatever is left
    /// * `name` - Slash-joined child names to descend through (e.g. `baz/bat`),
    ///   or `None` to stop at this route
    ///
    /// # Errors
    ///
    /// * [`RouteError::MayNotTerminate`] - the name ends on a part route that
    ///   may not terminate
    /// * [`RouteError::RouteNotFound`] - a name segment is not a declared child
    /// * [`RouteError::MissingParameter`] - a placeholder that must be
    ///   rendered has no value and no default
    ///
    /// # Example
    ///
    /// ```rust
    /// use partroute::router::{CompiledRoute, Params, SegmentRoute};
    ///
    /// let route = CompiledRoute::from(SegmentRoute::new("/user/:id").unwrap());
    /// let mut params = Params::new();
    /// params.insert("id".to_string(), "42".to_string());
    /// let assembly = route.assemble(&params, None).unwrap();
    /// assert_eq!(assembly.path, "/user/42");
    /// assert_eq!(assembly.assembled_params, vec!["id".to_string()]);
    /// ```
    pub fn assemble(&self, params: &Params, name: Option<&str>) -> Result<Assembly, RouteError> {
        let names: Vec<&str> = name
            .map(|n| n.split('/').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let mut assembly = self.assemble_at(params, &names).map_err(|err| match err {
            RouteError::MayNotTerminate { .. } => RouteError::MayNotTerminate {
                route: name.unwrap_or_default().to_string(),
            },
            other => other,
        })?;

        let mut consumed = Vec::with_capacity(assembly.assembled_params.len());
        for key in assembly.assembled_params {
            if params.contains_key(&key) && !consumed.contains(&key) {
                consumed.push(key);
            }
        }
        assembly.assembled_params = consumed;

        debug!(
            route_name = ?name,
            path = %assembly.path,
            assembled_params = ?assembly.assembled_params,
            "Route assembled"
        );
        Ok(assembly)
    }

    pub(crate) fn assemble_at(
        &self,
        params: &Params,
        names: &[&str],
    ) -> Result<Assembly, RouteError> {
        match self {
            CompiledRoute::Part(part) => part.assemble_at(params, names),
            _ if !names.is_empty() => Err(RouteError::RouteNotFound {
                name: names[0].to_string(),
            }),
            CompiledRoute::Literal(r) => Ok(r.assemble()),
            CompiledRoute::Segment(r) => r.assemble(params, false),
            CompiledRoute::Wildcard(r) => Ok(r.assemble(params)),
        }
    }

    /// Every route name this tree can assemble, depth first in declaration
    /// order. The empty string stands for the tree's own root.
    #[must_use]
    pub fn route_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names("", &mut names);
        names
    }

    fn collect_names(&self, prefix: &str, out: &mut Vec<String>) {
        let CompiledRoute::Part(part) = self else {
            out.push(prefix.to_string());
            return;
        };
        if part.may_terminate() {
            out.push(prefix.to_string());
        }
        for (name, child) in part.children() {
            let child_prefix = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };
            child.collect_names(&child_prefix, out);
        }
    }

    /// Number of routes in the tree. A part route and its base count as one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            CompiledRoute::Part(part) => {
                1 + part
                    .children()
                    .values()
                    .map(CompiledRoute::node_count)
                    .sum::<usize>()
            }
            _ => 1,
        }
    }
}
