use indexmap::IndexMap;
use tracing::trace;

use super::core::{Assembly, CompiledRoute};
use super::literal::LiteralRoute;
use super::route_match::{MatchResult, Params};
use super::segment::SegmentRoute;
use super::wildcard::WildcardRoute;
use crate::error::RouteError;

/// The matcher a part route starts with. Never itself a part route.
#[derive(Debug, Clone)]
pub enum BaseRoute {
    /// Fixed text
    Literal(LiteralRoute),
    /// Segment pattern
    Segment(SegmentRoute),
    /// Trailing key/value pairs
    Wildcard(WildcardRoute),
}

impl TryFrom<CompiledRoute> for BaseRoute {
    type Error = RouteError;

    fn try_from(route: CompiledRoute) -> Result<Self, Self::Error> {
        match route {
            CompiledRoute::Literal(r) => Ok(BaseRoute::Literal(r)),
            CompiledRoute::Segment(r) => Ok(BaseRoute::Segment(r)),
            CompiledRoute::Wildcard(r) => Ok(BaseRoute::Wildcard(r)),
            CompiledRoute::Part(_) => Err(RouteError::invalid_argument(
                "Base route may not be a part route",
            )),
        }
    }
}

impl BaseRoute {
    fn match_at(&self, path: &str, offset: usize) -> Option<MatchResult> {
        match self {
            BaseRoute::Literal(r) => r.match_at(path, offset),
            BaseRoute::Segment(r) => r.match_at(path, offset),
            BaseRoute::Wildcard(r) => r.match_at(path, offset),
        }
    }

    fn assemble(&self, params: &Params, has_child: bool) -> Result<Assembly, RouteError> {
        match self {
            BaseRoute::Literal(r) => Ok(r.assemble()),
            BaseRoute::Segment(r) => r.assemble(params, has_child),
            BaseRoute::Wildcard(r) => Ok(r.assemble(params)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            BaseRoute::Literal(_) => "literal",
            BaseRoute::Segment(_) => "segment",
            BaseRoute::Wildcard(_) => "wildcard",
        }
    }
}

/// A base matcher followed by an ordered set of named child routes.
///
/// Children are tried in declaration order and the first one that matches
/// wins; later children are never consulted once one succeeds.
#[derive(Debug, Clone)]
pub struct PartRoute {
    base: BaseRoute,
    may_terminate: bool,
    children: IndexMap<String, CompiledRoute>,
}

impl PartRoute {
    /// Create a part route.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidArgument`] when `base` is itself a part route.
    pub fn new(
        base: impl Into<CompiledRoute>,
        may_terminate: bool,
        children: IndexMap<String, CompiledRoute>,
    ) -> Result<Self, RouteError> {
        Ok(Self {
            base: BaseRoute::try_from(base.into())?,
            may_terminate,
            children,
        })
    }

    /// Append a child route after the existing ones.
    ///
    /// A child with an existing name is replaced in place, keeping its
    /// original position.
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, route: impl Into<CompiledRoute>) -> Self {
        self.children.insert(name.into(), route.into());
        self
    }

    /// The base matcher.
    #[must_use]
    pub fn base(&self) -> &BaseRoute {
        &self.base
    }

    /// Whether the base alone may produce a final match.
    #[must_use]
    pub fn may_terminate(&self) -> bool {
        self.may_terminate
    }

    /// Child routes in declaration order.
    #[must_use]
    pub fn children(&self) -> &IndexMap<String, CompiledRoute> {
        &self.children
    }

    pub(crate) fn match_at(&self, path: &str, offset: usize) -> Option<MatchResult> {
        let base = self.base.match_at(path, offset)?;
        let next_offset = offset + base.length();

        if self.may_terminate && next_offset == path.len() {
            return Some(base);
        }

        for (name, child) in &self.children {
            if let Some(sub) = child.match_at(path, next_offset) {
                trace!(
                    child = %name,
                    offset = next_offset,
                    length = sub.length(),
                    "Child route matched"
                );
                return Some(base.merge(sub).with_name_prefix(name));
            }
        }

        if self.may_terminate {
            Some(base)
        } else {
            trace!(
                base = self.base.kind(),
                offset = next_offset,
                "No child matched and part route may not terminate"
            );
            None
        }
    }

    pub(crate) fn assemble_at(
        &self,
        params: &Params,
        names: &[&str],
    ) -> Result<Assembly, RouteError> {
        let mut assembly = self.base.assemble(params, !names.is_empty())?;

        let Some((first, rest)) = names.split_first() else {
            if !self.may_terminate {
                return Err(RouteError::MayNotTerminate {
                    route: String::new(),
                });
            }
            return Ok(assembly);
        };

        let child = self
            .children
            .get(*first)
            .ok_or_else(|| RouteError::RouteNotFound {
                name: (*first).to_string(),
            })?;

        let remaining: Params = params
            .iter()
            .filter(|(key, _)| !assembly.assembled_params.contains(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let sub = child.assemble_at(&remaining, rest)?;
        assembly.path.push_str(&sub.path);
        assembly.assembled_params.extend(sub.assembled_params);
        Ok(assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn blog() -> PartRoute {
        PartRoute::new(LiteralRoute::new("/blog"), false, IndexMap::new())
            .unwrap()
            .with_child("index", LiteralRoute::new("/"))
            .with_child("post", SegmentRoute::new("/:slug").unwrap())
    }

    #[test]
    fn test_base_may_not_be_part() {
        let inner = blog();
        let err = PartRoute::new(inner, true, IndexMap::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("Base route may not be a part route"));
    }

    #[test]
    fn test_non_terminating_part_needs_child() {
        let route = blog();
        assert!(route.match_at("/blog", 0).is_none());
        let m = route.match_at("/blog/hello", 0).unwrap();
        assert_eq!(m.matched_route_name().as_deref(), Some("post"));
        assert_eq!(m.param("slug"), Some("hello"));
        assert_eq!(m.length(), 11);
    }

    #[test]
    fn test_first_declared_child_wins() {
        let route = PartRoute::new(LiteralRoute::new("/a"), false, IndexMap::new())
            .unwrap()
            .with_child("first", SegmentRoute::new("/:x").unwrap())
            .with_child("second", LiteralRoute::new("/b"));
        let m = route.match_at("/a/b", 0).unwrap();
        assert_eq!(m.matched_route_name().as_deref(), Some("first"));

        let reordered = PartRoute::new(LiteralRoute::new("/a"), false, IndexMap::new())
            .unwrap()
            .with_child("second", LiteralRoute::new("/b"))
            .with_child("first", SegmentRoute::new("/:x").unwrap());
        let m = reordered.match_at("/a/b", 0).unwrap();
        assert_eq!(m.matched_route_name().as_deref(), Some("second"));
    }

    #[test]
    fn test_assemble_requires_termination() {
        let route = blog();
        assert!(matches!(
            route.assemble_at(&Params::new(), &[]),
            Err(RouteError::MayNotTerminate { .. })
        ));
        let assembly = route.assemble_at(&params(&[("slug", "x")]), &["post"]).unwrap();
        assert_eq!(assembly.path, "/blog/x");
    }

    #[test]
    fn test_assemble_unknown_child() {
        let err = blog()
            .assemble_at(&Params::new(), &["missing"])
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::RouteNotFound {
                name: "missing".to_string()
            }
        );
    }
}
