use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Parameter map, ordered by insertion.
///
/// Order matters for wildcard assembly, which emits pairs in map order.
pub type Params = IndexMap<String, String>;

/// Inline capacity for route-name segments. Route trees rarely nest deeper.
pub const MAX_INLINE_NAME_SEGMENTS: usize = 4;

/// Route-name path segments, outermost first.
pub type RouteName = SmallVec<[String; MAX_INLINE_NAME_SEGMENTS]>;

/// Result of successfully matching a path against a route tree
///
/// Built bottom-up: a leaf produces params and a consumed length with an empty
/// name; each part route that accepts a child's result prepends the child's
/// name and overlays the child's params on top of its base's params.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Number of bytes of the path accounted for by this match
    length: usize,
    /// Names of the child routes taken, outermost first
    route_name: RouteName,
    /// Defaults overlaid by captured values
    params: Params,
}

impl MatchResult {
    /// Create a leaf result.
    #[must_use]
    pub fn new(params: Params, length: usize) -> Self {
        Self {
            length,
            route_name: RouteName::new(),
            params,
        }
    }

    /// Consumed length in bytes.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Route-name segments, outermost first. Empty when the outermost route
    /// itself terminated.
    #[inline]
    #[must_use]
    pub fn route_name(&self) -> &[String] {
        &self.route_name
    }

    /// Slash-joined route name, or `None` when the outermost route terminated.
    ///
    /// This is the name to pass back to `assemble` to regenerate the path.
    #[must_use]
    pub fn matched_route_name(&self) -> Option<String> {
        if self.route_name.is_empty() {
            None
        } else {
            Some(self.route_name.join("/"))
        }
    }

    /// All matched parameters.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Look up a single parameter.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Consume the result, keeping only the parameters.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }

    /// Combine this (parent) result with a child's result.
    ///
    /// Lengths add up, the child's name path is kept, and on a key collision
    /// the child's value wins. Parent-only keys are never dropped.
    #[must_use]
    pub(crate) fn merge(self, child: MatchResult) -> MatchResult {
        let mut params = self.params;
        params.extend(child.params);
        MatchResult {
            length: self.length + child.length,
            route_name: child.route_name,
            params,
        }
    }

    /// Prepend `name` to the route-name path.
    #[must_use]
    pub(crate) fn with_name_prefix(mut self, name: &str) -> MatchResult {
        self.route_name.insert(0, name.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_child_wins_and_parent_keys_survive() {
        let parent = MatchResult::new(params(&[("controller", "foo"), ("action", "index")]), 4);
        let child = MatchResult::new(params(&[("controller", "bar"), ("id", "7")]), 4)
            .with_name_prefix("bar");

        let merged = parent.merge(child).with_name_prefix("outer");

        assert_eq!(merged.length(), 8);
        assert_eq!(merged.param("controller"), Some("bar"));
        assert_eq!(merged.param("action"), Some("index"));
        assert_eq!(merged.param("id"), Some("7"));
        assert_eq!(merged.matched_route_name().as_deref(), Some("outer/bar"));
    }

    #[test]
    fn test_leaf_has_no_route_name() {
        let leaf = MatchResult::new(Params::new(), 3);
        assert!(leaf.route_name().is_empty());
        assert_eq!(leaf.matched_route_name(), None);
        assert_eq!(leaf.param("missing"), None);
    }

    #[test]
    fn test_serializes_to_json() {
        let result = MatchResult::new(params(&[("id", "1")]), 2).with_name_prefix("item");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["length"], 2);
        assert_eq!(json["route_name"][0], "item");
        assert_eq!(json["params"]["id"], "1");
    }
}
