use super::core::Assembly;
use super::route_match::{MatchResult, Params};

/// Matches a fixed string at the current offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRoute {
    route: String,
    defaults: Params,
}

impl LiteralRoute {
    /// Create a literal route with no defaults.
    #[must_use]
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            defaults: Params::new(),
        }
    }

    /// Parameters reported on every successful match.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Params) -> Self {
        self.defaults = defaults;
        self
    }

    /// The literal text.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Match `route` at `offset`, case-sensitively and byte-exact.
    ///
    /// Does not require the path to end after the literal; the caller decides
    /// whether the remainder matters.
    #[must_use]
    pub fn match_at(&self, path: &str, offset: usize) -> Option<MatchResult> {
        let rest = path.get(offset..)?;
        if rest.starts_with(self.route.as_str()) {
            Some(MatchResult::new(self.defaults.clone(), self.route.len()))
        } else {
            None
        }
    }

    /// Always the literal text; consumes no parameters.
    #[must_use]
    pub fn assemble(&self) -> Assembly {
        Assembly {
            path: self.route.clone(),
            assembled_params: Vec::new(),
        }
    }
}
