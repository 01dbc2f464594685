//! Segment route: a compiled pattern with placeholders and optional groups.
//!
//! Matching walks the token tree left to right without backtracking, except
//! that an optional group which fails part-way is treated as absent and the
//! position is rewound to where the group started.
//!
//! Assembly walks the same tree. Optional groups are always rendered when a
//! child route will be appended after this one; on the last route of the
//! requested name an optional group is dropped when every placeholder in it
//! would render its default value (or has no value at all) and no nested group
//! was rendered.

use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use tracing::warn;

use super::core::Assembly;
use super::route_match::{MatchResult, Params};
use crate::error::RouteError;
use crate::pattern::{Pattern, PatternCache, Placeholder, Token};

/// Route matching a segment pattern such as `/blog[/:year[/:month]]`.
#[derive(Debug, Clone)]
pub struct SegmentRoute {
    pattern: Arc<Pattern>,
    defaults: Params,
    constraints: IndexMap<String, Regex>,
}

impl SegmentRoute {
    /// Compile `pattern` through the process-wide pattern cache.
    ///
    /// # Errors
    ///
    /// [`RouteError::Syntax`] when the pattern is malformed.
    pub fn new(pattern: &str) -> Result<Self, RouteError> {
        Ok(Self::from_pattern(PatternCache::global().get_or_compile(pattern)?))
    }

    /// Build from an already compiled pattern.
    #[must_use]
    pub fn from_pattern(pattern: Arc<Pattern>) -> Self {
        Self {
            pattern,
            defaults: Params::new(),
            constraints: IndexMap::new(),
        }
    }

    /// Default values, used for absent optional placeholders when matching
    /// and for unsupplied placeholders when assembling.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Params) -> Self {
        self.defaults = defaults;
        self
    }

    /// Per-placeholder regular expressions. A constrained placeholder captures
    /// the leftmost-first match of its expression anchored at the current
    /// position, so `a|ab` captures `a` from `ab`.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidArgument`] when an expression does not compile.
    pub fn with_constraints(
        mut self,
        constraints: &IndexMap<String, String>,
    ) -> Result<Self, RouteError> {
        let names = self.pattern.placeholder_names();
        for (name, expr) in constraints {
            if !names.contains(&name.as_str()) {
                warn!(
                    pattern = %self.pattern.source(),
                    placeholder = %name,
                    "Constraint given for a placeholder the pattern does not declare"
                );
                continue;
            }
            let regex = Regex::new(&format!("^(?:{})", expr)).map_err(|e| {
                RouteError::invalid_argument(format!(
                    "invalid constraint for '{}': {}",
                    name, e
                ))
            })?;
            self.constraints.insert(name.clone(), regex);
        }
        Ok(self)
    }

    /// The compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Registered defaults.
    #[must_use]
    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// Match the pattern starting at `offset`.
    ///
    /// The reported params are the defaults overlaid by every captured value.
    #[must_use]
    pub fn match_at(&self, path: &str, offset: usize) -> Option<MatchResult> {
        path.get(offset..)?;
        let mut captures = Params::new();
        let end = self.match_sequence(self.pattern.tokens(), path, offset, &mut captures)?;

        let mut params = self.defaults.clone();
        params.extend(captures);
        Some(MatchResult::new(params, end - offset))
    }

    fn match_sequence(
        &self,
        tokens: &[Token],
        path: &str,
        mut pos: usize,
        captures: &mut Params,
    ) -> Option<usize> {
        for token in tokens {
            match token {
                Token::Literal(text) => {
                    if !path[pos..].starts_with(text.as_str()) {
                        return None;
                    }
                    pos += text.len();
                }
                Token::Placeholder(placeholder) => {
                    let len = self.capture(placeholder, &path[pos..])?;
                    captures.insert(placeholder.name.clone(), path[pos..pos + len].to_string());
                    pos += len;
                }
                Token::Optional(inner) => {
                    let mark = captures.len();
                    match self.match_sequence(inner, path, pos, captures) {
                        Some(end) => pos = end,
                        None => captures.truncate(mark),
                    }
                }
            }
        }
        Some(pos)
    }

    /// Length of the capture for `placeholder` at the start of `rest`.
    /// Empty captures fail.
    fn capture(&self, placeholder: &Placeholder, rest: &str) -> Option<usize> {
        let len = match self.constraints.get(&placeholder.name) {
            Some(regex) => regex.find(rest)?.end(),
            None => rest
                .char_indices()
                .find(|(_, c)| placeholder.stops_at(*c))
                .map_or(rest.len(), |(i, _)| i),
        };
        (len > 0).then_some(len)
    }

    /// Render the pattern from `params`, falling back to defaults.
    ///
    /// `has_child` is true when another route will be appended after this
    /// fragment; optional groups are then never dropped.
    ///
    /// # Errors
    ///
    /// [`RouteError::MissingParameter`] when a placeholder that must be
    /// rendered has neither a supplied value nor a default.
    pub fn assemble(&self, params: &Params, has_child: bool) -> Result<Assembly, RouteError> {
        let mut assembled = Vec::new();
        let path = self.build(self.pattern.tokens(), params, false, has_child, &mut assembled)?;
        Ok(Assembly {
            path,
            assembled_params: assembled,
        })
    }

    fn value<'a>(&'a self, name: &str, params: &'a Params) -> Option<&'a str> {
        params
            .get(name)
            .or_else(|| self.defaults.get(name))
            .map(String::as_str)
    }

    fn build(
        &self,
        tokens: &[Token],
        params: &Params,
        optional: bool,
        has_child: bool,
        assembled: &mut Vec<String>,
    ) -> Result<String, RouteError> {
        let mark = assembled.len();
        let mut path = String::new();
        let mut skip = true;
        let mut skippable = false;

        for token in tokens {
            match token {
                Token::Literal(text) => path.push_str(text),
                Token::Placeholder(placeholder) => {
                    skippable = true;
                    let Some(value) = self.value(&placeholder.name, params) else {
                        if !optional || has_child {
                            return Err(RouteError::MissingParameter {
                                name: placeholder.name.clone(),
                            });
                        }
                        assembled.truncate(mark);
                        return Ok(String::new());
                    };
                    let is_default =
                        self.defaults.get(&placeholder.name).map(String::as_str) == Some(value);
                    if !optional || has_child || !is_default {
                        skip = false;
                    }
                    path.push_str(value);
                    assembled.push(placeholder.name.clone());
                }
                Token::Optional(inner) => {
                    skippable = true;
                    let fragment = self.build(inner, params, true, has_child, assembled)?;
                    if !fragment.is_empty() {
                        path.push_str(&fragment);
                        skip = false;
                    }
                }
            }
        }

        if optional && skippable && skip {
            assembled.truncate(mark);
            return Ok(String::new());
        }
        Ok(path)
    }
}
