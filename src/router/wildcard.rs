use super::core::Assembly;
use super::route_match::{MatchResult, Params};
use crate::error::RouteError;

/// Default delimiter between a key and its value.
pub const DEFAULT_KEY_VALUE_DELIMITER: &str = "/";
/// Default delimiter between pairs.
pub const DEFAULT_PARAM_DELIMITER: &str = "/";

/// Matches the whole remainder of the path as delimiter-separated key/value
/// pairs, e.g. `/page/2/sort/name` or `/page=2;sort=name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardRoute {
    key_value_delimiter: String,
    param_delimiter: String,
    defaults: Params,
}

impl Default for WildcardRoute {
    fn default() -> Self {
        Self {
            key_value_delimiter: DEFAULT_KEY_VALUE_DELIMITER.to_string(),
            param_delimiter: DEFAULT_PARAM_DELIMITER.to_string(),
            defaults: Params::new(),
        }
    }
}

impl WildcardRoute {
    /// Create a wildcard route with custom delimiters.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidArgument`] when either delimiter is empty.
    pub fn new(
        key_value_delimiter: impl Into<String>,
        param_delimiter: impl Into<String>,
    ) -> Result<Self, RouteError> {
        let key_value_delimiter = key_value_delimiter.into();
        let param_delimiter = param_delimiter.into();
        if key_value_delimiter.is_empty() || param_delimiter.is_empty() {
            return Err(RouteError::invalid_argument(
                "wildcard delimiters must not be empty",
            ));
        }
        Ok(Self {
            key_value_delimiter,
            param_delimiter,
            defaults: Params::new(),
        })
    }

    /// Parameters reported on every match and emitted on every assembly.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Params) -> Self {
        self.defaults = defaults;
        self
    }

    /// Delimiter between a key and its value.
    #[must_use]
    pub fn key_value_delimiter(&self) -> &str {
        &self.key_value_delimiter
    }

    /// Delimiter between pairs.
    #[must_use]
    pub fn param_delimiter(&self) -> &str {
        &self.param_delimiter
    }

    /// Consume everything from `offset` to the end of `path`.
    ///
    /// A non-empty remainder must start with the pair delimiter, otherwise the
    /// match fails. When both delimiters are equal the tokens pair up
    /// positionally; otherwise each token is split once on the key delimiter
    /// and tokens without it are ignored. An empty remainder always matches.
    #[must_use]
    pub fn match_at(&self, path: &str, offset: usize) -> Option<MatchResult> {
        let rest = path.get(offset..)?;
        let body = if rest.is_empty() {
            rest
        } else {
            rest.strip_prefix(self.param_delimiter.as_str())?
        };

        let mut params = self.defaults.clone();
        if !body.is_empty() {
            if self.key_value_delimiter == self.param_delimiter {
                let tokens: Vec<&str> = body.split(self.param_delimiter.as_str()).collect();
                for pair in tokens.chunks(2) {
                    if let [key, value] = pair {
                        if !key.is_empty() {
                            params.insert((*key).to_string(), (*value).to_string());
                        }
                    }
                }
            } else {
                for token in body.split(self.param_delimiter.as_str()) {
                    if let Some((key, value)) = token.split_once(self.key_value_delimiter.as_str())
                    {
                        if !key.is_empty() {
                            params.insert(key.to_string(), value.to_string());
                        }
                    }
                }
            }
        }

        Some(MatchResult::new(params, rest.len()))
    }

    /// Emit every default and every supplied parameter as pairs, each preceded
    /// by the pair delimiter. Empty when there is nothing to emit.
    #[must_use]
    pub fn assemble(&self, params: &Params) -> Assembly {
        let mut merged = self.defaults.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut path = String::new();
        for (key, value) in &merged {
            path.push_str(&self.param_delimiter);
            path.push_str(key);
            path.push_str(&self.key_value_delimiter);
            path.push_str(value);
        }

        Assembly {
            path,
            assembled_params: merged.into_keys().collect(),
        }
    }
}
