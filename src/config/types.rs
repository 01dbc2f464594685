use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Route type tag of a [`RouteDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    #[serde(alias = "Literal")]
    Literal,
    #[serde(alias = "Segment")]
    Segment,
    #[serde(alias = "Wildcard")]
    Wildcard,
    #[serde(alias = "Part")]
    Part,
}

impl std::fmt::Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RouteType::Literal => "literal",
            RouteType::Segment => "segment",
            RouteType::Wildcard => "wildcard",
            RouteType::Part => "part",
        };
        write!(f, "{}", s)
    }
}

/// Options bag shared by all route types. Each type reads the keys it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// Literal text or segment pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Default parameter values. Scalars are accepted and stored as strings.
    #[serde(deserialize_with = "scalar_map", skip_serializing_if = "IndexMap::is_empty")]
    pub defaults: IndexMap<String, String>,
    /// Segment only: placeholder name to regular expression
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub constraints: IndexMap<String, String>,
    /// Wildcard only: delimiter between key and value (default `/`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_value_delimiter: Option<String>,
    /// Wildcard only: delimiter between pairs (default `/`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_delimiter: Option<String>,
}

/// Configuration for one route and its subtree.
///
/// ```yaml
/// type: literal
/// options:
///   route: /foo
///   defaults: { controller: foo }
/// may_terminate: true
/// child_routes:
///   bar:
///     type: segment
///     options: { route: "/:id" }
/// ```
///
/// A non-part definition with children compiles to a part route whose base
/// is the definition itself. A `part` definition names its base explicitly
/// under `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    #[serde(rename = "type")]
    pub kind: RouteType,
    #[serde(default)]
    pub options: RouteOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Box<RouteDefinition>>,
    #[serde(default)]
    pub may_terminate: bool,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub child_routes: IndexMap<String, RouteDefinition>,
}

impl RouteDefinition {
    /// A definition of `kind` with only `options.route` set.
    #[must_use]
    pub fn new(kind: RouteType, route: impl Into<String>) -> Self {
        Self {
            kind,
            options: RouteOptions {
                route: Some(route.into()),
                ..RouteOptions::default()
            },
            base: None,
            may_terminate: false,
            child_routes: IndexMap::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::String(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: IndexMap<String, Scalar> = IndexMap::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_preserves_child_order() {
        let yaml = r#"
type: literal
options:
  route: /foo
child_routes:
  zeta: { type: literal, options: { route: /z } }
  alpha: { type: literal, options: { route: /a } }
  mid: { type: wildcard }
"#;
        let def: RouteDefinition = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = def.child_routes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(!def.may_terminate);
        assert_eq!(def.child_routes["mid"].kind, RouteType::Wildcard);
    }

    #[test]
    fn test_scalar_defaults_become_strings() {
        let yaml = r#"
type: Segment
options:
  route: "/page[/:n]"
  defaults: { n: 1, ratio: 0.5, draft: false, name: x }
"#;
        let def: RouteDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.kind, RouteType::Segment);
        assert_eq!(def.options.defaults["n"], "1");
        assert_eq!(def.options.defaults["ratio"], "0.5");
        assert_eq!(def.options.defaults["draft"], "false");
        assert_eq!(def.options.defaults["name"], "x");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let yaml = "type: regex\noptions: { route: /x }\n";
        assert!(serde_yaml::from_str::<RouteDefinition>(yaml).is_err());
    }
}
