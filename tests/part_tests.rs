use indexmap::IndexMap;
use partroute::config::{compile, RouteDefinition};
use partroute::error::{ErrorKind, RouteError};
use partroute::router::{
    CompiledRoute, LiteralRoute, Params, PartRoute, SegmentRoute, WildcardRoute,
};

fn tree(yaml: &str) -> CompiledRoute {
    let definition: RouteDefinition = serde_yaml::from_str(yaml).expect("valid definition");
    compile(&definition).expect("tree compiles")
}

fn route() -> CompiledRoute {
    tree(
        r#"
type: part
may_terminate: true
base:
  type: literal
  options:
    route: /foo
    defaults: { controller: foo }
child_routes:
  bar:
    type: literal
    options:
      route: /bar
      defaults: { controller: bar }
  baz:
    type: literal
    options: { route: /baz }
    child_routes:
      bat:
        type: segment
        options: { route: "/:controller" }
        may_terminate: true
        child_routes:
          wildcard: { type: wildcard }
  bat:
    type: segment
    options:
      route: "/bat[/:foo]"
      defaults: { foo: bar }
    may_terminate: true
    child_routes:
      literal:
        type: literal
        options: { route: /bar }
      optional:
        type: segment
        options: { route: "/bat[/:bar]" }
"#,
    )
}

fn route_alternative() -> CompiledRoute {
    tree(
        r#"
type: segment
options:
  route: "/[:controller[/:action]]"
  defaults: { controller: fo-fo, action: index }
may_terminate: true
child_routes:
  wildcard:
    type: wildcard
    options: { key_value_delimiter: /, param_delimiter: / }
"#,
    )
}

struct Case {
    name: &'static str,
    route: fn() -> CompiledRoute,
    path: &'static str,
    offset: Option<usize>,
    route_name: Option<&'static str>,
    params: Option<&'static [(&'static str, &'static str)]>,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "simple-match",
            route,
            path: "/foo",
            offset: None,
            route_name: None,
            params: Some(&[("controller", "foo")]),
        },
        Case {
            name: "offset-skips-beginning",
            route,
            path: "/bar/foo",
            offset: Some(4),
            route_name: None,
            params: Some(&[("controller", "foo")]),
        },
        Case {
            name: "simple-child-match",
            route,
            path: "/foo/bar",
            offset: None,
            route_name: Some("bar"),
            params: Some(&[("controller", "bar")]),
        },
        Case {
            name: "offset-does-not-enable-partial-matching",
            route,
            path: "/foo/foo",
            offset: None,
            route_name: None,
            params: None,
        },
        Case {
            name: "offset-does-not-enable-partial-matching-in-child",
            route,
            path: "/foo/bar/baz",
            offset: None,
            route_name: None,
            params: None,
        },
        Case {
            name: "non-terminating-part-does-not-match",
            route,
            path: "/foo/baz",
            offset: None,
            route_name: None,
            params: None,
        },
        Case {
            name: "child-of-non-terminating-part-does-match",
            route,
            path: "/foo/baz/bat",
            offset: None,
            route_name: Some("baz/bat"),
            params: Some(&[("controller", "bat")]),
        },
        Case {
            name: "parameters-are-used-only-once",
            route,
            path: "/foo/baz/wildcard/foo/bar",
            offset: None,
            route_name: Some("baz/bat/wildcard"),
            params: Some(&[("controller", "wildcard"), ("foo", "bar")]),
        },
        Case {
            name: "optional-parameters-are-dropped-without-child",
            route,
            path: "/foo/bat",
            offset: None,
            route_name: Some("bat"),
            params: Some(&[("foo", "bar")]),
        },
        Case {
            name: "optional-parameters-are-not-dropped-with-child",
            route,
            path: "/foo/bat/bar/bar",
            offset: None,
            route_name: Some("bat/literal"),
            params: Some(&[("foo", "bar")]),
        },
        Case {
            name: "optional-parameters-not-required-in-last-part",
            route,
            path: "/foo/bat/bar/bat",
            offset: None,
            route_name: Some("bat/optional"),
            params: Some(&[("foo", "bar")]),
        },
        Case {
            name: "alternative-simple-match",
            route: route_alternative,
            path: "/",
            offset: None,
            route_name: None,
            params: Some(&[("controller", "fo-fo"), ("action", "index")]),
        },
        Case {
            name: "alternative-match-wildcard",
            route: route_alternative,
            path: "/fo-fo/index/param1/value1",
            offset: None,
            route_name: Some("wildcard"),
            params: Some(&[
                ("controller", "fo-fo"),
                ("action", "index"),
                ("param1", "value1"),
            ]),
        },
    ]
}

fn to_params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_matching() {
    for case in cases() {
        let result = (case.route)().match_path(case.path, case.offset);
        let Some(expected) = case.params else {
            assert!(result.is_none(), "{}: expected no match", case.name);
            continue;
        };
        let m = result.unwrap_or_else(|| panic!("{}: expected a match", case.name));
        if case.offset.is_none() {
            assert_eq!(m.length(), case.path.len(), "{}: length", case.name);
        }
        assert_eq!(
            m.matched_route_name().as_deref(),
            case.route_name,
            "{}: route name",
            case.name
        );
        for (key, value) in expected {
            assert_eq!(m.param(key), Some(*value), "{}: param {}", case.name, key);
        }
    }
}

#[test]
fn test_assembling() {
    for case in cases() {
        let Some(params) = case.params else {
            continue;
        };
        let assembly = (case.route)()
            .assemble(&to_params(params), case.route_name)
            .unwrap_or_else(|err| panic!("{}: {}", case.name, err));
        match case.offset {
            Some(offset) => assert_eq!(
                case.path[offset..].find(&assembly.path).map(|i| i + offset),
                Some(offset),
                "{}",
                case.name
            ),
            None => assert_eq!(assembly.path, case.path, "{}", case.name),
        }
    }
}

#[test]
fn test_assemble_non_terminated_route() {
    let err = route().assemble(&Params::new(), Some("baz")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert!(matches!(&err, RouteError::MayNotTerminate { route } if route == "baz"));
    assert!(err.to_string().contains("may not terminate"));
}

#[test]
fn test_assemble_unknown_child() {
    let err = route().assemble(&Params::new(), Some("bat/nope")).unwrap_err();
    assert!(matches!(err, RouteError::RouteNotFound { name } if name == "nope"));
}

#[test]
fn test_base_route_may_not_be_part_route() {
    let inner = PartRoute::new(LiteralRoute::new("/foo"), true, IndexMap::new()).unwrap();
    let err = PartRoute::new(inner, true, IndexMap::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("Base route may not be a part route"));
}

#[test]
fn test_assembled_params_lists_consumed_names() {
    let assembly = route()
        .assemble(&to_params(&[("controller", "foo")]), Some("baz/bat"))
        .unwrap();
    assert_eq!(assembly.path, "/foo/baz/foo");
    assert_eq!(assembly.assembled_params, vec!["controller".to_string()]);

    let assembly = route()
        .assemble(&to_params(&[("unused", "x")]), Some("bar"))
        .unwrap();
    assert!(assembly.assembled_params.is_empty());
}

#[test]
fn test_may_terminate_part_matches_with_query_string() {
    let route = tree(
        r#"
type: literal
options:
  route: /resource
  defaults: { controller: ResourceController, action: resource }
may_terminate: true
child_routes:
  child:
    type: literal
    options:
      route: /child
      defaults: { action: child }
"#,
    );

    let m = route.match_path("/resource?foo=bar", None).unwrap();
    assert_eq!(m.param("action"), Some("resource"));
    assert_eq!(m.matched_route_name(), None);

    let m = route.match_path("/resource/child?foo=bar", None).unwrap();
    assert_eq!(m.param("action"), Some("child"));
    assert_eq!(m.param("controller"), Some("ResourceController"));
}

#[test]
fn test_child_defaults_override_parent_defaults() {
    let m = route().match_path("/foo/bar", None).unwrap();
    assert_eq!(m.param("controller"), Some("bar"));
}

#[test]
fn test_first_matching_child_wins() {
    let route: CompiledRoute = PartRoute::new(LiteralRoute::new("/a"), false, IndexMap::new())
        .unwrap()
        .with_child("short", SegmentRoute::new("/:x").unwrap())
        .with_child("long", WildcardRoute::default())
        .into();

    let m = route.match_path("/a/one", None).unwrap();
    assert_eq!(m.matched_route_name().as_deref(), Some("short"));

    // `short` matches "/one" and wins even though `long` could consume the rest
    assert!(route.match_path("/a/one/two", None).is_none());
}
