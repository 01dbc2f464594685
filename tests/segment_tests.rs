use indexmap::IndexMap;
use partroute::error::{ErrorKind, RouteError};
use partroute::router::{CompiledRoute, Params, SegmentRoute};

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn mvc() -> CompiledRoute {
    SegmentRoute::new("/:controller[/:action[/:id]]")
        .unwrap()
        .with_defaults(params(&[("action", "index")]))
        .into()
}

#[test]
fn test_mvc_pattern_levels() {
    let route = mvc();

    let m = route.match_path("/blog", None).unwrap();
    assert_eq!(m.param("controller"), Some("blog"));
    assert_eq!(m.param("action"), Some("index"));
    assert_eq!(m.param("id"), None);

    let m = route.match_path("/blog/edit", None).unwrap();
    assert_eq!(m.param("action"), Some("edit"));

    let m = route.match_path("/blog/edit/7", None).unwrap();
    assert_eq!(m.param("id"), Some("7"));
    assert_eq!(m.length(), 12);
}

#[test]
fn test_trailing_separator_is_not_consumed() {
    // "/" starts the optional group but no action follows, so the group is
    // absent and one byte is left over
    assert!(mvc().match_path("/blog/", None).is_none());
    assert_eq!(mvc().match_path("/blog/", Some(0)).unwrap().length(), 5);
}

#[test]
fn test_matching_is_case_sensitive_for_literals() {
    let route: CompiledRoute = SegmentRoute::new("/Shop/:sku").unwrap().into();
    assert!(route.match_path("/Shop/abc", None).is_some());
    assert!(route.match_path("/shop/abc", None).is_none());
}

#[test]
fn test_multibyte_paths_use_byte_lengths() {
    let route: CompiledRoute = SegmentRoute::new("/city/:name").unwrap().into();
    let m = route.match_path("/city/Zürich", None).unwrap();
    assert_eq!(m.param("name"), Some("Zürich"));
    assert_eq!(m.length(), "/city/Zürich".len());
}

#[test]
fn test_constrained_placeholder_in_tree() {
    let mut constraints = IndexMap::new();
    constraints.insert("year".to_string(), "[0-9]{4}".to_string());
    let route: CompiledRoute = SegmentRoute::new("/archive/:year[/:slug]")
        .unwrap()
        .with_constraints(&constraints)
        .unwrap()
        .into();

    let m = route.match_path("/archive/2024/hello", None).unwrap();
    assert_eq!(m.param("year"), Some("2024"));
    assert_eq!(m.param("slug"), Some("hello"));
    assert!(route.match_path("/archive/24", None).is_none());
}

#[test]
fn test_syntax_error_reports_position() {
    let err = SegmentRoute::new("/[:foo").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    match err {
        RouteError::Syntax {
            pattern, position, ..
        } => {
            assert_eq!(pattern, "/[:foo");
            assert_eq!(position, 1);
        }
        other => panic!("unexpected error {other:?}"),
    }

    let err = SegmentRoute::new("/:foo]").unwrap_err();
    assert!(matches!(err, RouteError::Syntax { position: 5, .. }));
}

#[test]
fn test_assemble_round_trips_through_match() {
    let route = mvc();
    for path in ["/blog", "/blog/edit", "/blog/edit/7"] {
        let m = route.match_path(path, None).unwrap();
        let assembly = route.assemble(m.params(), None).unwrap();
        assert_eq!(assembly.path, path);
    }
}

#[test]
fn test_assemble_reports_missing_required_parameter() {
    let err = mvc().assemble(&Params::new(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingParameter);
    assert_eq!(err.to_string(), "Missing parameter 'controller'");
}

#[test]
fn test_assemble_ignores_unknown_parameters() {
    let assembly = mvc()
        .assemble(&params(&[("controller", "blog"), ("page", "2")]), None)
        .unwrap();
    assert_eq!(assembly.path, "/blog");
    assert_eq!(assembly.assembled_params, vec!["controller".to_string()]);
}
