use indexmap::IndexMap;
use tracing::info;

use super::types::{RouteDefinition, RouteType};
use crate::error::RouteError;
use crate::router::{
    CompiledRoute, LiteralRoute, PartRoute, SegmentRoute, WildcardRoute,
    DEFAULT_KEY_VALUE_DELIMITER, DEFAULT_PARAM_DELIMITER,
};

/// Build a route tree from its definition.
///
/// Pure apart from populating the pattern cache: the same definition always
/// yields an equivalent tree.
///
/// # Errors
///
/// * [`RouteError::Syntax`] - a segment pattern is malformed
/// * [`RouteError::InvalidArgument`] - a required option is missing, a
///   constraint or delimiter is invalid, or a part's base is itself a part
pub fn compile(definition: &RouteDefinition) -> Result<CompiledRoute, RouteError> {
    let route = compile_node(definition)?;
    info!(
        root_type = route.kind(),
        routes_count = route.node_count(),
        route_names = ?route.route_names(),
        "Route tree compiled"
    );
    Ok(route)
}

fn compile_node(definition: &RouteDefinition) -> Result<CompiledRoute, RouteError> {
    if definition.kind == RouteType::Part {
        let base = definition.base.as_deref().ok_or_else(|| {
            RouteError::invalid_argument("Missing \"base\" in part route definition")
        })?;
        let base = compile_node(base)?;
        let children = compile_children(&definition.child_routes)?;
        return Ok(PartRoute::new(base, definition.may_terminate, children)?.into());
    }

    let leaf = compile_leaf(definition)?;
    if definition.child_routes.is_empty() {
        return Ok(leaf);
    }
    let children = compile_children(&definition.child_routes)?;
    Ok(PartRoute::new(leaf, definition.may_terminate, children)?.into())
}

fn compile_children(
    children: &IndexMap<String, RouteDefinition>,
) -> Result<IndexMap<String, CompiledRoute>, RouteError> {
    children
        .iter()
        .map(|(name, child)| Ok((name.clone(), compile_node(child)?)))
        .collect()
}

fn compile_leaf(definition: &RouteDefinition) -> Result<CompiledRoute, RouteError> {
    let options = &definition.options;
    let route_option = || {
        options.route.as_deref().ok_or_else(|| {
            RouteError::invalid_argument(format!(
                "Missing \"route\" in options of {} route",
                definition.kind
            ))
        })
    };

    match definition.kind {
        RouteType::Literal => Ok(LiteralRoute::new(route_option()?)
            .with_defaults(options.defaults.clone())
            .into()),
        RouteType::Segment => Ok(SegmentRoute::new(route_option()?)?
            .with_defaults(options.defaults.clone())
            .with_constraints(&options.constraints)?
            .into()),
        RouteType::Wildcard => Ok(WildcardRoute::new(
            options
                .key_value_delimiter
                .as_deref()
                .unwrap_or(DEFAULT_KEY_VALUE_DELIMITER),
            options
                .param_delimiter
                .as_deref()
                .unwrap_or(DEFAULT_PARAM_DELIMITER),
        )?
        .with_defaults(options.defaults.clone())
        .into()),
        RouteType::Part => Err(RouteError::invalid_argument(
            "part route definition cannot be compiled as a leaf",
        )),
    }
}
