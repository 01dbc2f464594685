//! # Config Module
//!
//! Route trees are described declaratively and compiled once at startup.
//!
//! - [`RouteDefinition`] - serde model of one route and its named children
//! - [`compile`] - turns a definition into a [`CompiledRoute`](crate::router::CompiledRoute)
//! - [`load_routes`] - reads a YAML, TOML or JSON file and compiles it
//!
//! Child order in the file is the order children are tried when matching.

mod build;
mod load;
mod types;

pub use build::compile;
pub use load::{load_definition, load_routes, parse_definition, DefinitionFormat};
pub use types::{RouteDefinition, RouteOptions, RouteType};
