use std::path::Path;

use anyhow::Context;
use tracing::info;

use super::build::compile;
use super::types::RouteDefinition;
use crate::router::CompiledRoute;

/// Serialization format of a route definition file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Toml,
    Json,
}

impl DefinitionFormat {
    /// `.yaml`/`.yml`, `.toml` and `.json` are recognised (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(DefinitionFormat::Yaml),
            "toml" => Some(DefinitionFormat::Toml),
            "json" => Some(DefinitionFormat::Json),
            _ => None,
        }
    }
}

/// Parse a route definition from text in the given format.
pub fn parse_definition(
    content: &str,
    format: DefinitionFormat,
) -> anyhow::Result<RouteDefinition> {
    let definition = match format {
        DefinitionFormat::Yaml => serde_yaml::from_str(content)?,
        DefinitionFormat::Toml => toml::from_str(content)?,
        DefinitionFormat::Json => serde_json::from_str(content)?,
    };
    Ok(definition)
}

/// Read and parse a route definition file.
pub fn load_definition(path: impl AsRef<Path>) -> anyhow::Result<RouteDefinition> {
    let path = path.as_ref();
    let format = DefinitionFormat::from_path(path).with_context(|| {
        format!(
            "Unsupported route definition format: {} (expected .yaml, .yml, .toml or .json)",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route definition {}", path.display()))?;
    parse_definition(&content, format)
        .with_context(|| format!("Failed to parse route definition {}", path.display()))
}

/// Load a route definition file and compile it into a route tree.
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<CompiledRoute> {
    let path = path.as_ref();
    let definition = load_definition(path)?;
    let route = compile(&definition)
        .with_context(|| format!("Failed to compile routes from {}", path.display()))?;
    info!(
        file = %path.display(),
        routes_count = route.node_count(),
        "Routes loaded"
    );
    Ok(route)
}
