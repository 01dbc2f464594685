use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use crate::config::load_routes;
use crate::logging::{init_logging_with_config, LogConfig, LogFormat};
use crate::router::{Assembly, MatchResult, Params};

/// Command-line interface for partroute
#[derive(Debug, Parser)]
#[command(name = "partroute")]
#[command(about = "Match and assemble paths against a route tree", long_about = None)]
pub struct Cli {
    /// Log level: trace/debug/info/warn/error
    #[arg(long, global = true, env = "PARTROUTE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format: json or pretty
    #[arg(long, global = true, env = "PARTROUTE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Match a path against the route tree
    Match {
        /// Route definition file (YAML, TOML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Path to match; a query string is ignored
        path: String,

        /// Start matching at this byte offset and accept a partial match
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Assemble the path for a route name
    Assemble {
        /// Route definition file (YAML, TOML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Slash-separated child route name (e.g. `baz/bat`)
        #[arg(short, long)]
        name: Option<String>,

        /// Parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// List every route name in the tree
    Routes {
        /// Route definition file (YAML, TOML or JSON)
        #[arg(short, long)]
        routes: PathBuf,
    },
}

pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: no `=` found in `{}`", s))?;
    if key.is_empty() {
        return Err(format!("invalid key=value pair: empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Run a parsed command line
///
/// Returns [`ExitCode::FAILURE`] when `match` finds no route; every other
/// problem is returned as an error.
pub fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    let log_config = LogConfig {
        log_level: cli.log_level.clone(),
        format: LogFormat::parse(&cli.log_format),
        ..LogConfig::from_env()
    };
    // A subscriber may already be installed when embedded in another process
    if let Err(err) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {err}");
    }

    match cli.command {
        Commands::Match {
            routes,
            path,
            offset,
        } => {
            let tree = load_routes(&routes)?;
            match tree.match_path(&path, offset) {
                Some(m) => {
                    println!("{}", render_match(&m, cli.json)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    if cli.json {
                        println!("null");
                    } else {
                        println!("no match");
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Assemble {
            routes,
            name,
            params,
        } => {
            let tree = load_routes(&routes)?;
            let params: Params = params.into_iter().collect();
            let assembly = tree.assemble(&params, name.as_deref())?;
            println!("{}", render_assembly(&assembly, cli.json)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes { routes } => {
            let tree = load_routes(&routes)?;
            let names = tree.route_names();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{}", if name.is_empty() { "<root>" } else { &name });
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

pub(crate) fn render_match(m: &MatchResult, as_json: bool) -> anyhow::Result<String> {
    if as_json {
        let value = json!({
            "route_name": m.matched_route_name(),
            "length": m.length(),
            "params": m.params(),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    let mut out = format!(
        "route: {}\nlength: {}",
        m.matched_route_name().as_deref().unwrap_or("<root>"),
        m.length()
    );
    for (key, value) in m.params() {
        out.push_str(&format!("\n  {} = {}", key, value));
    }
    Ok(out)
}

pub(crate) fn render_assembly(assembly: &Assembly, as_json: bool) -> anyhow::Result<String> {
    if as_json {
        let value = json!({
            "path": assembly.path,
            "assembled_params": assembly.assembled_params,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(format!(
        "{}\nassembled: {}",
        assembly.path,
        assembly.assembled_params.join(", ")
    ))
}
