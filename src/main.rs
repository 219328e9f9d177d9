//! sqlmap-config
//!
//! Loads a configuration document, assembles it and prints what got
//! installed as JSON.
//!
//! ```text
//! sqlmap-config sqlmap-config.xml -e production -D db.password=secret -r ./resources
//! ```

use std::path::PathBuf;

use clap::Parser;

use sqlmap_config::config::{load_configuration, LoadOptions};
use sqlmap_config::observability::init_logging;
use sqlmap_config::properties::PropertyBag;
use sqlmap_config::session::ConfigurationSummary;

#[derive(Parser)]
#[command(name = "sqlmap-config")]
#[command(about = "Assemble a configuration document and print the result", long_about = None)]
struct Cli {
    /// Configuration document (XML)
    config: PathBuf,

    /// Environment to select instead of the document's default
    #[arg(short, long)]
    environment: Option<String>,

    /// Variable override, KEY=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_parser = parse_define)]
    defines: Vec<(String, String)>,

    /// Directory to resolve resource paths against (repeatable)
    #[arg(short = 'r', long = "resource-root")]
    resource_roots: Vec<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "sqlmap_config=info")]
    log_level: String,
}

fn parse_define(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    tracing::info!(config = %cli.config.display(), "sqlmap-config v0.1.0 starting");

    let options = LoadOptions {
        environment: cli.environment,
        properties: cli.defines.into_iter().collect::<PropertyBag>(),
        resource_roots: cli.resource_roots,
        registry: None,
    };
    let configuration = load_configuration(&cli.config, options)?;
    let summary = ConfigurationSummary::from(&configuration);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
