pub mod check;
pub mod fields;
pub mod import;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;

use nf_config::NodeConfig;

#[derive(Parser, Debug)]
#[command(name = "nodeform")]
#[command(about = "Proxy node configuration tools", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a node configuration without touching the network
    Check(check::CheckArgs),
    /// Resolve and print field visibility for a node configuration
    Fields(fields::FieldsArgs),
    /// Parse share links (one per line) into node JSON
    Import(import::ImportArgs),
}

/// Read a file argument, with '-' meaning stdin.
pub(crate) fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read {}", path))
    }
}

/// Load a node record from a path argument (JSON or YAML, '-' for stdin).
pub(crate) fn load_node(path: &str) -> Result<NodeConfig> {
    let text = read_input(path)?;
    NodeConfig::from_text(&text).with_context(|| format!("parse node config {}", path))
}
