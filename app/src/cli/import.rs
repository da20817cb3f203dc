use anyhow::Result;
use clap::Args;
use tracing::warn;

use nf_config::import::parse_share_link;
use nf_config::NodeConfig;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File with one share link per line. Use '-' for stdin.
    #[arg(default_value = "-")]
    pub input: String,
}

/// Parse share links into node JSON. Bad lines are reported and skipped;
/// exit code 1 when any line failed.
pub fn run(args: ImportArgs) -> Result<i32> {
    let text = super::read_input(&args.input)?;

    let mut nodes: Vec<NodeConfig> = Vec::new();
    let mut failed = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_share_link(line) {
            Ok(node) => nodes.push(node),
            Err(e) => {
                warn!(line = lineno + 1, "skipping link: {:#}", e);
                failed += 1;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(if failed > 0 { 1 } else { 0 })
}
