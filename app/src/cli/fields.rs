use anyhow::Result;
use clap::Args;

use nf_config::{path_role, resolve, PathRole, Visibility};

#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Node config file path (YAML/JSON). Use '-' for stdin.
    #[arg(short = 'c', long = "config")]
    pub config: String,
    /// Output format: text | json
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

fn visibility_str(v: Visibility) -> &'static str {
    match v {
        Visibility::Hidden => "hidden",
        Visibility::Optional => "optional",
        Visibility::Required => "required",
    }
}

pub fn run(args: FieldsArgs) -> Result<i32> {
    let cfg = super::load_node(&args.config)?;
    let vis = resolve(&cfg);
    let role = path_role(cfg.network);

    match args.format.as_str() {
        "json" => {
            let out = serde_json::json!({
                "visibility": vis,
                "path_role": role.map(PathRole::label),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            for (field, v) in vis.iter() {
                println!("{:<16} {}", field.as_str(), visibility_str(v));
            }
            if let Some(role) = role {
                println!("path renders as: {}", role.label());
            }
        }
    }
    Ok(0)
}
