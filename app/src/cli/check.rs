use anyhow::Result;
use clap::Args;

use nf_config::validator::{validate, IssueLevel};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Node config file path (YAML/JSON). Use '-' for stdin.
    #[arg(short = 'c', long = "config")]
    pub config: String,
    /// Output format: text | json
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Main check function - returns exit code (0 = success, 1 = warnings
/// under --strict, 2 = errors)
pub fn run(args: CheckArgs) -> Result<i32> {
    let cfg = super::load_node(&args.config)?;
    let report = validate(&cfg);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            for issue in &report.issues {
                let level = match issue.level {
                    IssueLevel::Error => "error",
                    IssueLevel::Warning => "warning",
                };
                match &issue.hint {
                    Some(hint) => println!(
                        "{level}: [{}] {}: {} ({hint})",
                        issue.code, issue.field, issue.msg
                    ),
                    None => println!("{level}: [{}] {}: {}", issue.code, issue.field, issue.msg),
                }
            }
            println!(
                "{}: {} issue(s)",
                if report.ok { "ok" } else { "failed" },
                report.issues.len()
            );
        }
    }

    if !report.ok {
        return Ok(2);
    }
    if args.strict && report.has_warnings() {
        return Ok(1);
    }
    Ok(0)
}
