//! nodeform CLI entrypoint: argument parsing, tracing init, dispatch.

use anyhow::Result;
use clap::Parser;

mod cli;
mod tracing_init;

fn run(args: cli::Args) -> Result<i32> {
    match args.command {
        cli::Commands::Check(a) => cli::check::run(a),
        cli::Commands::Fields(a) => cli::fields::run(a),
        cli::Commands::Import(a) => cli::import::run(a),
    }
}

fn main() {
    tracing_init::init_tracing_once();
    let args = cli::Args::parse();
    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            2
        }
    };
    std::process::exit(code);
}
