mod args;
mod config;
mod error;
mod file_util;
mod helpers;
mod paths;
mod pipeline;
mod platform;
mod recipe;
mod steps;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::config::build_settings;
use crate::error::Result;
use crate::paths::PATH_GAMEDATA;
use crate::pipeline::{run_games, select_recipes};
use crate::recipe::load_recipes;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<bool> {
    let gamedata = args
        .gamedata_path
        .clone()
        .unwrap_or_else(|| PATH_GAMEDATA.clone());
    let recipes = load_recipes(&gamedata)?;
    info!("Loaded {} recipes from {}", recipes.len(), gamedata.display());

    if args.list {
        for name in recipes.keys() {
            println!("{}", name);
        }
        return Ok(true);
    }

    let selected = select_recipes(&recipes, &args.games)?;
    let settings = build_settings(args)?;
    let summary = run_games(&selected, &settings);

    info!(
        "{} extracted, {} skipped, {} failed",
        summary.extracted.len(),
        summary.skipped.len(),
        summary.failed.len()
    );
    Ok(summary.success())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("vgmx: {}", e);
            ExitCode::FAILURE
        }
    }
}
