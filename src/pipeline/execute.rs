use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, error, info, trace, warn};

use super::types::{GameOutcome, RunContext, RunSummary};
use crate::config::Settings;
use crate::error::{ExtractError, Result};
use crate::file_util::{remove_empty_dir_tree, sanitize_filename};
use crate::platform::steam::find_install_dir;
use crate::recipe::GameRecipe;

/// Recipes for the requested game names, in request order; every known
/// recipe (sorted by name) when none are requested.
pub fn select_recipes<'r>(
    recipes: &'r BTreeMap<String, GameRecipe>,
    names: &[String],
) -> Result<Vec<&'r GameRecipe>> {
    if names.is_empty() {
        return Ok(recipes.values().collect());
    }
    names
        .iter()
        .map(|name| {
            recipes
                .get(name)
                .ok_or_else(|| ExtractError::UnknownGame(name.clone()))
        })
        .collect()
}

/// Output directory of one game.
pub fn output_dir_for(settings: &Settings, recipe: &GameRecipe) -> PathBuf {
    settings.output_path.join(sanitize_filename(&recipe.name))
}

fn run_steps(recipe: &GameRecipe, ctx: &RunContext) -> Result<usize> {
    let mut items = 0;
    for (index, step) in recipe.steps.iter().enumerate() {
        debug!("Step {} ({})", index + 1, step.kind().key());
        let Some(report) = step.execute(ctx)? else {
            continue;
        };
        if !report.stdout.is_empty() {
            trace!("{}", report.stdout.trim_end());
        }
        if !report.stderr.is_empty() {
            trace!("{}", report.stderr.trim_end());
        }
        if !report.succeeded() {
            warn!(
                "{}: step {} ({}) exited with code {}",
                recipe.name,
                index + 1,
                step.kind().key(),
                report.return_code
            );
        }
        items += report.items.len();
    }
    Ok(items)
}

/// Extract one game. Not being installed and an existing output directory
/// (without rescan) are skips, not errors.
pub fn run_game(recipe: &GameRecipe, settings: &Settings) -> Result<GameOutcome> {
    let Some(install_dir) = find_install_dir(&settings.library_roots, &recipe.folders) else {
        debug!("{} is not installed", recipe.name);
        return Ok(GameOutcome::NotInstalled);
    };

    let output_dir = output_dir_for(settings, recipe);
    if output_dir.exists() && !settings.rescan {
        debug!("{} already exists, skipping", output_dir.display());
        return Ok(GameOutcome::AlreadyExtracted);
    }
    std::fs::create_dir_all(&output_dir).map_err(|e| ExtractError::io(&output_dir, e))?;

    info!("{}", recipe.name);
    let ctx = RunContext::new(recipe, settings, install_dir, output_dir);
    let result = run_steps(recipe, &ctx);
    remove_empty_dir_tree(&ctx.output_dir);
    result.map(|items| GameOutcome::Extracted { items })
}

/// Extract every game in `recipes`, continuing past games that fail.
pub fn run_games(recipes: &[&GameRecipe], settings: &Settings) -> RunSummary {
    let mut summary = RunSummary::default();
    for recipe in recipes {
        match run_game(recipe, settings) {
            Ok(GameOutcome::Extracted { .. }) => summary.extracted.push(recipe.name.clone()),
            Ok(_) => summary.skipped.push(recipe.name.clone()),
            Err(e) => {
                error!("{}: {}", recipe.name, e);
                summary.failed.push((recipe.name.clone(), e));
            }
        }
    }
    summary
}
