//! Recipe loading
//!
//! Reads every `*.yaml` file of a gamedata directory into a [`GameRecipe`].

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, warn};

use super::pure::{parse_step, validate_recipe};
use super::types::{Filespec, GameRecipe, RawRecipe};
use crate::error::{ExtractError, Result};

/// Parse one recipe document. `stem` is the file name without extension and
/// provides the defaults for `game_name` and `game_folder`.
pub fn parse_recipe(stem: &str, text: &str, source_dir: &Path) -> Result<GameRecipe> {
    let yaml_error = |source| ExtractError::Yaml {
        path: source_dir.join(format!("{stem}.yaml")),
        source,
    };
    let value: Value = serde_yaml::from_str(text).map_err(yaml_error)?;
    let raw: RawRecipe = if value.is_null() {
        RawRecipe::default()
    } else {
        serde_yaml::from_value(value).map_err(yaml_error)?
    };

    let name = raw.game_name.unwrap_or_else(|| stem.to_string());
    let folders = raw
        .game_folder
        .unwrap_or_else(|| Filespec::One(name.clone()))
        .patterns();
    validate_recipe(&name, &folders)?;

    let steps = raw
        .extract_steps
        .iter()
        .map(|map| parse_step(&name, map))
        .collect::<Result<Vec<_>>>()?;

    Ok(GameRecipe {
        name,
        folders,
        steps,
        source_dir: source_dir.to_path_buf(),
    })
}

/// Load every recipe in `dir`, keyed by game name.
///
/// A file whose `game_name` differs from its stem is keyed by `game_name`.
pub fn load_recipes(dir: &Path) -> Result<BTreeMap<String, GameRecipe>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ExtractError::io(dir, e))?;
    let mut paths: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    paths.sort();

    let mut recipes = BTreeMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        let text = std::fs::read_to_string(&path).map_err(|e| ExtractError::io(&path, e))?;
        let recipe = parse_recipe(&stem, &text, dir)?;
        if recipe.name != stem {
            debug!("Recipe {} declares game '{}'", path.display(), recipe.name);
        }
        if recipes.contains_key(&recipe.name) {
            warn!(
                "Recipe {} redeclares '{}', replacing the earlier one",
                path.display(),
                recipe.name
            );
        }
        recipes.insert(recipe.name.clone(), recipe);
    }
    Ok(recipes)
}
