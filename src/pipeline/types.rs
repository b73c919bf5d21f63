use std::path::PathBuf;

use crate::config::Settings;
use crate::error::ExtractError;
use crate::recipe::GameRecipe;

/// Everything a step needs to run for one game.
#[derive(Debug, Clone)]
pub struct RunContext<'a> {
    pub game_name: String,
    /// Album tag value: game name plus the configured suffix.
    pub album: String,
    pub install_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Directory the recipe was loaded from.
    pub recipe_dir: PathBuf,
    pub settings: &'a Settings,
}

impl<'a> RunContext<'a> {
    pub fn new(
        recipe: &GameRecipe,
        settings: &'a Settings,
        install_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            game_name: recipe.name.clone(),
            album: settings.album_for(&recipe.name),
            install_dir,
            output_dir,
            recipe_dir: recipe.source_dir.clone(),
            settings,
        }
    }
}

/// What happened to one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// No library root contains any of the game's folders.
    NotInstalled,
    /// The output directory exists and rescanning is off.
    AlreadyExtracted,
    /// The steps ran; `items` counts the items the steps reported.
    Extracted { items: usize },
}

/// Per-game results of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub extracted: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, ExtractError)>,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}
