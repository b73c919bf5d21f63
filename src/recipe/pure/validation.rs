// Pure validation of parsed recipes (no I/O)

use crate::error::{ExtractError, Result};

/// Validate the metadata every recipe needs before its steps can run.
pub fn validate_recipe(name: &str, folders: &[String]) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ExtractError::Recipe {
            game: name.to_string(),
            reason: "'game_name' is empty".to_string(),
        });
    }
    if folders.is_empty() || folders.iter().any(|f| f.trim().is_empty()) {
        return Err(ExtractError::Recipe {
            game: name.to_string(),
            reason: "'game_folder' must name at least one non-empty folder".to_string(),
        });
    }
    Ok(())
}
