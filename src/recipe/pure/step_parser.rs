// Pure parsing of YAML step mappings into typed steps

use serde_yaml::{Mapping, Value};

use crate::error::{ExtractError, Result};
use crate::recipe::types::{Step, StepKind};

/// Identify a step by the first known primary key it contains.
pub fn step_kind(map: &Mapping) -> Option<StepKind> {
    StepKind::PRIORITY
        .iter()
        .copied()
        .find(|kind| map.contains_key(kind.key()))
}

/// Parse one `extract_steps` entry of `game`'s recipe.
pub fn parse_step(game: &str, map: &Mapping) -> Result<Step> {
    let Some(kind) = step_kind(map) else {
        let known: Vec<&str> = StepKind::PRIORITY.iter().map(|k| k.key()).collect();
        return Err(ExtractError::Recipe {
            game: game.to_string(),
            reason: format!("step has none of the known keys ({})", known.join(", ")),
        });
    };

    let value = Value::Mapping(map.clone());
    let invalid = |e: serde_yaml::Error| ExtractError::Recipe {
        game: game.to_string(),
        reason: format!("invalid '{}' step: {}", kind.key(), e),
    };

    let step = match kind {
        StepKind::Filespec => Step::Filespec(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Helper => Step::Helper(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Tag => Step::Tag(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Zip => Step::Zip(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Xwb => Step::Xwb(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Assets => Step::Assets(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::QuickBms => Step::QuickBms(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Filter => Step::Filter(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Flatten => Step::Flatten(serde_yaml::from_value(value).map_err(invalid)?),
        StepKind::Icoextract => Step::Icoextract(serde_yaml::from_value(value).map_err(invalid)?),
    };
    Ok(step)
}
