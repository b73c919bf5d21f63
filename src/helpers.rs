//! Per-game helper functions
//!
//! Games whose music cannot be described by the generic steps get a Rust
//! function here, referenced from the recipe by name (`python: <name>`).

mod team_fortress_2;

use crate::error::Result;
use crate::pipeline::RunContext;
use crate::steps::StepReport;

pub type HelperFn = fn(&RunContext) -> Result<Option<StepReport>>;

/// (game name, helper name, function)
static REGISTRY: &[(&str, &str, HelperFn)] =
    &[("Team Fortress 2", "extract", team_fortress_2::extract)];

pub fn lookup(game: &str, helper: &str) -> Option<HelperFn> {
    REGISTRY
        .iter()
        .find(|(g, h, _)| *g == game && *h == helper)
        .map(|(_, _, f)| *f)
}
