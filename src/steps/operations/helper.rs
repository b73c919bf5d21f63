use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::helpers;
use crate::pipeline::RunContext;
use crate::recipe::HelperStep;
use crate::steps::StepReport;

impl HelperStep {
    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let Some(helper) = helpers::lookup(&ctx.game_name, &self.helper) else {
            return Err(ExtractError::MissingHelper {
                game: ctx.game_name.clone(),
                helper: self.helper.clone(),
            });
        };
        debug!("Running helper '{}' for {}", self.helper, ctx.game_name);
        helper(ctx)
    }
}
