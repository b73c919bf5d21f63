//! Extraction steps
//!
//! Every recipe step reads from the game's install directory and/or the
//! output of earlier steps and writes into the game's output directory.

mod operations;
pub mod pure;
mod types;

pub use operations::process::run_captured;
pub use types::StepReport;

use crate::error::Result;
use crate::pipeline::RunContext;
use crate::recipe::Step;

impl Step {
    /// Run this step for one game. `None` means the step had nothing to do.
    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        match self {
            Step::Filespec(step) => step.execute(ctx),
            Step::Helper(step) => step.execute(ctx),
            Step::Tag(step) => step.execute(ctx),
            Step::Zip(step) => step.execute(ctx),
            Step::Xwb(step) => step.execute(ctx),
            Step::Assets(step) => step.execute(ctx),
            Step::QuickBms(step) => step.execute(ctx),
            Step::Filter(step) => step.execute(ctx),
            Step::Flatten(step) => step.execute(ctx),
            Step::Icoextract(step) => step.execute(ctx),
        }
    }
}
