use std::process::Command;

use tracing::{info, trace};

use super::process::{find_tool, run_answering};
use crate::error::Result;
use crate::pipeline::RunContext;
use crate::recipe::XwbStep;
use crate::steps::StepReport;

impl XwbStep {
    /// Arguments for `unxwb`, program name excluded.
    pub fn unxwb_args(&self, ctx: &RunContext) -> Vec<String> {
        let mut args = vec!["-d".to_string(), ctx.output_dir.display().to_string()];
        if let Some(xsb) = &self.xsb_file {
            args.push("-b".to_string());
            args.push(ctx.install_dir.join(xsb).display().to_string());
            args.push(self.xsb_offset.to_string());
        }
        args.push(ctx.install_dir.join(&self.xwb_file).display().to_string());
        args
    }

    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let Some(unxwb) = find_tool("unxwb") else {
            info!("unxwb is not installed, skipping {}", self.xwb_file);
            return Ok(None);
        };

        // unxwb asks before replacing each existing file
        let answer = if ctx.settings.overwrite { "y" } else { "n" };
        let output = run_answering(Command::new(unxwb).args(self.unxwb_args(ctx)), answer)?;
        trace!("unxwb exited with {}", output.status);

        let mut report = StepReport::default();
        report.absorb(&output);
        report.items.push(self.xwb_file.clone());
        Ok(Some(report))
    }
}
