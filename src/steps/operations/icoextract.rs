use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, trace};

use super::process::{find_tool, run_captured};
use crate::error::Result;
use crate::pipeline::RunContext;
use crate::recipe::IcoStep;
use crate::steps::StepReport;

impl IcoStep {
    /// `<output>/<exe stem>.ico`
    pub fn icon_path(&self, output_dir: &Path) -> PathBuf {
        let stem = Path::new(&self.icoextract)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "icon".to_string());
        output_dir.join(format!("{stem}.ico"))
    }

    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let icon = self.icon_path(&ctx.output_dir);
        if icon.exists() && !ctx.settings.overwrite {
            trace!("{} already exists, skipping", icon.display());
            return Ok(None);
        }
        let Some(tool) = find_tool("icoextract") else {
            info!("icoextract is not installed, skipping {}", self.icoextract);
            return Ok(None);
        };

        let mut cmd = Command::new(tool);
        if let Some(index) = self.icoextract_index {
            cmd.arg("-n").arg(index.to_string());
        }
        cmd.arg(ctx.install_dir.join(&self.icoextract)).arg(&icon);
        let output = run_captured(&mut cmd)?;

        let mut report = StepReport::default();
        report.absorb(&output);
        if icon.is_file() {
            report.items.push(icon.display().to_string());
        }
        Ok(Some(report))
    }
}
