use std::path::PathBuf;
use std::process::Command;

use tracing::{info, trace, warn};

use super::process::{find_tool, run_captured};
use crate::error::Result;
use crate::file_util::glob_files;
use crate::pipeline::RunContext;
use crate::recipe::QuickBmsStep;
use crate::steps::StepReport;

impl QuickBmsStep {
    /// The script next to the recipe, or else inside the install directory.
    pub fn script_path(&self, ctx: &RunContext) -> PathBuf {
        let beside_recipe = ctx.recipe_dir.join(&self.quickbmsscript);
        if beside_recipe.is_file() {
            beside_recipe
        } else {
            ctx.install_dir.join(&self.quickbmsscript)
        }
    }

    /// Option arguments preceding the script, archive and output paths.
    pub fn option_args(&self, overwrite: bool) -> Vec<String> {
        let mut args = vec![if overwrite { "-o" } else { "-k" }.to_string()];
        if let Some(spec) = &self.quickbmsfilespec {
            let patterns = spec.patterns();
            if !patterns.is_empty() {
                args.push("-f".to_string());
                args.push(patterns.join(";"));
            }
        }
        args
    }

    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let Some(quickbms) = find_tool("quickbms") else {
            info!("quickbms is not installed, skipping {}", self.quickbmsscript);
            return Ok(None);
        };
        let script = self.script_path(ctx);
        if !script.is_file() {
            warn!("QuickBMS script {} not found", self.quickbmsscript);
            return Ok(None);
        }

        let mut report = StepReport::default();
        for pattern in self.quickbmsarchive.patterns() {
            for archive in glob_files(&ctx.install_dir, &pattern)? {
                let mut cmd = Command::new(&quickbms);
                cmd.args(self.option_args(ctx.settings.overwrite))
                    .arg(&script)
                    .arg(&archive)
                    .arg(&ctx.output_dir);
                let output = run_captured(&mut cmd)?;
                trace!("quickbms exited with {} for {}", output.status, archive.display());
                report.absorb(&output);
                report.items.push(archive.display().to_string());
            }
        }
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::recipe::{Filespec, GameRecipe};
    use std::fs;
    use tempfile::tempdir;

    fn step(filespec: Option<Filespec>) -> QuickBmsStep {
        QuickBmsStep {
            quickbmsscript: "game.bms".into(),
            quickbmsarchive: Filespec::One("data/*.pak".into()),
            quickbmsfilespec: filespec,
        }
    }

    #[test]
    fn keep_or_overwrite_flag() {
        assert_eq!(step(None).option_args(false), vec!["-k"]);
        assert_eq!(step(None).option_args(true), vec!["-o"]);
    }

    #[test]
    fn file_filters_are_joined() {
        let s = step(Some(Filespec::Many(vec!["*.ogg".into(), "*.wav".into()])));
        assert_eq!(s.option_args(false), vec!["-k", "-f", "*.ogg;*.wav"]);
    }

    #[test]
    fn script_prefers_recipe_directory() {
        let gamedata = tempdir().unwrap();
        let install = tempdir().unwrap();
        let recipe = GameRecipe {
            name: "Game".into(),
            folders: vec!["Game".into()],
            steps: Vec::new(),
            source_dir: gamedata.path().to_path_buf(),
        };
        let settings = Settings::default();
        let ctx = RunContext::new(
            &recipe,
            &settings,
            install.path().to_path_buf(),
            PathBuf::from("/out"),
        );

        assert_eq!(step(None).script_path(&ctx), install.path().join("game.bms"));
        fs::write(gamedata.path().join("game.bms"), "").unwrap();
        assert_eq!(step(None).script_path(&ctx), gamedata.path().join("game.bms"));
    }
}
