// Team Fortress 2: music lives in the shared sound VPK

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::file_util::{GlobPattern, MatchMode, move_file, remove_empty_ancestors};
use crate::pipeline::RunContext;
use crate::steps::{StepReport, run_captured};

const MUSIC_PATTERN: &str = "sound/music/*";

/// Entry paths from a `vpk L` listing (first field of each non-empty line).
pub fn parse_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

fn vpk_command(vpk: &Path, bin_dir: &Path) -> Command {
    let mut cmd = Command::new(vpk);
    cmd.env_clear().env("LD_LIBRARY_PATH", bin_dir);
    cmd
}

pub fn extract(ctx: &RunContext) -> Result<Option<StepReport>> {
    let bin_dir = ctx.install_dir.join("bin");
    let vpk = bin_dir.join("vpk_linux32");
    if !vpk.is_file() {
        info!("{} not found, skipping", vpk.display());
        return Ok(None);
    }
    let archive = ctx.install_dir.join("hl2").join("hl2_sound_misc_dir.vpk");
    let music_dir: PathBuf = ctx.output_dir.join("sound").join("music");
    std::fs::create_dir_all(&music_dir).map_err(|e| ExtractError::io(&music_dir, e))?;

    let listing = run_captured(vpk_command(&vpk, &bin_dir).arg("L").arg(&archive))?;
    let mut report = StepReport::default();
    report.absorb(&listing);

    let music = GlobPattern::new(MUSIC_PATTERN, MatchMode::Path)?;
    let entries = parse_listing(&String::from_utf8_lossy(&listing.stdout));
    for entry in entries.iter().filter(|e| music.is_match(e)) {
        let output = run_captured(
            vpk_command(&vpk, &bin_dir)
                .current_dir(&ctx.output_dir)
                .arg("x")
                .arg(&archive)
                .arg(entry),
        )?;
        report.absorb(&output);

        let extracted = ctx.output_dir.join(entry);
        if extracted.is_file() {
            move_file(&extracted, &ctx.output_dir, true)?;
            debug!("  {}", entry);
            report.items.push(entry.clone());
        }
    }

    remove_empty_ancestors(&music_dir, &ctx.output_dir);
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_takes_first_field() {
        let stdout = "sound/music/gamestartup1.mp3 crc=0x1 metadatasz=0 fnumber=0 ofs=0 sz=1\n\
                      \n\
                      sound/ui/hint.wav crc=0x2\n";
        assert_eq!(
            parse_listing(stdout),
            vec!["sound/music/gamestartup1.mp3", "sound/ui/hint.wav"]
        );
    }

    #[test]
    fn only_direct_music_entries_match() {
        let music = GlobPattern::new(MUSIC_PATTERN, MatchMode::Path).unwrap();
        assert!(music.is_match("sound/music/gamestartup1.mp3"));
        assert!(!music.is_match("sound/music/sub/a.mp3"));
        assert!(!music.is_match("sound/ui/hint.wav"));
    }
}
