use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Extract music from installed Steam games into tagged, per-game folders
#[derive(Parser, Debug)]
#[command(name = "vgmx", version)]
pub struct Args {
    /// Increase verbosity (-v games, -vv files, -vvv tool output)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Games to extract (default: every known game)
    #[arg(value_name = "GAME")]
    pub games: Vec<String>,

    /// Path to the output folder
    #[arg(short = 'o', long = "outputpath", required_unless_present = "list")]
    pub output_path: Option<PathBuf>,

    /// Path to a Steam library folder containing steamapps/
    #[arg(long = "steamlibrarypath")]
    pub steam_library_path: Option<PathBuf>,

    /// Appended to the game name in the album tag of each track
    #[arg(
        short = 'a',
        long = "albumsuffix",
        default_value = " [VGMX]",
        allow_hyphen_values = true
    )]
    pub album_suffix: String,

    /// Preferred file format/extension, or '*' for all
    #[arg(long, default_value = "*")]
    pub format: String,

    /// Overwrite existing files
    #[arg(long)]
    pub overwrite: bool,

    /// Extract games whose output folder already exists
    #[arg(long)]
    pub rescan: bool,

    /// Minimum duration in seconds of tracks to keep
    #[arg(long = "minduration", default_value_t = 30)]
    pub min_duration: u32,

    /// Folder containing the game recipes (*.yaml)
    #[arg(long = "gamedatapath")]
    pub gamedata_path: Option<PathBuf>,

    /// List the known games and exit
    #[arg(long)]
    pub list: bool,
}
