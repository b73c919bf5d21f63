//! Recipe type definitions
//!
//! A recipe is the per-game YAML document listing the extraction steps. Each
//! step variant carries its own typed configuration, deserialized straight
//! from the step's YAML mapping.

use serde::Deserialize;
use std::path::PathBuf;

/// A single glob pattern or a list of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Filespec {
    One(String),
    Many(Vec<String>),
}

impl Filespec {
    pub fn patterns(&self) -> Vec<String> {
        match self {
            Filespec::One(p) => vec![p.clone()],
            Filespec::Many(ps) => ps.clone(),
        }
    }
}

/// Patterns of an optional spec field, or `default` when it is absent.
pub fn patterns_or(spec: &Option<Filespec>, default: &str) -> Vec<String> {
    match spec {
        Some(spec) => {
            let patterns = spec.patterns();
            if patterns.is_empty() {
                vec![default.to_string()]
            } else {
                patterns
            }
        }
        None => vec![default.to_string()],
    }
}

/// Copy files matching a glob from the install directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilespecStep {
    pub filespec: Filespec,
    /// Install-relative directory whose sub-structure is mirrored in the output.
    #[serde(default)]
    pub strip_glob_path: Option<String>,
}

/// Run a function from the game's helper registry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HelperStep {
    #[serde(rename = "python")]
    pub helper: String,
}

/// Tag already-extracted output files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagStep {
    pub tag_filespec: Filespec,
}

/// Extract entries from a zip archive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZipStep {
    pub zipfile: String,
    /// Include patterns, tried in priority order.
    #[serde(default)]
    pub zipfilespec: Option<Filespec>,
    #[serde(default)]
    pub zipexcludespec: Option<Filespec>,
}

/// Extract an XACT wave bank with `unxwb`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct XwbStep {
    pub xwb_file: String,
    #[serde(default)]
    pub xsb_file: Option<String>,
    #[serde(default)]
    pub xsb_offset: u64,
}

/// Export Unity asset containers with `AssetRipper`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetsStep {
    pub assetsfile: Filespec,
    #[serde(default)]
    pub assetsfilespec: Option<Filespec>,
    #[serde(default)]
    pub assetsexcludespec: Option<Filespec>,
}

/// Run a QuickBMS script against an archive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuickBmsStep {
    pub quickbmsscript: String,
    pub quickbmsarchive: Filespec,
    #[serde(default)]
    pub quickbmsfilespec: Option<Filespec>,
}

/// Delete output files outside the include/exclude set or too short.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterStep {
    pub filterfilespec: Filespec,
    #[serde(default)]
    pub filterincludespec: Option<Filespec>,
    #[serde(default)]
    pub filterexcludespec: Option<Filespec>,
}

/// Move matching output files up to the output root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlattenStep {
    pub flattenfilespec: Filespec,
}

/// Extract an executable's icon with `icoextract`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IcoStep {
    pub icoextract: String,
    #[serde(default)]
    pub icoextract_index: Option<u32>,
}

/// The primary key identifying each step variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Filespec,
    Helper,
    Tag,
    Zip,
    Xwb,
    Assets,
    QuickBms,
    Filter,
    Flatten,
    Icoextract,
}

impl StepKind {
    /// Dispatch priority: the first key present in a step mapping wins.
    pub const PRIORITY: [StepKind; 10] = [
        StepKind::Filespec,
        StepKind::Helper,
        StepKind::Tag,
        StepKind::Zip,
        StepKind::Xwb,
        StepKind::Assets,
        StepKind::QuickBms,
        StepKind::Filter,
        StepKind::Flatten,
        StepKind::Icoextract,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StepKind::Filespec => "filespec",
            StepKind::Helper => "python",
            StepKind::Tag => "tag_filespec",
            StepKind::Zip => "zipfile",
            StepKind::Xwb => "xwb_file",
            StepKind::Assets => "assetsfile",
            StepKind::QuickBms => "quickbmsscript",
            StepKind::Filter => "filterfilespec",
            StepKind::Flatten => "flattenfilespec",
            StepKind::Icoextract => "icoextract",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Filespec(FilespecStep),
    Helper(HelperStep),
    Tag(TagStep),
    Zip(ZipStep),
    Xwb(XwbStep),
    Assets(AssetsStep),
    QuickBms(QuickBmsStep),
    Filter(FilterStep),
    Flatten(FlattenStep),
    Icoextract(IcoStep),
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Filespec(_) => StepKind::Filespec,
            Step::Helper(_) => StepKind::Helper,
            Step::Tag(_) => StepKind::Tag,
            Step::Zip(_) => StepKind::Zip,
            Step::Xwb(_) => StepKind::Xwb,
            Step::Assets(_) => StepKind::Assets,
            Step::QuickBms(_) => StepKind::QuickBms,
            Step::Filter(_) => StepKind::Filter,
            Step::Flatten(_) => StepKind::Flatten,
            Step::Icoextract(_) => StepKind::Icoextract,
        }
    }
}

/// One supported game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecipe {
    /// Display name, also the album tag value.
    pub name: String,
    /// Candidate folder names under `steamapps/common`.
    pub folders: Vec<String>,
    pub steps: Vec<Step>,
    /// Directory the recipe was loaded from.
    pub source_dir: PathBuf,
}

/// On-disk shape of a recipe before step parsing.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawRecipe {
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub game_folder: Option<Filespec>,
    #[serde(default)]
    pub extract_steps: Vec<serde_yaml::Mapping>,
}
