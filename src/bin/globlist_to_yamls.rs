//! Turn a list of glob patterns such as `Some Game/music/*.mp3` (one per
//! line on stdin) into gamedata recipes, one `<game>.yaml` per leading
//! path component, each pattern becoming a `filespec` step.

use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

/// Generate gamedata recipes from glob patterns read on stdin
#[derive(Parser, Debug)]
#[command(name = "globlist-to-yamls", version)]
struct Args {
    /// Folder the recipes are written to
    #[arg(short = 'o', long = "outputpath", default_value = ".")]
    output_path: PathBuf,
}

#[derive(Debug, Error)]
enum GenError {
    #[error("failed to read stdin: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, PartialEq)]
struct FilespecStep {
    filespec: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct Recipe {
    game_name: String,
    game_folder: String,
    extract_steps: Vec<FilespecStep>,
}

/// Split `Game/dir/*.mp3` into (`Game`, `dir/*.mp3`).
fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim().trim_start_matches("./");
    let (game, pattern) = line.split_once('/')?;
    let pattern = pattern.trim_start_matches('/');
    if game.is_empty() || pattern.is_empty() {
        return None;
    }
    Some((game, pattern))
}

/// Group patterns by game, keeping each game's patterns in input order.
fn build_recipes<I, S>(lines: I) -> BTreeMap<String, Recipe>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut recipes: BTreeMap<String, Recipe> = BTreeMap::new();
    for line in lines {
        let Some((game, pattern)) = split_line(line.as_ref()) else {
            continue;
        };
        recipes
            .entry(game.to_string())
            .or_insert_with(|| Recipe {
                game_name: game.to_string(),
                game_folder: game.to_string(),
                extract_steps: Vec::new(),
            })
            .extract_steps
            .push(FilespecStep {
                filespec: pattern.to_string(),
            });
    }
    recipes
}

fn run(args: &Args) -> Result<usize, GenError> {
    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(GenError::Read)?;

    let recipes = build_recipes(&lines);
    for (game, recipe) in &recipes {
        let path = args.output_path.join(format!("{game}.yaml"));
        let text = format!("---\n{}", serde_yaml::to_string(recipe)?);
        std::fs::write(&path, text).map_err(|source| GenError::Write {
            path: path.clone(),
            source,
        })?;
        println!("{}", path.display());
    }
    Ok(recipes.len())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("globlist-to-yamls: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_grouped_by_game() {
        let recipes = build_recipes([
            "Game A/music/*.mp3",
            "Game B/ost/**/*.ogg",
            "",
            "nofolder.mp3",
            "Game A/bonus/*.flac",
        ]);

        assert_eq!(recipes.len(), 2);
        let a = &recipes["Game A"];
        assert_eq!(a.game_folder, "Game A");
        assert_eq!(
            a.extract_steps,
            vec![
                FilespecStep {
                    filespec: "music/*.mp3".into()
                },
                FilespecStep {
                    filespec: "bonus/*.flac".into()
                },
            ]
        );
        assert_eq!(recipes["Game B"].extract_steps[0].filespec, "ost/**/*.ogg");
    }

    #[test]
    fn recipe_yaml_lists_filespec_steps() {
        let recipes = build_recipes(["Game/music/*.mp3"]);
        let yaml = serde_yaml::to_string(&recipes["Game"]).unwrap();
        assert!(yaml.starts_with("game_name: Game\ngame_folder: Game\nextract_steps:\n"));
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["extract_steps"][0]["filespec"].as_str(), Some("music/*.mp3"));
    }
}
