mod io;
pub mod pure;
mod types;

pub use io::load_recipes;
pub use types::{
    AssetsStep, Filespec, FilespecStep, FilterStep, FlattenStep, GameRecipe, HelperStep, IcoStep,
    QuickBmsStep, Step, TagStep, XwbStep, ZipStep, patterns_or,
};
