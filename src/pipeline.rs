//! Per-game pipeline runner
//!
//! Locates each requested game, runs its recipe steps in order and prunes
//! empty directories from its output afterwards.

mod execute;
mod types;

pub use execute::{run_games, select_recipes};
pub use types::RunContext;
