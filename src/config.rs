pub mod operations;
pub mod types;

pub use operations::build_settings;
pub use types::{FormatFilter, Settings};
