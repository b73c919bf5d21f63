// Pure recipe parsing - no side effects

pub mod step_parser;
pub mod validation;

pub use step_parser::parse_step;
pub use validation::validate_recipe;
