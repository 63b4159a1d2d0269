pub mod analyze;
pub mod generate;
pub mod inputs;
pub mod screen;
