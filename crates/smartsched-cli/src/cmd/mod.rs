pub mod analyze;
pub mod dot;
pub mod generate;
