pub mod commands;
pub mod generate;
