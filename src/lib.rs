pub mod atoms;
pub mod commands;
pub mod engine;
