//! Command-line interface for udo.

pub mod args;
pub mod commands;
