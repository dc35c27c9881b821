//! Storage layer for udo.
//!
//! SQLite-based persistence for the to-do list.

mod database;
mod migrations;

pub use database::Database;
