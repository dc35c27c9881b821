//! udo - a to-do list manager for the terminal
//!
//! This crate stores to-dos in `SQLite` and resolves informal due tokens
//! ("tomorrow", "fri", "march", "2030") to the last second of the period
//! they name. Listing groups open to-dos into windows such as "today",
//! "this week" or a calendar month.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod storage;
pub mod todo;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::{DueError, UdoError};
pub use todo::{Todo, TodoStore};
