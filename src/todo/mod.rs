//! To-do model and persistence.

mod store;
mod types;

pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoPatch, DEFAULT_PRIORITY, DUE_FORMAT};
