//! List command implementation.

use colored::Colorize;

use crate::cli::args::{ListArgs, OutputFormat};
use crate::core::{bucketize, ReferenceInstant};
use crate::error::UdoError;
use crate::output::format_buckets;

use super::Context;

/// Execute the list command.
///
/// Every bucket is computed against one captured instant so that a to-do
/// cannot move between windows while the list is being built.
///
/// # Errors
///
/// Returns an error if the database is not initialized or cannot be read.
pub fn list(ctx: &Context, args: &ListArgs) -> Result<String, UdoError> {
    let store = ctx.store()?;
    let todos = store.list_all()?;

    if todos.is_empty() && ctx.format == OutputFormat::Pretty {
        return Ok("There are no tasks in the to-do list yet"
            .yellow()
            .to_string());
    }

    let buckets = bucketize(&todos, ReferenceInstant::now(), args.all)?;
    format_buckets(&buckets, ctx.format)
}
