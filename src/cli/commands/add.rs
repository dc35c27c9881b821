//! Add command implementation.
//!
//! This module implements the `udo add` command: the due token is resolved
//! against a single captured "now" and the to-do is stored.

use std::fmt::Write;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::core::{DueCalculator, ReferenceInstant};
use crate::error::UdoError;
use crate::todo::{NewTodo, DUE_FORMAT};

use super::Context;

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the due date cannot be resolved, the database is not
/// initialized, or the insert fails.
pub fn add(ctx: &Context, args: AddArgs) -> Result<String, UdoError> {
    let token = args.due.unwrap_or_default();
    let due = DueCalculator::new(ReferenceInstant::now()).due(token)?;
    let todo = NewTodo::from_words(&args.description, args.priority, args.progress, due);

    if args.parse_only {
        return format_parsed(&todo, &token.to_string(), ctx.format);
    }

    let created = ctx.store()?.insert(&todo)?;

    match ctx.format {
        OutputFormat::Json => {
            let output = json!({
                "created": true,
                "todo": created,
            });
            serde_json::to_string_pretty(&output).map_err(UdoError::Parse)
        },
        OutputFormat::Pretty => Ok(format!(
            "to-do: \"{}\" was added with priority: {}",
            created.description, created.priority
        )
        .green()
        .to_string()),
    }
}

fn format_parsed(todo: &NewTodo, token: &str, format: OutputFormat) -> Result<String, UdoError> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "created": false,
                "parsed": {
                    "description": todo.description,
                    "priority": todo.priority,
                    "progress": todo.progress,
                    "token": token,
                    "due": todo.due,
                }
            });
            serde_json::to_string_pretty(&output).map_err(UdoError::Parse)
        },
        OutputFormat::Pretty => {
            let mut output = format!("{}\n", "Parsed to-do (not created)".yellow().bold());
            writeln!(output, "  {} {}", "Description:".cyan().bold(), todo.description).ok();
            writeln!(output, "  {} {}", "Priority:".cyan(), todo.priority).ok();
            writeln!(output, "  {} {}%", "Progress:".cyan(), todo.progress).ok();
            write!(
                output,
                "  {} {} ({token})",
                "Due:".cyan(),
                todo.due.format(DUE_FORMAT)
            )
            .ok();
            Ok(output)
        },
    }
}
