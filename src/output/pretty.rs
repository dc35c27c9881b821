use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::Bucket;
use crate::todo::Todo;

/// Narrowest layout the task frame is drawn at.
const MIN_COLUMNS: usize = 40;

fn center(columns: usize, text: &str) -> String {
    let side = " ".repeat(columns.saturating_sub(text.width()) / 2);
    format!("{side}{text}{side}")
}

/// Format one to-do as a framed row: description on the left half,
/// progress bar on the right half.
pub fn format_todo_pretty(todo: &Todo, columns: usize) -> String {
    let columns = columns.max(MIN_COLUMNS);
    let half = columns.div_ceil(2);

    let border = "_".repeat(columns).magenta().to_string();
    let bar = "|".magenta();

    let bar_width = columns.saturating_sub(half + 7);
    let filled = (bar_width * usize::from(todo.progress) + 50) / 100;
    let percentage = format!("{}{}%", "/".repeat(filled), todo.progress);

    let id = format!("ID: {} ===> ", todo.id);
    let text = format!("{id}{}", todo.description);
    let lines = textwrap::wrap(&text, half);
    let first = lines.first().map_or("", |line| &**line);
    let first_styled = first.strip_prefix(id.trim_end()).map_or_else(
        || first.to_string(),
        |rest| format!("{}{rest}", id.trim_end().red()),
    );

    let left_pad = " ".repeat(half.saturating_sub(first.width()));
    let right_pad = " ".repeat(columns.saturating_sub(half + 3 + percentage.width()));

    let mut output = format!("{border}\n");
    output.push_str(&format!(
        "{bar}{first_styled}{left_pad}{bar}{}{right_pad}{bar}\n",
        percentage.bright_yellow()
    ));
    for line in lines.iter().skip(1) {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&border);
    output.push('\n');
    output
}

/// Format the bucketed list. Empty buckets are skipped.
pub fn format_buckets_pretty(buckets: &[Bucket<Todo>], columns: usize) -> String {
    let columns = columns.max(MIN_COLUMNS);
    let mut output = format!("\n{}\n\n", "TO-DO LIST:".blue().bold());

    for bucket in buckets.iter().filter(|b| !b.is_empty()) {
        let heading = center(columns, &bucket.name.as_str().to_uppercase());
        output.push_str(&format!("{}\n", heading.yellow()));
        for todo in &bucket.items {
            output.push_str(&format_todo_pretty(todo, columns));
        }
    }

    output
}

/// Single-line status message about one to-do, e.g. "updated!".
pub fn format_status_pretty(todo: &Todo, verb: &str) -> String {
    format!("to-do # {} \"{}\" {verb}!", todo.id, todo.description)
        .green()
        .to_string()
}
