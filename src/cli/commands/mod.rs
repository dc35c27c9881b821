//! Command implementations for udo.
//!
//! This module contains the implementation of all CLI commands.

mod add;
mod list;

pub use add::add;
pub use list::list;

use std::path::PathBuf;

use clap::CommandFactory;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::debug;

use crate::cli::args::{Cli, OutputFormat, UpdateArgs, UpdateDescArgs};
use crate::config::{Config, Paths};
use crate::core::{DueCalculator, DueToken, ReferenceInstant};
use crate::error::UdoError;
use crate::output::{format_due, format_status, to_json};
use crate::storage::Database;
use crate::todo::{TodoPatch, TodoStore};

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    /// Database path given on the command line, if any.
    pub db_path: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Context {
    /// Database location: command line first, then config, then the default.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .or_else(|| self.config.general.database.clone())
            .unwrap_or_else(|| self.paths.database.clone())
    }

    /// Open the to-do store of an initialized database.
    ///
    /// # Errors
    ///
    /// Returns `UdoError::NotInitialized` if neither a database path nor a
    /// config file is available, or the database file does not exist.
    pub fn store(&self) -> Result<TodoStore, UdoError> {
        if self.db_path.is_none() && !self.paths.config_file.exists() {
            return Err(UdoError::NotInitialized(
                "Config file not found. Please run `udo init`".to_string(),
            ));
        }

        let path = self.database_path();
        if !path.exists() {
            return Err(UdoError::NotInitialized(
                "Database not found. Please run `udo init`".to_string(),
            ));
        }

        TodoStore::open_at(&path)
    }
}

fn confirm(prompt: &str) -> Result<bool, UdoError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| UdoError::Prompt(e.to_string()))
}

fn canceled(format: OutputFormat) -> Result<String, UdoError> {
    match format {
        OutputFormat::Pretty => Ok("Operation canceled".yellow().to_string()),
        OutputFormat::Json => to_json(&serde_json::json!({ "canceled": true })),
    }
}

/// Execute init command
///
/// Writes the config file pointing at the database, then creates and
/// migrates the database.
///
/// # Errors
///
/// Returns an error if the config directory, config file or database cannot
/// be written.
pub fn init(ctx: &Context) -> Result<String, UdoError> {
    ctx.paths.ensure_dirs()?;

    let path = ctx.database_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut config = ctx.config.clone();
    config.general.database = Some(path.clone());
    config.save_to_path(&ctx.paths.config_file)?;
    debug!(config = %ctx.paths.config_file.display(), "config written");

    let db = Database::open_at(&path)?;

    match ctx.format {
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "The to-do database is".green(),
            path.display()
        )),
        OutputFormat::Json => to_json(&serde_json::json!({
            "database": path,
            "config": ctx.paths.config_file,
            "schema_version": db.schema_version()?,
        })),
    }
}

/// Execute update command
///
/// Only the fields that were given change; the due date is resolved again
/// only when a token was passed.
///
/// # Errors
///
/// Returns an error if the to-do does not exist or the update fails.
pub fn update(ctx: &Context, args: &UpdateArgs) -> Result<String, UdoError> {
    let due = args
        .due
        .map(|token| DueCalculator::new(ReferenceInstant::now()).due(token))
        .transpose()?;

    let patch = TodoPatch {
        description: None,
        priority: args.priority,
        done: args.done.map(|d| d == 1),
        progress: args.progress,
        due,
    };

    let todo = ctx.store()?.update(args.id, &patch)?;
    format_status(&todo, "updated", ctx.format)
}

/// Execute update-desc command
///
/// # Errors
///
/// Returns an error if the to-do does not exist or the update fails.
pub fn update_desc(ctx: &Context, args: &UpdateDescArgs) -> Result<String, UdoError> {
    let patch = TodoPatch {
        description: Some(args.description.join(" ")),
        ..TodoPatch::default()
    };

    let todo = ctx.store()?.update(args.id, &patch)?;
    format_status(&todo, "updated", ctx.format)
}

/// Execute complete command
///
/// # Errors
///
/// Returns an error if the to-do does not exist or the update fails.
pub fn complete(ctx: &Context, id: i64) -> Result<String, UdoError> {
    let todo = ctx.store()?.update(id, &TodoPatch::completed())?;
    format_status(&todo, "completed", ctx.format)
}

/// Execute remove command
///
/// # Errors
///
/// Returns an error if the to-do does not exist, the prompt fails, or the
/// delete fails.
pub fn remove(ctx: &Context, id: i64, force: bool) -> Result<String, UdoError> {
    let store = ctx.store()?;
    let todo = store
        .get(id)?
        .ok_or_else(|| UdoError::NotFound(format!("to-do #{id}")))?;

    if !force && !confirm(&format!("Delete to-do # {id}: {}?", todo.description))? {
        return canceled(ctx.format);
    }

    let removed = store.delete(id)?;
    match ctx.format {
        OutputFormat::Pretty => Ok(format!(
            "to-do # {}: '{}' was removed",
            removed.id, removed.description
        )
        .green()
        .to_string()),
        OutputFormat::Json => to_json(&serde_json::json!({ "removed": removed })),
    }
}

/// Execute clear command
///
/// # Errors
///
/// Returns an error if the prompt or the delete fails.
pub fn clear(ctx: &Context, force: bool) -> Result<String, UdoError> {
    let store = ctx.store()?;

    if !force && !confirm("Delete all to-dos?")? {
        return canceled(ctx.format);
    }

    let count = store.delete_all()?;
    match ctx.format {
        OutputFormat::Pretty => Ok("All to-dos were removed".green().to_string()),
        OutputFormat::Json => to_json(&serde_json::json!({ "removed": count })),
    }
}

/// Execute due command
///
/// Shows what a token resolves to right now, without touching the database.
///
/// # Errors
///
/// Returns an error if the token cannot be resolved.
pub fn due(token: DueToken, format: OutputFormat) -> Result<String, UdoError> {
    let at = DueCalculator::new(ReferenceInstant::now()).due(token)?;
    format_due(token, at, format)
}

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: clap_complete::Shell) -> Result<String, UdoError> {
    let mut cmd = Cli::command();
    let mut buffer = Vec::new();
    clap_complete::generate(shell, &mut cmd, "udo", &mut buffer);
    String::from_utf8(buffer).map_err(|e| {
        UdoError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::NewTodo;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn context(dir: &TempDir, db_path: Option<PathBuf>) -> Context {
        Context {
            paths: Paths::with_root(dir.path().join(".udo")),
            config: Config::default(),
            db_path,
            format: OutputFormat::Pretty,
        }
    }

    #[test]
    fn test_store_requires_config() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, None);

        match ctx.store() {
            Err(UdoError::NotInitialized(msg)) => assert!(msg.starts_with("Config file not found")),
            _ => panic!("expected NotInitialized"),
        }
    }

    #[test]
    fn test_store_requires_database_file() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, Some(dir.path().join("missing.db")));

        match ctx.store() {
            Err(UdoError::NotInitialized(msg)) => assert!(msg.starts_with("Database not found")),
            _ => panic!("expected NotInitialized"),
        }
    }

    #[test]
    fn test_init_then_store() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, None);

        let out = init(&ctx).unwrap();
        assert!(out.starts_with("The to-do database is"));
        assert!(ctx.paths.config_file.exists());
        assert!(ctx.paths.database.exists());

        let config = Config::load_from_path(&ctx.paths.config_file).unwrap();
        assert_eq!(config.general.database, Some(ctx.paths.database.clone()));
        assert!(ctx.store().is_ok());
    }

    #[test]
    fn test_init_with_custom_database() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("nested").join("todo.db");
        let ctx = context(&dir, Some(db.clone()));

        init(&ctx).unwrap();
        assert!(db.exists());

        let reloaded = Context {
            config: Config::load_from_path(&ctx.paths.config_file).unwrap(),
            db_path: None,
            ..context(&dir, None)
        };
        assert_eq!(reloaded.database_path(), db);
    }

    #[test]
    fn test_update_complete_and_force_remove() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, None);
        init(&ctx).unwrap();

        let due = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let todo = ctx
            .store()
            .unwrap()
            .insert(&NewTodo::from_words(&["pay".to_string(), "rent".to_string()], 2, 0, due))
            .unwrap();

        let out = update(
            &ctx,
            &UpdateArgs {
                id: todo.id,
                priority: Some(1),
                done: None,
                progress: Some(40),
                due: None,
            },
        )
        .unwrap();
        assert_eq!(out, format!("to-do # {} \"pay rent.\" updated!", todo.id));

        let stored = ctx.store().unwrap().get(todo.id).unwrap().unwrap();
        assert_eq!(stored.priority, 1);
        assert_eq!(stored.progress, 40);
        assert_eq!(stored.due, due);

        complete(&ctx, todo.id).unwrap();
        let stored = ctx.store().unwrap().get(todo.id).unwrap().unwrap();
        assert!(stored.done);
        assert_eq!(stored.progress, 100);

        let out = remove(&ctx, todo.id, true).unwrap();
        assert_eq!(out, format!("to-do # {}: 'pay rent.' was removed", todo.id));
        assert!(ctx.store().unwrap().get(todo.id).unwrap().is_none());
    }

    #[test]
    fn test_update_desc_replaces_text() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, None);
        init(&ctx).unwrap();

        let due = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let todo = ctx
            .store()
            .unwrap()
            .insert(&NewTodo::from_words(&["old".to_string()], 2, 0, due))
            .unwrap();

        update_desc(
            &ctx,
            &UpdateDescArgs {
                id: todo.id,
                description: vec!["new".to_string(), "text".to_string()],
            },
        )
        .unwrap();
        let stored = ctx.store().unwrap().get(todo.id).unwrap().unwrap();
        assert_eq!(stored.description, "new text");
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, None);
        init(&ctx).unwrap();

        assert!(matches!(remove(&ctx, 99, true), Err(UdoError::NotFound(_))));
    }

    #[test]
    fn test_completions_mentions_binary() {
        let script = completions(clap_complete::Shell::Bash).unwrap();
        assert!(script.contains("udo"));
    }
}
