use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::{resolve, DueToken};
use crate::todo::DEFAULT_PRIORITY;

#[derive(Parser)]
#[command(name = "udo")]
#[command(about = "A to-do list manager with informal due dates")]
#[command(long_about = "udo - a to-do list manager for the terminal

Tasks carry a priority, a progress percentage and a due date. Due dates are
given as informal tokens and resolved to the last second of the period they
name: end of today, end of next Friday, end of March, end of 2030.

QUICK START:
  udo init                          Create the config and database
  udo add buy milk -d tomorrow      Add a to-do due tomorrow
  udo list                          Show open to-dos grouped by due window
  udo complete 1                    Mark to-do #1 as done

DUE TOKENS:
  today, now, day, td               End of today
  tomorrow, tm                      End of tomorrow
  monday..sunday, mon..sun          End of the next such weekday (never today)
  week, wk                          End of this week (next Sunday)
  january..december, jan..dec       End of the next such month
  month, mn                         End of this month
  01..31                            End of the next such day of the month
  2023..2040                        End of that year
  year                              End of this year")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to the configured format.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path of the to-do database, overriding the config file
    #[arg(long, global = true, env = "UDO_DB", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the to-do database
    ///
    /// Writes ~/.udo/config.yaml pointing at the database and creates the
    /// database. Use --db-path to choose where the database lives.
    ///
    /// # Examples
    ///
    ///   udo init
    ///   udo --db-path ~/Dropbox/todo.db init
    Init,

    /// Add a new to-do with a DESCRIPTION
    ///
    /// All words are joined into the description; a trailing period is added
    /// if missing. Without --due the to-do is due at the end of today.
    ///
    /// # Examples
    ///
    ///   udo add buy milk
    ///   udo add file taxes -d april -p 1
    ///   udo add write report --progress 20 -d fri
    #[command(alias = "a")]
    Add(AddArgs),

    /// List to-dos grouped by due window
    ///
    /// Open to-dos are grouped under outdated, today, tomorrow, this week,
    /// this month, the calendar months and this year.
    ///
    /// # Examples
    ///
    ///   udo list
    ///   udo list --all
    ///   udo list -o json
    #[command(alias = "ls")]
    List(ListArgs),

    /// Update the priority, state, progress or due date of a to-do
    ///
    /// # Examples
    ///
    ///   udo update 3 -p 1
    ///   udo update 3 --progress 60 -d tm
    Update(UpdateArgs),

    /// Replace the description of a to-do
    ///
    /// # Examples
    ///
    ///   udo update-desc 3 buy oat milk
    UpdateDesc(UpdateDescArgs),

    /// Complete a to-do by setting it as done
    ///
    /// Sets progress to 100%.
    ///
    /// # Examples
    ///
    ///   udo complete 3
    Complete {
        /// ID of the to-do
        id: i64,
    },

    /// Remove a to-do
    ///
    /// Asks for confirmation unless --force is given.
    ///
    /// # Examples
    ///
    ///   udo remove 3
    ///   udo remove 3 --force
    #[command(alias = "rm")]
    Remove {
        /// ID of the to-do
        id: i64,

        /// Force deletion without confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Remove all to-dos
    ///
    /// Asks for confirmation unless --force is given.
    Clear {
        /// Force deletion without confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show how a due token resolves right now
    ///
    /// # Examples
    ///
    ///   udo due fri
    ///   udo due 2030 -o json
    Due {
        /// Due token to resolve
        #[arg(value_parser = resolve)]
        token: DueToken,
    },

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   udo completions bash > ~/.local/share/bash-completion/completions/udo
    ///   udo completions zsh > ~/.zsh/completions/_udo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Description of the to-do
    #[arg(required = true)]
    pub description: Vec<String>,

    /// Priority, 1 (highest) to 3 (lowest)
    #[arg(short, long, default_value_t = DEFAULT_PRIORITY, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub priority: u8,

    /// Progress in percent
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub progress: u8,

    /// Due token (see `udo --help` for the accepted tokens)
    #[arg(short, long, value_parser = resolve)]
    pub due: Option<DueToken>,

    /// Show what would be added without saving it
    #[arg(long)]
    pub parse_only: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// List all to-dos, including completed ones
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// ID of the to-do
    pub id: i64,

    /// Priority, 1 (highest) to 3 (lowest)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub priority: Option<u8>,

    /// Done state, 0 or 1
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub done: Option<u8>,

    /// Progress in percent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub progress: Option<u8>,

    /// New due token
    #[arg(short, long, value_parser = resolve)]
    pub due: Option<DueToken>,
}

#[derive(Args)]
pub struct UpdateDescArgs {
    /// ID of the to-do
    pub id: i64,

    /// New description
    #[arg(required = true)]
    pub description: Vec<String>,
}
