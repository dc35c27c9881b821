use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;

use udo::cli::args::{Cli, Commands};
use udo::cli::commands::{self, Context};
use udo::config::{Config, Paths};
use udo::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {e:#}", "error".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file).context("loading configuration")?;

    logging::init(&config.general.log_level);
    config.general.color.apply();

    let ctx = Context {
        format: cli.output.unwrap_or(config.general.default_output),
        db_path: cli.db_path,
        paths,
        config,
    };

    let output = match cli.command {
        Commands::Init => commands::init(&ctx)?,
        Commands::Add(args) => commands::add(&ctx, args)?,
        Commands::List(args) => commands::list(&ctx, &args)?,
        Commands::Update(args) => commands::update(&ctx, &args)?,
        Commands::UpdateDesc(args) => commands::update_desc(&ctx, &args)?,
        Commands::Complete { id } => commands::complete(&ctx, id)?,
        Commands::Remove { id, force } => commands::remove(&ctx, id, force)?,
        Commands::Clear { force } => commands::clear(&ctx, force)?,
        Commands::Due { token } => commands::due(token, ctx.format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
