use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use evgen_cli::commands::{export, preview, reorder, util};
use evgen_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    tracing::debug!(?config, "loaded configuration");
    let parser_config = config.parser_config().context("invalid configuration")?;

    let now = chrono::Local::now().naive_local();
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Preview { file, json } => {
            let text = util::read_schedule(file.as_deref())?;
            preview::run(&mut stdout, &text, &parser_config, now, *json)?;
        }
        Commands::Export { file, output } => {
            let text = util::read_schedule(file.as_deref())?;
            export::run(&mut stdout, &text, &parser_config, now, output.as_deref())?;
        }
        Commands::Move {
            file,
            from,
            to,
            in_place,
        } => {
            let text = util::read_schedule(file.as_deref())?;
            let target = if *in_place { file.as_deref() } else { None };
            reorder::run(&mut stdout, &text, *from, *to, target)?;
        }
    }

    stdout.flush()?;
    Ok(())
}
