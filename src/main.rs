use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use restore_browser::cli::{Cli, Command};
use restore_browser::commands;
use restore_browser::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity; the TUI owns the terminal
    let interactive = matches!(cli.command, Command::Tui(_));
    init_logging(cli.verbose, cli.quiet, interactive);

    // Load configuration, then apply command-line overrides
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }
    if let Some(lang) = cli.lang {
        config.display.locale = lang;
    }
    config.validate()?;

    tracing::debug!(
        server = %config.server.base_url,
        locale = %config.display.locale,
        "Loaded configuration"
    );

    // Dispatch to subcommand
    match cli.command {
        Command::Backups(args) => commands::backups::run(args, &config)?,
        Command::Ls(args) => {
            tracing::info!(?args, "Listing directory");
            commands::browse::run_ls(args, &config)?;
        }
        Command::Tree(args) => {
            tracing::info!(?args, "Printing tree");
            commands::browse::run_tree(args, &config)?;
        }
        Command::Download(args) => {
            tracing::info!(?args, "Starting download");
            commands::download::run(args, &config)?;
        }
        Command::DownloadMany(args) => {
            tracing::info!(?args, "Starting bulk download");
            commands::download::run_many(args, &config)?;
        }
        Command::Tui(args) => {
            tracing::info!(?args, "Starting TUI");
            restore_browser::tui::run(&config, args.backup)?;
        }
        Command::Completions(args) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(args.shell, &mut command, name, &mut io::stdout());
        }
        Command::Man => {
            clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool, interactive: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if interactive && verbosity == 0 {
        "off"
    } else if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("restore_browser={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
