//! Belongings CLI entry point.

use belongings::cli::commands;
use belongings::cli::{error_report, Cli, Commands, OutputFormat};
use belongings::error::Error;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.quiet {
        belongings::QUIET.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    // Resolve effective JSON mode: --json OR --format json OR non-TTY stdout
    let json = cli.json
        || cli.format == OutputFormat::Json
        || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Reported even with --quiet
            eprintln!("{}", error_report(&e, json));
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    // Synchronous commands never touch the store.
    match &cli.command {
        Commands::Version => return commands::version::execute(json),
        Commands::Categories => return commands::categories::execute(json),
        Commands::Completions { shell } => return commands::completions::execute(shell),
        _ => {}
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    let db = cli.db.as_ref();
    let busy = cli.busy_timeout_ms;

    rt.block_on(async {
        match &cli.command {
            Commands::Init { force, empty } => {
                commands::init::execute(db, busy, *force, *empty, json).await
            }
            Commands::Add(args) => commands::item::execute_add(args, db, busy, json).await,
            Commands::List { category } => {
                commands::item::execute_list(category.as_deref(), db, busy, json).await
            }
            Commands::Edit(args) => commands::item::execute_edit(args, db, busy, json).await,
            Commands::Delete { id } => commands::item::execute_delete(id, db, busy, json).await,
            Commands::Stats => commands::stats::execute(db, busy, json).await,
            Commands::Version | Commands::Categories | Commands::Completions { .. } => Ok(()),
        }
    })
}
