use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_app::{modules, session, CatalogError, Holding, Session};
use libris_kernel::settings::Settings;

/// In-memory library catalog.
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    /// Start with an empty catalog instead of the bundled collection.
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive menu session (default).
    Shell,
    /// Print every available work with its copy count.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print works whose title or author contains TERM, ignoring case.
    Search {
        term: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load libris settings")?;
    if cli.no_seed {
        settings.catalog.seed = false;
    }

    libris_telemetry::init(&settings.telemetry)
        .with_context(|| "failed to initialize telemetry")?;

    tracing::info!(
        env = ?settings.environment,
        seed = settings.catalog.seed,
        "libris starting"
    );

    let mut catalog = modules::bootstrap(&settings.catalog);
    let stdout = io::stdout();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = io::stdin();
            Session::new(&mut catalog, stdin.lock(), stdout.lock(), settings.session)
                .run()
                .with_context(|| "interactive session failed")?;
        }
        Command::List { json } => {
            print_holdings(&mut stdout.lock(), catalog.list_grouped(), json, false)?;
        }
        Command::Search { term, json } => {
            print_holdings(&mut stdout.lock(), catalog.search(&term), json, true)?;
        }
    }

    tracing::info!(available = catalog.available_count(), "libris finished");
    Ok(())
}

fn print_holdings<W: Write>(
    out: &mut W,
    result: Result<Vec<Holding>, CatalogError>,
    json: bool,
    compact: bool,
) -> anyhow::Result<()> {
    match (result, json) {
        (Ok(holdings), true) => {
            serde_json::to_writer_pretty(&mut *out, &holdings)
                .with_context(|| "failed to encode holdings")?;
            writeln!(out)?;
        }
        (Err(_), true) => writeln!(out, "[]")?,
        (Ok(holdings), false) if compact => session::render::search_results(out, &holdings)?,
        (Ok(holdings), false) => session::render::catalog(out, &holdings)?,
        (Err(CatalogError::EmptyCatalog), false) => writeln!(out, "The library is empty.")?,
        (Err(error), false) => writeln!(out, "Nothing found: {}", error)?,
    }
    Ok(())
}
