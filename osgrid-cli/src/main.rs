//! Point d'entrée CLI pour osgrid-cli

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::Commands;

/// Convertir des coordonnées géographiques vers/depuis la grille nationale OS
#[derive(Parser)]
#[command(name = "osgrid-cli")]
#[command(author, version)]
#[command(about = "Convert geographic coordinates to/from OS National Grid references")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::ToGrid {
            lat,
            lon,
            datum,
            digits,
            json,
        } => cli::cmd_to_grid(lat, lon, &datum, digits, json),
        Commands::FromGrid {
            gridref,
            datum,
            json,
        } => cli::cmd_from_grid(&gridref, &datum, json),
        Commands::Convert {
            lat,
            lon,
            from,
            to,
            height,
            json,
        } => cli::cmd_convert(lat, lon, &from, &to, height, json),
        Commands::Batch {
            input,
            output,
            datum,
            digits,
            json,
        } => cli::cmd_batch(&input, output.as_deref(), &datum, digits, json),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
