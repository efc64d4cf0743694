//! sqlgen CLI
//!
//! Formats and checks SQL SELECT statements.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

use sqlgen_cli::{check_sql, format_sql, resolve_options, Overrides};

/// Parse, check and reformat SQL SELECT statements.
#[derive(Parser)]
#[command(name = "sqlgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement and print it in the chosen style.
    Format {
        /// File holding the statement (stdin if not specified).
        input: Option<PathBuf>,

        /// JSON file with format options.
        #[arg(short, long, env = "SQLGEN_OPTIONS")]
        options: Option<PathBuf>,

        /// Start from the multi-line preset when no options file is given.
        #[arg(short, long)]
        pretty: bool,

        /// Start each clause on its own line.
        #[arg(long)]
        clause_per_line: bool,

        /// Write INNER JOIN and LEFT OUTER JOIN in full.
        #[arg(long)]
        verbose_joins: bool,

        /// Write AS before aliases.
        #[arg(long)]
        use_as: bool,

        /// Spaces per indentation level.
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Parse a statement and report what it contains.
    Check {
        /// File holding the statement (stdin if not specified).
        input: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn read_input(input: Option<&Path>) -> std::io::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Format {
            input,
            options,
            pretty,
            clause_per_line,
            verbose_joins,
            use_as,
            indent,
        } => {
            let overrides = Overrides {
                pretty,
                clause_per_line,
                verbose_joins,
                use_as,
                indent,
            };
            let options = resolve_options(options.as_deref(), &overrides)?;
            let sql = read_input(input.as_deref())?;
            debug!(bytes = sql.len(), "formatting statement");
            println!("{}", format_sql(&sql, &options)?);
        }

        Commands::Check { input, json } => {
            let sql = read_input(input.as_deref())?;
            match check_sql(&sql) {
                Ok(report) if json => println!("{}", report.to_json()?),
                Ok(report) => println!(
                    "OK: {} statement, {} source(s), {} query(ies)",
                    report.statement, report.sources, report.queries
                ),
                Err(err) => {
                    error!("{err}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
