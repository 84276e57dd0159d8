use change_calculator::application::calculator::ChangeCalculator;
use change_calculator::domain::ports::DenominationSourceBox;
use change_calculator::infrastructure::builtin::BuiltinDenominations;
use change_calculator::interfaces::csv::denomination_reader::CsvDenominationFile;
use change_calculator::interfaces::report::{write_json, write_lines};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Currency identifier, e.g. US or Mexico
    #[arg(long)]
    currency: String,

    /// Price owed
    #[arg(long)]
    price: Decimal,

    /// Tendered amounts; repeat the flag or list several values
    #[arg(long, required = true, num_args = 1..)]
    payment: Vec<Decimal>,

    /// CSV file with `currency,denomination` rows. Defaults to the built-in table.
    #[arg(long)]
    denominations: Option<PathBuf>,

    /// Print the breakdown as JSON
    #[arg(long)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let source: DenominationSourceBox = match cli.denominations {
        Some(path) => Box::new(CsvDenominationFile::new(path)),
        None => Box::new(BuiltinDenominations::new()),
    };
    let table = Arc::new(source.load().into_diagnostic()?);

    let calculator = ChangeCalculator::with_table(table, &cli.currency).into_diagnostic()?;
    let change = calculator
        .calculate_change(cli.price, &cli.payment)
        .into_diagnostic()?;

    if !change.remainder().is_zero() {
        warn!(remainder = %change.remainder(), "change not expressible in {}", change.currency());
    }

    let stdout = io::stdout();
    if cli.json {
        write_json(stdout.lock(), &change).into_diagnostic()?;
    } else {
        write_lines(stdout.lock(), &change).into_diagnostic()?;
    }

    Ok(())
}
