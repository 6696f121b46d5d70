use anyhow::Result;
use clap::{Parser, Subcommand};
use datatable::config::{self, Config, OutputFormat};
use datatable::io;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datatable")]
#[command(about = "Query labeled numeric rows stored as CSV")]
struct Args {
    /// CSV file of `value,label0,label1,...` records
    file: PathBuf,

    /// Field delimiter (default: DATATABLE_DELIMITER or ',')
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Output format for tables (default: DATATABLE_FORMAT or csv)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Sum rows with equal labels while loading
    #[arg(short, long)]
    merge: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Total of every value
    Sum,

    /// Value of the single row with exactly these labels
    Get { labels: Vec<String> },

    /// Distinct labels (one column) or label tuples (several columns)
    Distinct {
        #[arg(required = true)]
        columns: Vec<usize>,
    },

    /// Sum values grouped by the labels at the given columns
    SumDistinct {
        #[arg(required = true)]
        columns: Vec<usize>,
    },

    /// Keep rows by label prefix and/or by the label at one column
    Filter {
        #[arg(long, num_args = 1..)]
        prefix: Vec<String>,

        #[arg(long)]
        column: Option<usize>,

        /// Exact label at --column
        #[arg(long, requires = "column", conflicts_with = "matches")]
        equals: Option<String>,

        /// Regex the label at --column must match
        #[arg(long, requires = "column")]
        matches: Option<String>,
    },

    /// Rewrite one label value at a column
    Map {
        column: usize,

        #[arg(long)]
        replace: String,

        #[arg(long)]
        with: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = config::parse_delimiter(delimiter)?;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    config.merge |= args.merge;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Loading {}", args.file.display());
    let table = io::load_csv(&args.file, &config)?;
    info!("Loaded {} lines", table.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Sum => writeln!(out, "{}", table.sum())?,
        Command::Get { labels } => writeln!(out, "{}", table.get(&labels)?)?,
        Command::Distinct { columns } => {
            if let [column] = columns.as_slice() {
                for value in table.get_distinct(*column) {
                    writeln!(out, "{}", value)?;
                }
            } else {
                let separator = (config.delimiter as char).to_string();
                for tuple in table.get_distinct_columns(&columns) {
                    writeln!(out, "{}", tuple.join(&separator))?;
                }
            }
        }
        Command::SumDistinct { columns } => {
            io::write_table(&table.sum_distinct(&columns), &mut out, &config)?
        }
        Command::Filter {
            prefix,
            column,
            equals,
            matches,
        } => {
            let mut filtered = table.filter(&prefix);
            if let Some(column) = column {
                if let Some(value) = equals {
                    filtered = filtered.filter_column(column, value);
                } else if let Some(pattern) = matches {
                    let re = Regex::new(&pattern)?;
                    filtered = filtered.filter_column_by(column, |label| re.is_match(label));
                }
            }
            info!("{} of {} lines kept", filtered.len(), table.len());
            io::write_table(&filtered, &mut out, &config)?
        }
        Command::Map {
            column,
            replace,
            with,
        } => {
            let mapped = table.map(column, |label| {
                if label == replace {
                    with.clone()
                } else {
                    label.to_string()
                }
            });
            io::write_table(&mapped, &mut out, &config)?
        }
    }

    Ok(())
}
