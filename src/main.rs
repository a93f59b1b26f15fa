mod index;
mod normalize;
mod output;
mod record;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use index::{IndexOptions, SearchIndex};
use indicatif::{ProgressBar, ProgressStyle};
use normalize::{NormalizeOptions, Row, normalize_rows};
use record::StudentRecord;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "natija")]
#[command(about = "In-memory search index for exam results sheets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a rows file into a dataset
    Ingest {
        /// JSON rows file: an array of header -> cell objects, as produced
        /// by a tabular-file reader
        rows: PathBuf,

        /// Where to write the normalized dataset
        #[arg(short, long)]
        out: PathBuf,

        /// Suppress progress and summary output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Search a dataset by key prefix or name substring
    Search {
        /// Normalized dataset file
        dataset: PathBuf,

        /// Query: digits search dossier numbers, text searches names
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up one record by its exact dossier number
    Lookup {
        /// Normalized dataset file
        dataset: PathBuf,

        /// Dossier number
        key: u64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show index statistics for a dataset
    Stats {
        /// Normalized dataset file
        dataset: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let color = cli.color.enabled();

    match cli.command {
        Commands::Ingest { rows, out, quiet } => cmd_ingest(&rows, &out, quiet),
        Commands::Search {
            dataset,
            query,
            limit,
            json,
        } => cmd_search(&dataset, &query, limit, json, color),
        Commands::Lookup { dataset, key, json } => cmd_lookup(&dataset, key, json, color),
        Commands::Stats { dataset, json } => cmd_stats(&dataset, json),
    }
}

fn spinner(msg: &'static str, quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(msg);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Some(spinner)
}

fn cmd_ingest(rows_path: &Path, out: &Path, quiet: bool) -> Result<()> {
    let stage = spinner("Reading rows...", quiet);
    let text = fs::read_to_string(rows_path)
        .with_context(|| format!("failed to read rows file: {}", rows_path.display()))?;
    let rows: Vec<Row> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse rows file: {}", rows_path.display()))?;
    if let Some(stage) = stage {
        stage.finish_with_message(format!("Read {} rows", rows.len()));
    }

    let stage = spinner("Normalizing records...", quiet);
    let batch = normalize_rows(&rows, &NormalizeOptions::default())?;
    if let Some(stage) = stage {
        stage.finish_with_message(format!("Normalized {} records", batch.records.len()));
    }

    let stage = spinner("Writing dataset...", quiet);
    let dataset = serde_json::to_string(&batch.records)?;
    fs::write(out, dataset)
        .with_context(|| format!("failed to write dataset: {}", out.display()))?;
    if let Some(stage) = stage {
        stage.finish_with_message(format!("Wrote {}", out.display()));
    }

    if !quiet {
        println!();
        output::print_ingest_summary(&batch)?;
    }
    Ok(())
}

fn load_dataset(path: &Path) -> Result<Vec<StudentRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;
    let records = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse dataset: {}", path.display()))?;
    Ok(records)
}

fn cmd_search(dataset: &Path, query: &str, limit: usize, json: bool, color: bool) -> Result<()> {
    let records = load_dataset(dataset)?;
    let opts = IndexOptions {
        result_cap: limit,
        ..Default::default()
    };
    let index = SearchIndex::with_options(records, opts);
    let results = index.search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if index.is_empty() {
        println!("dataset holds no indexable records");
    } else {
        output::print_results(&results, query, color)?;
        if !results.is_empty() {
            println!();
            println!("{} result(s) from {} records", results.len(), index.len());
        }
    }
    Ok(())
}

fn cmd_lookup(dataset: &Path, key: u64, json: bool, color: bool) -> Result<()> {
    let records = load_dataset(dataset)?;
    let index = SearchIndex::new(records);

    match index.lookup_by_key(key) {
        Some(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                output::print_record(record, color)?;
            }
        }
        None if json => println!("null"),
        None => println!("no record with dossier {key}"),
    }
    Ok(())
}

fn cmd_stats(dataset: &Path, json: bool) -> Result<()> {
    let records = load_dataset(dataset)?;
    let index = SearchIndex::new(records);
    let stats = index.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        output::print_stats(&stats)?;
    }
    Ok(())
}
