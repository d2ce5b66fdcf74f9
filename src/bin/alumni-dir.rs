//! CLI tool to encode, decode and search batch labels.
//!
//! Usage:
//!   alumni-dir encode --programme "Int. MSc." --start 2017 --end 2022
//!   alumni-dir decode "Int. MSc. 2017-22"
//!   alumni-dir search students.json --programme PhD --query "K L"
//!   alumni-dir years --ahead 2

use std::path::PathBuf;
use std::process;

use alumni_directory::{
    BatchForm, DirectoryConfig, DirectoryError, FilterQuery, Record, YearRange, apply_traced,
    decode, group_by_batch, load_records, sorted_by_batch_desc,
};
use clap::{Parser, Subcommand};
use tracing::Level;

/// Work with alumni batch labels and directory records.
#[derive(Parser)]
#[command(name = "alumni-dir")]
struct Cli {
    /// Directory config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter statistics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a batch label from its parts
    Encode {
        #[arg(short, long)]
        programme: String,
        #[arg(short, long)]
        start: String,
        #[arg(short, long, default_value = "")]
        end: String,
    },
    /// Split a batch label into its parts
    Decode { label: String },
    /// Filter a JSON record file and print matches grouped by batch
    Search {
        /// Records file (JSON array)
        records: PathBuf,
        #[arg(short, long, default_value = "")]
        programme: String,
        #[arg(short, long, default_value = "")]
        start: String,
        #[arg(short, long, default_value = "")]
        end: String,
        /// Free-text query (names, supervisors, institute, position, interests)
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// List selectable years, newest first
    Years {
        /// Years past the current one to offer (overrides the config)
        #[arg(short, long)]
        ahead: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DirectoryError> {
    let mut config = DirectoryConfig::load(cli.config.as_deref())?;
    if let Command::Years { ahead } = &cli.command {
        config = config.with_years_ahead(*ahead);
    }
    let years = YearRange::current(&config);

    match cli.command {
        Command::Encode {
            programme,
            start,
            end,
        } => {
            let label = BatchForm::from_inputs(&programme, &start, &end)?.encode(&years)?;
            println!("{label}");
        }
        Command::Decode { label } => match decode(&label) {
            Ok(fields) => {
                println!("programme: {}", fields.programme);
                println!("start:     {}", fields.start_year);
                match fields.end_year {
                    Some(end) => println!("end:       {end}"),
                    None => println!("end:       -"),
                }
            }
            Err(failure) => println!("unparseable: {}", failure.label),
        },
        Command::Search {
            records,
            programme,
            start,
            end,
            query,
        } => {
            let filter = FilterQuery::from_inputs(&programme, &start, &end, &query)?;
            let all = sorted_by_batch_desc(&load_records(&records)?);
            let (matched, trace) = apply_traced(&all, &filter);

            for group in group_by_batch(matched) {
                println!("{} ({} students) #{}", group.label, group.len(), group.anchor);
                for record in &group.records {
                    println!("  {}", summary_line(record));
                }
            }
            if cli.verbose {
                eprintln!(
                    "Records:  {} in -> {} out",
                    trace.input_count, trace.output_count
                );
            }
        }
        Command::Years { .. } => {
            for year in years.options() {
                println!("{year}");
            }
        }
    }
    Ok(())
}

fn summary_line(record: &Record) -> String {
    let mut line = record.name.clone();
    if let Some(supervisor) = record.supervisor.as_deref().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" | supervisor: {supervisor}"));
    }
    let status: Vec<&str> = [record.position.as_deref(), record.institute.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if !status.is_empty() {
        line.push_str(&format!(" | {}", status.join(", ")));
    }
    line
}
