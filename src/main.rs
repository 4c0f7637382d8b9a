use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, Level};
use simple_logger::init_with_level;

use splice_events::{
    EventClass, EventMaker, EventTable, LogProgress, TripleTable, TripleTableBuilder,
};

/// Detect alternative-splicing events from an exon/junction triple table.
#[derive(Parser, Debug)]
#[command(name = "splice-events")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run event detection and write one table per event class
    Detect(DetectArgs),

    /// Load a triple table and print graph summary stats
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Triple table (tab-separated, optionally .gz)
    #[arg(long, short)]
    triples: PathBuf,

    /// Field delimiter of the triple table
    #[arg(long, default_value_t = '\t')]
    delimiter: char,

    /// Header of the exon column
    #[arg(long, default_value = "exon")]
    exon_column: String,

    /// Header of the direction column
    #[arg(long, default_value = "direction")]
    direction_column: String,

    /// Header of the junction column
    #[arg(long, default_value = "junction")]
    junction_column: String,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    table: TableArgs,
}

#[derive(Args, Debug)]
struct DetectArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Event classes to detect (repeatable); default: all.
    /// Accepts se, mxe, a5ss, a3ss, afe, ale or their long names.
    #[arg(long = "event", short, value_name = "CLASS", num_args = 1..)]
    events: Vec<EventClass>,

    /// Write `<long_name>.tsv` files here instead of printing to stdout
    #[arg(long, short)]
    out_dir: Option<PathBuf>,

    /// Percent of exons between two progress messages
    #[arg(long, default_value_t = 10)]
    progress_step: usize,

    /// Only log warnings and errors
    #[arg(long, short)]
    quiet: bool,
}

fn read_triples(args: &TableArgs) -> Result<TripleTable> {
    let table = TripleTableBuilder::new()
        .delimiter(args.delimiter)
        .exon_column(&args.exon_column)
        .direction_column(&args.direction_column)
        .junction_column(&args.junction_column)
        .build_from_path(&args.triples)
        .with_context(|| format!("reading triples from {}", args.triples.display()))?;
    info!("Read {} triples from {}", table.len(), args.triples.display());
    Ok(table)
}

fn write_table(table: &EventTable, out_dir: Option<&Path>) -> Result<()> {
    match out_dir {
        Some(dir) => {
            let path = dir.join(format!("{}.tsv", table.class.long_name()));
            let file = File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            table
                .write_tsv(BufWriter::new(file))
                .with_context(|| format!("writing {}", path.display()))?;
            info!("{} {} events written to {}", table.len(), table.class, path.display());
        }
        None => {
            let stdout = io::stdout();
            table
                .write_tsv(stdout.lock())
                .context("writing table to stdout")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Detect(args) => {
            let level = if args.quiet { Level::Warn } else { Level::Info };
            init_with_level(level).context("initialising logger")?;

            let triples = read_triples(&args.table)?;
            let maker = EventMaker::new(triples)
                .with_context(|| format!("building graph from {}", args.table.triples.display()))?
                .with_reporter(LogProgress)
                .with_progress_step(args.progress_step);

            if let Some(dir) = &args.out_dir {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating output directory {}", dir.display()))?;
            }

            let classes = if args.events.is_empty() {
                EventClass::ALL.to_vec()
            } else {
                args.events
            };

            for class in classes {
                let table = maker.find(class);
                write_table(&table, args.out_dir.as_deref())?;
            }
        }

        Command::Stats(args) => {
            init_with_level(Level::Warn).context("initialising logger")?;
            let maker = EventMaker::new(read_triples(&args.table)?)
                .with_context(|| format!("building graph from {}", args.table.triples.display()))?;
            print!("{maker}");
        }
    }

    Ok(())
}
