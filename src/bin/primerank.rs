use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::{Level, debug, error, info};
use primerank::{
    candidate::{DEFAULT_DELIMITER, load_candidates_from_path},
    genome_stats::{GenomeStats, ReferenceGenome},
    ranking::rank_with,
    report::{best_report, penalty_line, ranking_json, ranking_report},
    scoring::ScoringConfig,
};
use simple_logger::init_with_level;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: SubArgs,

    #[arg(short = 'v', long = "verbose", help = "Log per-candidate penalties")]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum SubArgs {
    /// Score and rank primer pairs from a delimited table
    #[command(name = "rank")]
    Rank {
        #[arg(short = 'i', long = "input", value_name = "PATH", help = "Primer table")]
        input: PathBuf,

        #[arg(
            short = 'c',
            long = "config",
            value_name = "PATH",
            help = "JSON scoring thresholds"
        )]
        config: Option<PathBuf>,

        #[arg(
            short = 'd',
            long = "delimiter",
            value_name = "CHAR",
            help = "Column delimiter [default: TAB]"
        )]
        delimiter: Option<char>,

        #[arg(short = 't', long = "threads", value_name = "THREADS")]
        threads: Option<usize>,

        #[arg(long = "json", help = "Print the ranking as JSON")]
        json: bool,

        #[arg(long = "top", value_name = "N", help = "Only list the N best pairs")]
        top: Option<usize>,
    },
    /// Size and GC% of the first record of a FASTA file
    #[command(name = "genome-stats")]
    GenomeStats {
        #[arg(short = 'f', long = "fasta", value_name = "PATH")]
        fasta: PathBuf,

        #[arg(long = "reference-name", default_value = "B. suis")]
        reference_name: String,

        #[arg(long = "reference-size", value_name = "BP", default_value_t = 3_300_000)]
        reference_size: usize,

        #[arg(long = "reference-gc", value_name = "PCT", default_value_t = 57.2)]
        reference_gc: f64,

        #[arg(long = "no-comparison")]
        no_comparison: bool,
    },
}

fn delimiter_byte(delimiter: Option<char>) -> Result<u8> {
    match delimiter {
        None => Ok(DEFAULT_DELIMITER),
        Some(c) if c.is_ascii() => Ok(c as u8),
        Some(c) => Err(anyhow!("Delimiter '{c}' is not a single ASCII character")),
    }
}

fn run_rank(
    input: PathBuf,
    config: Option<PathBuf>,
    delimiter: Option<char>,
    threads: Option<usize>,
    json: bool,
    top: Option<usize>,
) -> Result<()> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Could not configure thread pool")?;
    }

    let config = match config {
        Some(path) => ScoringConfig::load_from_path(&path)?,
        None => ScoringConfig::default(),
    };

    let candidates = load_candidates_from_path(&input, delimiter_byte(delimiter)?)?;
    info!(
        "Loaded {} primer candidates from {}",
        candidates.len(),
        input.display()
    );

    let ranked = rank_with(&candidates, &config)?;
    for scored in &ranked {
        for penalty in &scored.penalties {
            debug!("{}: {}", scored.candidate.gene, penalty_line(penalty));
        }
    }

    let best = ranked
        .first()
        .ok_or_else(|| anyhow!("No primer candidates in {}", input.display()))?;

    if json {
        let ranked = &ranked[..top.unwrap_or(ranked.len()).min(ranked.len())];
        println!("{}", ranking_json(ranked)?);
    } else {
        println!("{}", ranking_report(&ranked, top));
        print!("{}", best_report(best));
    }
    Ok(())
}

fn run_genome_stats(fasta: PathBuf, reference: Option<ReferenceGenome>) -> Result<()> {
    let stats = GenomeStats::from_fasta_path(&fasta)?;
    info!("Read {} ({} bp)", stats.id, stats.size_bp);
    print!("{}", stats.report(reference.as_ref()));
    Ok(())
}

fn main() {
    let start = std::time::Instant::now();
    let args: Args = Args::parse();

    let level = if args.verbose {
        Level::Debug
    } else {
        Level::Info
    };
    if let Err(e) = init_with_level(level) {
        eprintln!("Could not initialize logger: {e}");
    }

    let result = match args.command {
        SubArgs::Rank {
            input,
            config,
            delimiter,
            threads,
            json,
            top,
        } => run_rank(input, config, delimiter, threads, json, top),
        SubArgs::GenomeStats {
            fasta,
            reference_name,
            reference_size,
            reference_gc,
            no_comparison,
        } => {
            let reference = (!no_comparison).then(|| ReferenceGenome {
                name: reference_name,
                size_bp: reference_size,
                gc_percent: reference_gc,
            });
            run_genome_stats(fasta, reference)
        }
    };

    if let Err(e) = result {
        error!("{e:#}");
        std::process::exit(1);
    }

    info!("Elapsed time: {:.3?}", start.elapsed());
}
