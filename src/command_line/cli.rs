#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use sat_features::sat::assignment::VecAssignment;
use sat_features::sat::dimacs::parse_file;
use sat_features::sat::extract::FeatureExtractor;
use sat_features::sat::literal::PackedLiteral;
use sat_features::sat::state::State;
use smallvec::SmallVec;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

type DefaultState = State<PackedLiteral, SmallVec<[PackedLiteral; 8]>, VecAssignment>;

/// Defines the command-line interface for the feature extractor.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sat-features",
    version,
    about = "Feature extraction over CNF clause databases"
)]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to extract from.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Extract features from a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Extract features from every .cnf file under a directory.
    Dir {
        /// Path to the directory to sweep.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable printing of timing and memory statistics after extraction.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,
}

/// Parses one CNF file, extracts its feature vector, and writes the report
/// to stdout.
///
/// # Errors
///
/// If the file cannot be opened or the report cannot be written.
pub(crate) fn extract_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    let state: DefaultState =
        parse_file(path).map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    epoch::advance().unwrap();
    let time = std::time::Instant::now();

    let mut extractor = FeatureExtractor::new(&state);
    extractor.extract();

    let elapsed = time.elapsed();

    println!("c features for {}", path.display());
    extractor
        .print_stats(&mut std::io::stdout())
        .map_err(|e| format!("Failed to write report: {e}"))?;

    if common.stats {
        print_run_stats(parse_time, elapsed, &state);
    }

    Ok(())
}

/// Sweeps a directory, extracting features of every `.cnf` file found.
///
/// # Errors
///
/// If the path is not a directory or any file fails to parse.
pub(crate) fn extract_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "Provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }

        extract_file(file_path, common)?;
    }

    Ok(())
}

/// Writes the completion script for `shell` to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints parse/extract timing and memory figures for one file.
fn print_run_stats(parse_time: Duration, elapsed: Duration, state: &DefaultState) {
    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    println!("=======================[ Extraction Statistics ]=====================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Extract time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    stat_line("Variables", state.num_vars);
    stat_line("Clauses", state.num_clauses());
    stat_line("Memory usage (MiB)", format!("{allocated_mib:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident_mib:.2}"));
    println!("=====================================================================");
}
