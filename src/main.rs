//! Command-line front-end for the feature extractor.
//!
//! Parses a DIMACS CNF file (or every `.cnf` file under a directory), loads
//! it into a solver-style clause database, runs one extraction pass, and
//! prints the feature vector one field per line. Intended for building
//! portfolio-selection datasets and for eyeballing a formula's structure.
//!
//! ```sh
//! sat-features problem.cnf
//! sat-features file --path problem.cnf --stats
//! sat-features dir --path benchmarks/
//! sat-features completions zsh
//! ```

use clap::Parser;

use crate::command_line::cli::{Cli, Commands, extract_dir, extract_file, print_completions};

mod command_line;

/// Global allocator using `tikv-jemallocator`, for performance and for the
/// memory figures the `--stats` report reads back.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    // A bare path without a subcommand is treated as a DIMACS file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            if let Err(e) = extract_file(&path, &cli.common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
            return;
        }
    }

    let result = match cli.command {
        Some(Commands::File { path, common }) => extract_file(&path, &common),
        Some(Commands::Dir { path, common }) => extract_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            print_completions(shell);
            Ok(())
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
