//! Command-line argument parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::error::AppError;

/// Computes the cop number of graphs stored in the graph6 file format.
///
/// Accepts either a single graph6 file or a directory of them (directories
/// are read one level deep; subdirectories are not descended into).
#[derive(Debug, Parser)]
#[command(name = "copper", disable_help_flag = true)]
pub struct CliArgs {
    /// Path to a graph6 file or a directory of graph6 files.
    pub path: PathBuf,

    /// Maximum cop number to check; graphs needing more are reported as
    /// "over-bound" instead.
    #[arg(short = 'k', long = "max-cop")]
    pub max_cop: Option<u32>,

    /// Number of worker threads to use in parallel.
    #[arg(short = 'w', long = "workers", default_value_t = 1)]
    pub workers: usize,

    /// Time the computation using wall-clock time.
    #[arg(short = 'c', long = "time")]
    pub time: bool,

    /// Silent mode: suppress the startup banner.
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Aggregate mode: print a histogram instead of one line per graph.
    /// Requires `-k`.
    #[arg(short = 'a', long = "aggregate")]
    pub aggregate: bool,

    /// Print this help message and exit.
    #[arg(short = 'h', long = "help")]
    pub help: bool,
}

pub const USAGE: &str = "Usage: path_to_g6 [-h (help)] [-k cop_number] [-w no_workers=1] [-c] [-s] [-a]";

const DETAILED_USAGE: &[&str] = &[
    "-k : the maximum cop number to check. Beyond this number, graphs are reported as over-bound.",
    "-w : the maximum number of worker threads to use in parallel.",
    "-c : time the computation using wall clock (real) time.",
    "-s : silent mode, does not print a description of received parameters.",
    "-a : aggregate mode, prints a histogram of cop numbers instead of one line per graph. Requires -k.",
];

/// Prints the usage banner. `quick` suppresses the per-flag descriptions
/// (used for error paths, where a terse reminder is enough).
pub fn print_usage(quick: bool) {
    println!("{USAGE}\n");
    if !quick {
        println!("Copper is a tool to compute the cop number of graphs, stored in the g6 file format. The g6 file format");
        println!("can contain a single or multiple graphs. The tool supports the following commands:");
        for line in DETAILED_USAGE {
            println!("\t{line}");
        }
    }
}

/// Parses `argv`, handling `-h`/`--help` and validating flag combinations
/// the way clap's derive cannot express on its own.
///
/// The CLI help convention in most tools exits 0; this one is kept
/// deliberately faithful to its origin and exits 1 on `-h` as well as on
/// usage errors, so both paths route through [`AppError::UsageError`] here
/// and the binary's exit code stays uniform.
pub fn parse() -> Result<CliArgs, AppError> {
    parse_from(std::env::args_os())
}

/// Same validation as [`parse`], but over an explicit argument list, so
/// tests can exercise it without touching the real process arguments.
pub fn parse_from<I, T>(args: I) -> Result<CliArgs, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = CliArgs::try_parse_from(args).map_err(|err| AppError::UsageError {
        message: err.to_string(),
    })?;

    if args.help {
        print_usage(false);
        return Err(AppError::UsageError {
            message: "help requested".to_string(),
        });
    }

    if args.aggregate && args.max_cop.is_none() {
        return Err(AppError::UsageError {
            message: "the aggregate mode requires -k to be specified".to_string(),
        });
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_without_max_cop_is_a_usage_error() {
        let err = parse_from(["copper", "graphs.g6", "-a"]).unwrap_err();
        assert!(matches!(err, AppError::UsageError { .. }));
    }

    #[test]
    fn aggregate_with_max_cop_is_accepted() {
        let args = parse_from(["copper", "graphs.g6", "-a", "-k", "3"]).unwrap();
        assert!(args.aggregate);
        assert_eq!(args.max_cop, Some(3));
    }

    #[test]
    fn help_flag_is_a_usage_error_too() {
        let err = parse_from(["copper", "graphs.g6", "-h"]).unwrap_err();
        assert!(matches!(err, AppError::UsageError { .. }));
    }
}
