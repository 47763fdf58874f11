use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use copper::cli::{self, CliArgs};
use copper::dispatch::{self, DispatchOptions, OutputSink};
use copper::error::AppError;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn print_banner(args: &CliArgs) {
    println!("Samuel Yvon");
    println!("Cop Number Calculator");
    println!("Will use at maximum {} workers.", args.workers);
    if args.aggregate {
        println!("Aggregating results.");
    }
    if args.time {
        println!("Timing the computations.");
    }
}

fn run(args: CliArgs) -> Result<()> {
    let options = DispatchOptions {
        // Usage validation in `cli::parse` guarantees `max_cop` is set
        // whenever `aggregate` is; otherwise a missing bound defaults to 1.
        k_max: args.max_cop.unwrap_or(1),
        workers: args.workers.max(1),
        aggregate: args.aggregate,
    };
    let sink = OutputSink::new();

    if args.path.is_dir() {
        dispatch::run_folder(&args.path, &options, sink)?;
    } else {
        if let Some(histogram) = dispatch::run_file(&args.path, &options, sink.clone())? {
            sink.print_line(histogram.trim_end());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args = match cli::parse() {
        Ok(args) => args,
        Err(AppError::UsageError { message }) => {
            if message != "help requested" {
                cli::print_usage(true);
                eprintln!("{message}");
            }
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if !args.silent {
        print_banner(&args);
    }

    let take_time = args.time;
    let start = Instant::now();
    let result = run(args);
    if take_time {
        println!("Duration: {} second(s)", start.elapsed().as_secs());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
